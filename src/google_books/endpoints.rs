use crate::error::BookshelfError;
use crate::types::volumes::VolumesResponse;

use tracing::debug;
use url::Url;

/// Stateless Google Books endpoints.
pub(super) struct GoogleBooksEndpoints;

impl GoogleBooksEndpoints {
    /// `GET <endpoint>?q=<term>`; the term is form-encoded.
    pub(super) async fn search_volumes(
        endpoint: &Url,
        term: &str,
        http_client: reqwest::Client,
    ) -> Result<VolumesResponse, BookshelfError> {
        let mut url = endpoint.clone();
        url.query_pairs_mut().append_pair("q", term);

        let resp = http_client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BookshelfError::UpstreamStatus(status));
        }
        let body = resp.bytes().await?;
        debug!(term, bytes = body.len(), "volumes search answered");
        Ok(serde_json::from_slice(&body)?)
    }
}
