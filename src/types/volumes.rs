use serde::Deserialize;

use crate::db::models::NewBook;
use crate::error::BookshelfError;

/// Response of the Google Books `volumes?q=` search.
///
/// Everything is optional on the wire; [`VolumesResponse::into_first_book`] decides
/// what is required.
#[derive(Debug, Deserialize)]
pub struct VolumesResponse {
    #[serde(default)]
    pub items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub authors: Option<Vec<String>>,
    pub page_count: Option<i64>,
    pub average_rating: Option<f64>,
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
}

#[derive(Debug, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub identifier: Option<String>,
}

impl VolumesResponse {
    /// Take the first search hit; no ranking or pagination.
    pub fn into_first_book(self) -> Result<NewBook, BookshelfError> {
        let volume = self
            .items
            .and_then(|items| items.into_iter().next())
            .ok_or(BookshelfError::MetadataParse("items"))?;
        let info = volume
            .volume_info
            .ok_or(BookshelfError::MetadataParse("volumeInfo"))?;
        NewBook::try_from(info)
    }
}

impl TryFrom<VolumeInfo> for NewBook {
    type Error = BookshelfError;

    fn try_from(info: VolumeInfo) -> Result<Self, Self::Error> {
        let title = info.title.ok_or(BookshelfError::MetadataParse("title"))?;
        let description = info
            .description
            .ok_or(BookshelfError::MetadataParse("description"))?;
        let author = info
            .authors
            .and_then(|authors| authors.into_iter().next())
            .ok_or(BookshelfError::MetadataParse("authors"))?;
        let pages = info
            .page_count
            .ok_or(BookshelfError::MetadataParse("pageCount"))?;
        let rating = info
            .average_rating
            .ok_or(BookshelfError::MetadataParse("averageRating"))?;
        // first identifier as listed, whatever its type
        let isbn13 = info
            .industry_identifiers
            .and_then(|ids| ids.into_iter().next())
            .and_then(|id| id.identifier)
            .ok_or(BookshelfError::MetadataParse("industryIdentifiers"))?;

        Ok(NewBook {
            title,
            author,
            isbn13,
            pages,
            rating,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<NewBook, BookshelfError> {
        serde_json::from_value::<VolumesResponse>(value)?.into_first_book()
    }

    fn dune_item() -> serde_json::Value {
        json!({
            "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert", "Someone Else"],
                "pageCount": 412,
                "averageRating": 4.5,
                "description": "...",
                "industryIdentifiers": [
                    { "type": "ISBN_13", "identifier": "9780441013593" },
                    { "type": "ISBN_10", "identifier": "0441013597" }
                ]
            }
        })
    }

    #[test]
    fn first_item_fields_are_extracted() {
        let other = json!({ "volumeInfo": { "title": "Dune Messiah" } });
        let book = parse(json!({ "items": [dune_item(), other] })).unwrap();
        assert_eq!(
            book,
            NewBook {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                isbn13: "9780441013593".to_string(),
                pages: 412,
                rating: 4.5,
                description: "...".to_string(),
            }
        );
    }

    #[test]
    fn integer_rating_is_accepted() {
        let mut item = dune_item();
        item["volumeInfo"]["averageRating"] = json!(4);
        let book = parse(json!({ "items": [item] })).unwrap();
        assert_eq!(book.rating, 4.0);
    }

    #[test]
    fn missing_or_empty_items_fail() {
        assert!(matches!(
            parse(json!({ "kind": "books#volumes", "totalItems": 0 })),
            Err(BookshelfError::MetadataParse("items"))
        ));
        assert!(matches!(
            parse(json!({ "items": [] })),
            Err(BookshelfError::MetadataParse("items"))
        ));
    }

    #[test]
    fn each_required_field_is_enforced() {
        let cases = [
            ("description", "description"),
            ("authors", "authors"),
            ("averageRating", "averageRating"),
            ("industryIdentifiers", "industryIdentifiers"),
            ("pageCount", "pageCount"),
            ("title", "title"),
        ];
        for (field, expected) in cases {
            let mut item = dune_item();
            item["volumeInfo"]
                .as_object_mut()
                .unwrap()
                .remove(field);
            match parse(json!({ "items": [item] })) {
                Err(BookshelfError::MetadataParse(missing)) => assert_eq!(missing, expected),
                other => panic!("expected failure on missing {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_author_and_identifier_lists_fail() {
        let mut item = dune_item();
        item["volumeInfo"]["authors"] = json!([]);
        assert!(parse(json!({ "items": [item] })).is_err());

        let mut item = dune_item();
        item["volumeInfo"]["industryIdentifiers"] = json!([]);
        assert!(parse(json!({ "items": [item] })).is_err());
    }
}
