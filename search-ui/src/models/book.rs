use serde::{Deserialize, Serialize};

/// A record exactly as the catalog returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawBook {
    pub title: Option<String>,
    pub first_publish_year: Option<i32>,
    pub author_name: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogResponse {
    pub docs: Vec<RawBook>,
}

/// A search hit as shown in the result list. Missing fields stay missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<Vec<String>>,
}

impl From<RawBook> for Book {
    fn from(raw: RawBook) -> Self {
        Book {
            title: raw.title,
            first_publish_year: raw.first_publish_year,
            author_name: raw.author_name,
        }
    }
}

impl CatalogResponse {
    pub fn into_books(self) -> Vec<Book> {
        self.docs.into_iter().map(Book::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_record_keeps_missing_fields_absent() {
        let resp: CatalogResponse =
            serde_json::from_str(r#"{"docs":[{"title":"Dune"}]}"#).unwrap();
        let books = resp.into_books();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title.as_deref(), Some("Dune"));
        assert_eq!(books[0].first_publish_year, None);
        assert_eq!(books[0].author_name, None);
    }

    #[test]
    fn test_full_record_maps_field_by_field() {
        let json = r#"{"docs":[{"title":"Dune","first_publish_year":1965,"author_name":["Frank Herbert"],"key":"/works/OL1"}]}"#;
        let books = serde_json::from_str::<CatalogResponse>(json)
            .unwrap()
            .into_books();

        assert_eq!(
            books[0],
            Book {
                title: Some("Dune".to_string()),
                first_publish_year: Some(1965),
                author_name: Some(vec!["Frank Herbert".to_string()]),
            }
        );
    }

    #[test]
    fn test_missing_docs_is_rejected() {
        assert!(serde_json::from_str::<CatalogResponse>(r#"{"numFound":0}"#).is_err());
    }

    #[test]
    fn test_book_serializes_camel_case_without_absent_fields() {
        let book = Book {
            title: None,
            first_publish_year: Some(1965),
            author_name: None,
        };
        let value = serde_json::to_value(&book).unwrap();

        assert_eq!(value, serde_json::json!({ "firstPublishYear": 1965 }));
    }
}
