use crate::models::book::{Book, CatalogResponse};
use crate::models::query::{LimitOption, SearchField};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_CATALOG_URL: &str = "https://openlibrary.org/search.json";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{message}")]
    Remote { status: StatusCode, message: String },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("Malformed catalog response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Anything that can answer a book search.
#[async_trait]
pub trait CatalogSource {
    async fn fetch_books(
        &self,
        search_text: &str,
        limit: LimitOption,
        field: SearchField,
    ) -> Result<Vec<Book>, CatalogError>;
}

pub struct CatalogClient {
    client: Client,
    url: String,
}

impl CatalogClient {
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, CatalogError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn search(
        &self,
        search_text: &str,
        limit: Option<u32>,
        fields: &str,
    ) -> Result<Vec<Book>, CatalogError> {
        let params = search_params(search_text, limit, fields);
        debug!("Catalog request {} {:?}", self.url, params);

        let response = self.client.get(&self.url).query(&params).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(status, &body);
            warn!("Catalog responded with {}: {}", status, message);
            return Err(CatalogError::Remote { status, message });
        }

        let parsed: CatalogResponse = serde_json::from_slice(&body)?;
        let books = parsed.into_books();
        debug!("Catalog returned {} books for {:?}", books.len(), search_text);
        Ok(books)
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_books(
        &self,
        search_text: &str,
        limit: LimitOption,
        field: SearchField,
    ) -> Result<Vec<Book>, CatalogError> {
        self.search(search_text, Some(limit.value()), field.value())
            .await
    }
}

/// Query string pairs; each parameter is sent only when it carries a value.
pub fn search_params(
    search_text: &str,
    limit: Option<u32>,
    fields: &str,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(3);

    if !search_text.is_empty() {
        params.push(("q", search_text.to_string()));
    }
    if let Some(limit) = limit.filter(|l| *l > 0) {
        params.push(("limit", limit.to_string()));
    }
    if !fields.is_empty() {
        params.push(("fields", fields.to_string()));
    }

    params
}

/// The message shown for a failed request: the `error` member of a JSON
/// payload, otherwise the raw body, otherwise the status line.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_slice(body) {
        if let Some(serde_json::Value::String(message)) = map.get("error") {
            return message.clone();
        }
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    if !text.is_empty() {
        return text;
    }

    status.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_include_all_present_values() {
        let params = search_params("dune", Some(10), "title");

        assert_eq!(
            params,
            vec![
                ("q", "dune".to_string()),
                ("limit", "10".to_string()),
                ("fields", "title".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_params_skip_empty_values() {
        assert!(search_params("", None, "").is_empty());
        assert_eq!(
            search_params("", Some(0), "title"),
            vec![("fields", "title".to_string())]
        );
    }

    #[test]
    fn test_error_message_prefers_json_error_member() {
        let msg = error_message(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"error":"server down"}"#,
        );
        assert_eq!(msg, "server down");
    }

    #[test]
    fn test_error_message_falls_back_to_body_then_status() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, b"upstream unavailable\n"),
            "upstream unavailable"
        );
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, b""),
            "503 Service Unavailable"
        );
    }

    #[test]
    fn test_remote_error_displays_message_verbatim() {
        let err = CatalogError::Remote {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "server down".to_string(),
        };
        assert_eq!(err.to_string(), "server down");
    }
}
