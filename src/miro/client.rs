//! Miro REST v2 page client.
//!
//! Thin HTTP wrapper for `GET /boards/{id}/{collection}`. One call fetches
//! one page; pagination lives in `paginate`. Pure parsing in `parse_page`
//! for testability.

use std::time::Duration;

use super::types::{Collection, Page};
use crate::board::BoardError;
use crate::config::MiroConfig;

// =============================================================================
// PAGE SOURCE TRAIT
// =============================================================================

/// One request for one page of a board collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<'a> {
    pub credential: &'a str,
    pub board_id: &'a str,
    pub collection: Collection,
    pub cursor: Option<&'a str>,
    pub limit: u32,
}

/// Source of collection pages. Enables mocking the upstream in tests.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a single page.
    ///
    /// # Errors
    ///
    /// Returns an upstream [`BoardError`] on transport failure, timeout,
    /// non-success status, or an unparseable body.
    async fn fetch_page(&self, req: PageRequest<'_>) -> Result<Page, BoardError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct MiroClient {
    http: reqwest::Client,
    base_url: String,
}

impl MiroClient {
    /// Build the HTTP client with the configured per-call timeouts.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the TLS backend cannot initialize.
    pub fn new(config: &MiroConfig) -> Result<Self, BoardError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| BoardError::Configuration(format!("HTTP client build failed: {e}")))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    fn collection_url(&self, board_id: &str, collection: Collection) -> String {
        format!("{}/boards/{board_id}/{collection}", self.base_url)
    }
}

#[async_trait::async_trait]
impl PageSource for MiroClient {
    async fn fetch_page(&self, req: PageRequest<'_>) -> Result<Page, BoardError> {
        let mut query: Vec<(&str, String)> = vec![("limit", req.limit.to_string())];
        if let Some(cursor) = req.cursor {
            query.push(("cursor", cursor.to_string()));
        }

        let response = self
            .http
            .get(self.collection_url(req.board_id, req.collection))
            .bearer_auth(req.credential)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query)
            .send()
            .await
            .map_err(|e| BoardError::from_reqwest(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| BoardError::from_reqwest(&e))?;

        if !status.is_success() {
            return Err(BoardError::UpstreamStatus { status: status.as_u16(), body: text });
        }

        parse_page(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_page(json: &str) -> Result<Page, BoardError> {
    serde_json::from_str(json).map_err(|e| BoardError::UpstreamParse(e.to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
