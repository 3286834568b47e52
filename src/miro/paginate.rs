//! Pagination fetcher — assembles a whole collection from cursor pages.
//!
//! DESIGN
//! ======
//! Request a page with the fixed page size; while the response carries a
//! cursor, request the next one. Pages are concatenated in response order.
//! A failed page aborts the whole fetch: no partial result, no retry.
//!
//! The credential check happens here, before the first page request, so a
//! missing token never reaches the `PageSource`.
//!
//! Cancellation is structural: the loop only advances by awaiting the next
//! page, so dropping the future (client disconnect) stops further requests.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::client::{PageRequest, PageSource};
use super::types::{Collection, RawConnector, RawItem};
use crate::board::BoardError;

#[derive(Clone)]
pub struct BoardFetcher {
    source: Arc<dyn PageSource>,
    credential: Option<String>,
    page_limit: u32,
}

impl BoardFetcher {
    #[must_use]
    pub fn new(source: Arc<dyn PageSource>, credential: Option<String>, page_limit: u32) -> Self {
        Self { source, credential, page_limit: page_limit.max(1) }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    /// Fail fast when no credential is held.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Configuration`] if the access token is absent.
    pub fn credential(&self) -> Result<&str, BoardError> {
        self.credential
            .as_deref()
            .ok_or_else(|| BoardError::Configuration("MIRO_ACCESS_TOKEN environment variable is required".into()))
    }

    /// Fetch every element of a collection, following cursors to the end.
    ///
    /// # Errors
    ///
    /// Configuration error if the credential is absent; otherwise the first
    /// upstream error from any page.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        board_id: &str,
        collection: Collection,
    ) -> Result<Vec<T>, BoardError> {
        let credential = self.credential()?;

        let mut out = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .source
                .fetch_page(PageRequest {
                    credential,
                    board_id,
                    collection,
                    cursor: cursor.as_deref(),
                    limit: self.page_limit,
                })
                .await?;
            pages += 1;
            debug!(%board_id, %collection, page = pages, len = page.data.len(), "miro: page fetched");

            let next = page.next_cursor().map(str::to_owned);
            for value in page.data {
                let element = serde_json::from_value(value).map_err(|e| BoardError::UpstreamParse(e.to_string()))?;
                out.push(element);
            }

            match next {
                Some(c) => cursor = Some(c),
                None => break,
            }
        }

        info!(%board_id, %collection, pages, count = out.len(), "miro: collection fetched");
        Ok(out)
    }

    /// All raw items on a board, in upstream order.
    ///
    /// # Errors
    ///
    /// See [`BoardFetcher::fetch_all`].
    pub async fn fetch_items(&self, board_id: &str) -> Result<Vec<RawItem>, BoardError> {
        self.fetch_all(board_id, Collection::Items).await
    }

    /// All raw connectors on a board, in upstream order.
    ///
    /// # Errors
    ///
    /// See [`BoardFetcher::fetch_all`].
    pub async fn fetch_connectors(&self, board_id: &str) -> Result<Vec<RawConnector>, BoardError> {
        self.fetch_all(board_id, Collection::Connectors).await
    }
}

#[cfg(test)]
#[path = "paginate_test.rs"]
mod tests;
