//! Miro — upstream board data provider.
//!
//! DESIGN
//! ======
//! `client` speaks HTTP and returns one page at a time behind the
//! `PageSource` trait. `paginate` owns the credential and walks cursors.
//! Nothing here keeps state between calls.

pub mod client;
pub mod paginate;
pub mod types;

pub use client::MiroClient;
pub use paginate::BoardFetcher;

#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::Value;

    use super::client::{PageRequest, PageSource};
    use super::types::{Collection, Page};
    use crate::board::BoardError;

    /// In-memory upstream. Serves each collection in slices of the requested
    /// limit; the cursor is the next offset. Counts every call.
    #[derive(Default)]
    pub struct MockSource {
        collections: HashMap<Collection, Vec<Value>>,
        fail_on_call: Option<(usize, u16)>,
        calls: AtomicUsize,
        seen: Mutex<Vec<(Collection, Option<String>, u32)>>,
    }

    impl MockSource {
        #[must_use]
        pub fn new(items: Vec<Value>, connectors: Vec<Value>) -> Self {
            let mut collections = HashMap::new();
            collections.insert(Collection::Items, items);
            collections.insert(Collection::Connectors, connectors);
            Self { collections, ..Self::default() }
        }

        /// Fail the `n`th call (1-based) with the given HTTP status.
        #[must_use]
        pub fn failing_on_call(mut self, n: usize, status: u16) -> Self {
            self.fail_on_call = Some((n, status));
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn seen(&self) -> Vec<(Collection, Option<String>, u32)> {
            self.seen.lock().expect("mock mutex should lock").clone()
        }
    }

    #[async_trait::async_trait]
    impl PageSource for MockSource {
        async fn fetch_page(&self, req: PageRequest<'_>) -> Result<Page, BoardError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.seen
                .lock()
                .expect("mock mutex should lock")
                .push((req.collection, req.cursor.map(str::to_owned), req.limit));

            if let Some((n, status)) = self.fail_on_call {
                if n == call {
                    return Err(BoardError::UpstreamStatus { status, body: "mock failure".into() });
                }
            }

            let all = self.collections.get(&req.collection).cloned().unwrap_or_default();
            let start: usize = req.cursor.and_then(|c| c.parse().ok()).unwrap_or(0);
            let end = (start + req.limit as usize).min(all.len());
            let data = all.get(start..end).map(<[Value]>::to_vec).unwrap_or_default();
            let cursor = (end < all.len()).then(|| end.to_string());
            Ok(Page { data, cursor })
        }
    }

    /// A raw item payload positioned at `(x, y)`.
    #[must_use]
    pub fn raw_item(id: &str, kind: &str, text: &str, x: f64, y: f64) -> Value {
        serde_json::json!({
            "id": id,
            "type": kind,
            "data": { "content": text },
            "style": { "fillColor": "#ffffff" },
            "position": { "x": x, "y": y, "origin": "center" }
        })
    }

    /// A raw connector payload from `from` to `to` with an optional caption.
    #[must_use]
    pub fn raw_connector(id: &str, from: &str, to: &str, label: &str) -> Value {
        let captions = if label.is_empty() { serde_json::json!([]) } else { serde_json::json!([{ "content": label }]) };
        serde_json::json!({
            "id": id,
            "startItem": { "id": from },
            "endItem": { "id": to },
            "captions": captions,
            "style": { "lineType": "straight" }
        })
    }
}
