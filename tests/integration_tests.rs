//! Integration tests driving a full pagination session
//!
//! Tests the end-to-end flow: a simulated paged source serving camelCase
//! JSON bodies → wire decoding → the expansion engine → accumulated
//! snapshots on the consumer side.

use async_trait::async_trait;
use futures::StreamExt;
use pagewise::{
    load_more_channel, Expander, FetchFn, PageFetcher, PageResponse, PageState, Result,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Simulated Paged Source
// ============================================================================

/// An in-memory collection served page by page. The continuation token is an
/// opaque encoding of the next offset, the way many list APIs implement it.
struct PagedSource {
    items: Vec<serde_json::Value>,
    requests: AtomicUsize,
}

impl PagedSource {
    fn new(count: usize) -> Arc<Self> {
        Arc::new(Self {
            items: (0..count).map(|i| json!({ "id": i })).collect(),
            requests: AtomicUsize::new(0),
        })
    }

    /// One GET against the collection, returning the raw JSON body.
    fn list(&self, token: &str, page_size: usize) -> serde_json::Value {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let offset: usize = token.parse().unwrap_or(0);
        let page: Vec<_> = self.items.iter().skip(offset).take(page_size).collect();
        let next_offset = offset + page.len();
        let next_token = if next_offset < self.items.len() {
            next_offset.to_string()
        } else {
            String::new()
        };

        json!({
            "nextPageToken": next_token,
            "result": page,
            "totalSize": self.items.len(),
        })
    }
}

#[async_trait]
impl PageFetcher<serde_json::Value> for PagedSource {
    async fn fetch_page(
        &self,
        state: &PageState<serde_json::Value>,
    ) -> Result<PageResponse<serde_json::Value>> {
        let body = self.list(
            state.next_page_token.as_str(),
            state.page_size.unwrap_or(10),
        );
        let response: PageResponse<serde_json::Value> = serde_json::from_value(body)?;
        Ok(response)
    }
}

// ============================================================================
// Full Session Tests
// ============================================================================

#[tokio::test]
async fn test_load_more_until_exhausted() {
    // 7 items at page size 3: pages of 3, 3, 1.
    let source = PagedSource::new(7);
    let initial = PageState::new("/v1/widgets").with_page_size(3);
    let (handle, triggers) = load_more_channel();
    let mut pages = Expander::new(Arc::clone(&source), initial).expand(triggers);

    let mut snapshots = Vec::new();
    while let Some(state) = pages.next().await.transpose().unwrap() {
        snapshots.push(state);
        // Keep asking; the trigger after the final page completes the
        // session instead of fetching.
        handle.load_more();
    }

    // The short last page flips has_more; the trailing trigger after it
    // completed the session without another request.
    assert_eq!(snapshots.len(), 3);
    assert_eq!(source.requests.load(Ordering::SeqCst), 3);

    let last = snapshots.last().unwrap();
    assert_eq!(last.result.len(), 7);
    assert_eq!(last.total_size, Some(7));
    assert_eq!(last.next_page, 4);
    assert!(!last.has_more);

    // Order preserved across pages.
    let ids: Vec<_> = last.result.iter().map(|v| v["id"].as_u64()).collect();
    assert_eq!(ids, (0..7u64).map(Some).collect::<Vec<_>>());

    // Earlier snapshots were not mutated by later accumulation.
    assert_eq!(snapshots[0].result.len(), 3);
    assert_eq!(snapshots[1].result.len(), 6);
}

#[tokio::test]
async fn test_exact_multiple_ends_on_empty_token() {
    // 6 items at page size 3: the second page comes back full but without a
    // continuation token, which alone is enough to end the session.
    let source = PagedSource::new(6);
    let initial = PageState::new("/v1/widgets").with_page_size(3);
    let (handle, triggers) = load_more_channel();
    let mut pages = Expander::new(Arc::clone(&source), initial).expand(triggers);

    let mut last_len = 0;
    while let Some(state) = pages.next().await.transpose().unwrap() {
        last_len = state.result.len();
        handle.load_more();
    }

    assert_eq!(last_len, 6);
    // Page 2 returned a full page with no token, so the session ended there.
    assert_eq!(source.requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_closure_fetcher_end_to_end() {
    async fn fetch_one(
        source: Arc<PagedSource>,
        state: PageState<serde_json::Value>,
    ) -> Result<PageResponse<serde_json::Value>> {
        let body = source.list(state.next_page_token.as_str(), state.page_size.unwrap_or(10));
        Ok(serde_json::from_value(body)?)
    }

    let source = PagedSource::new(4);
    let captured = Arc::clone(&source);
    let fetcher = FetchFn::new(move |state| fetch_one(Arc::clone(&captured), state));

    let initial = PageState::new("/v1/widgets").with_page_size(4);
    let (handle, triggers) = load_more_channel();
    let mut pages = Expander::new(fetcher, initial).expand(triggers);

    let first = pages.next().await.unwrap().unwrap();
    assert_eq!(first.result.len(), 4);
    assert!(!first.has_more); // full page but no continuation token

    handle.load_more();
    assert!(pages.next().await.is_none());
}

#[tokio::test]
async fn test_single_automatic_page_with_no_trigger_source() {
    let source = PagedSource::new(10);
    let initial = PageState::new("/v1/widgets").with_page_size(4);
    let pages = Expander::new(Arc::clone(&source), initial).expand_auto();

    let snapshots: Vec<_> = pages.collect().await;

    assert_eq!(snapshots.len(), 1);
    assert_eq!(source.requests.load(Ordering::SeqCst), 1);
    let state = snapshots[0].as_ref().unwrap();
    assert_eq!(state.result.len(), 4);
    assert!(state.has_more); // more pages exist, but nobody asked
}
