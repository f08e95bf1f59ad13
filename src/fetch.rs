//! Stepping-function trait
//!
//! The engine owns no transport. Callers supply a [`PageFetcher`] that turns
//! the current snapshot into one page response; how it does so (HTTP, a
//! database cursor, a fixture in tests) is its own business, as are retries
//! and caching.

use crate::error::Result;
use crate::state::{PageResponse, PageState};
use async_trait::async_trait;
use std::future::Future;

/// One step of pagination: fetch the page described by the current snapshot.
///
/// The engine invokes this with the snapshot as it stands the instant the
/// fetch launches; `next_page_token`, `page_size`, and `url_query` are the
/// fields a fetcher normally reads to build its request. Exactly one
/// invocation is outstanding at any time.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    /// Fetch one page for the given snapshot
    async fn fetch_page(&self, state: &PageState<T>) -> Result<PageResponse<T>>;
}

#[async_trait]
impl<T, F> PageFetcher<T> for std::sync::Arc<F>
where
    T: Send + Sync,
    F: PageFetcher<T> + ?Sized,
{
    async fn fetch_page(&self, state: &PageState<T>) -> Result<PageResponse<T>> {
        (**self).fetch_page(state).await
    }
}

// ============================================================================
// Closure Adapter
// ============================================================================

/// Adapter so a plain async closure can act as a fetcher
///
/// ```rust,ignore
/// let fetcher = FetchFn::new(|state: PageState<Item>| async move {
///     client.list(&state.url_path, &state.next_page_token).await
/// });
/// ```
pub struct FetchFn<F>(F);

impl<F> FetchFn<F> {
    /// Wrap a closure as a fetcher
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<T, F, Fut> PageFetcher<T> for FetchFn<F>
where
    T: Clone + Send + Sync,
    F: Fn(PageState<T>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<PageResponse<T>>> + Send,
{
    async fn fetch_page(&self, state: &PageState<T>) -> Result<PageResponse<T>> {
        (self.0)(state.clone()).await
    }
}
