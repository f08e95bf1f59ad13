//! Accumulation policies
//!
//! An accumulator is the pure fold that advances a pagination snapshot by one
//! fetched page. The engine accepts any policy of this shape; concatenation
//! is the default.

use super::types::{PageResponse, PageState};

/// A pure fold combining a prior snapshot and a fresh page response into an
/// updated snapshot.
///
/// Implementations must be side-effect free: the engine calls `accumulate`
/// exactly once per successful fetch and emits the returned snapshot
/// downstream.
pub trait Accumulator<T>: Send + Sync {
    /// Fold one response into the previous state
    fn accumulate(&self, state: &PageState<T>, response: PageResponse<T>) -> PageState<T>;
}

/// Whether a further fetch is warranted after this response.
///
/// More pages are inferred only when the server handed back a continuation
/// token AND the page came back full. A short page with a configured
/// `page_size`, or any response when `page_size` is unset, ends the session.
fn infer_has_more<T>(state: &PageState<T>, response: &PageResponse<T>) -> bool {
    !response.next_page_token.is_empty() && state.page_size == Some(response.result.len())
}

// ============================================================================
// Concat Accumulator
// ============================================================================

/// Default policy: append this page's items after all prior items.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatAccumulator;

impl<T: Clone> Accumulator<T> for ConcatAccumulator {
    fn accumulate(&self, state: &PageState<T>, response: PageResponse<T>) -> PageState<T> {
        let has_more = infer_has_more(state, &response);
        let mut result = state.result.clone();
        result.extend(response.result);

        PageState {
            url_path: state.url_path.clone(),
            page_size: state.page_size,
            url_query: state.url_query.clone(),
            // Last-seen wins, including overwrite with None.
            total_size: response.total_size,
            next_page_token: response.next_page_token,
            result,
            next_page: state.next_page + 1,
            has_more,
        }
    }
}

// ============================================================================
// Replace Accumulator
// ============================================================================

/// Refresh policy: keep only the latest page's items.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceAccumulator;

impl<T: Clone> Accumulator<T> for ReplaceAccumulator {
    fn accumulate(&self, state: &PageState<T>, response: PageResponse<T>) -> PageState<T> {
        let has_more = infer_has_more(state, &response);

        PageState {
            url_path: state.url_path.clone(),
            page_size: state.page_size,
            url_query: state.url_query.clone(),
            total_size: response.total_size,
            next_page_token: response.next_page_token,
            result: response.result,
            next_page: state.next_page + 1,
            has_more,
        }
    }
}

// ============================================================================
// Closure Adapter
// ============================================================================

/// Adapter so a plain closure can act as an accumulation policy
///
/// ```rust,ignore
/// let acc = AccumulateFn::new(|state, response| {
///     // custom fold
/// });
/// ```
pub struct AccumulateFn<F>(F);

impl<F> AccumulateFn<F> {
    /// Wrap a closure as an accumulator
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<T, F> Accumulator<T> for AccumulateFn<F>
where
    F: Fn(&PageState<T>, PageResponse<T>) -> PageState<T> + Send + Sync,
{
    fn accumulate(&self, state: &PageState<T>, response: PageResponse<T>) -> PageState<T> {
        (self.0)(state, response)
    }
}
