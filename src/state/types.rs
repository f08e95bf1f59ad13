//! Pagination snapshot types
//!
//! `PageState` is the immutable snapshot of pagination progress; it is
//! replaced wholesale on every accumulated page, never patched in place.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Page Token
// ============================================================================

/// Opaque continuation token for the next page fetch.
///
/// Round-tripped between responses and requests, never interpreted. The
/// empty token means the server offered no further continuation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    /// Create a token from a raw server value
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The empty token ("no continuation available")
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Check whether this is the empty token
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageToken {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for PageToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for PageToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Page State
// ============================================================================

/// Immutable snapshot of pagination progress for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState<T> {
    /// Resource collection being paged (opaque to the engine)
    pub url_path: String,

    /// Requested page size; only used to infer whether more pages remain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,

    /// Extra filter/sort parameters, forwarded to the fetcher untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_query: Option<HashMap<String, String>>,

    /// Token to request next; starts empty
    #[serde(default)]
    pub next_page_token: PageToken,

    /// Last-reported total item count, if the source provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_size: Option<u64>,

    /// Items accumulated across all pages fetched so far, in order
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,

    /// 1-based number of the next page about to be fetched
    pub next_page: u32,

    /// Whether a further fetch is warranted
    pub has_more: bool,
}

impl<T> PageState<T> {
    /// Create the seed state for a new pagination session
    pub fn new(url_path: impl Into<String>) -> Self {
        Self {
            url_path: url_path.into(),
            page_size: None,
            url_query: None,
            next_page_token: PageToken::empty(),
            total_size: None,
            result: Vec::new(),
            next_page: 1,
            has_more: true,
        }
    }

    /// Set the requested page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Attach filter/sort query parameters.
    ///
    /// A `pageSize` entry in the query is pagination config, not a filter: it
    /// is stripped out and promoted to `page_size` unless a page size was
    /// already set explicitly.
    #[must_use]
    pub fn with_query(mut self, mut query: HashMap<String, String>) -> Self {
        if let Some(raw) = query.remove("pageSize") {
            if self.page_size.is_none() {
                self.page_size = raw.parse().ok();
            }
        }
        self.url_query = Some(query);
        self
    }

    /// Number of items accumulated so far
    pub fn len(&self) -> usize {
        self.result.len()
    }

    /// Check whether no items have been accumulated yet
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

// ============================================================================
// Page Response
// ============================================================================

/// Raw output of one page fetch: this page's items only, plus continuation
/// metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Continuation token for the page after this one; empty when the server
    /// offers none
    #[serde(default)]
    pub next_page_token: PageToken,

    /// This page's items
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,

    /// Total item count, if the source reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_size: Option<u64>,
}

impl<T> PageResponse<T> {
    /// Create a response with items and a continuation token
    pub fn new(next_page_token: impl Into<PageToken>, result: Vec<T>) -> Self {
        Self {
            next_page_token: next_page_token.into(),
            result,
            total_size: None,
        }
    }

    /// Set the reported total item count
    #[must_use]
    pub fn with_total_size(mut self, total_size: u64) -> Self {
        self.total_size = Some(total_size);
        self
    }

    /// A terminal response: no items, no continuation
    pub fn done() -> Self {
        Self {
            next_page_token: PageToken::empty(),
            result: Vec::new(),
            total_size: None,
        }
    }
}
