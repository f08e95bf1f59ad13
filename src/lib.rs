//! # Pagewise
//!
//! An incremental "load more" pagination engine for paged data sources.
//!
//! Pagewise turns a caller-supplied stepping function (fetch one page) into a
//! continuously-updated accumulated result set. The first page loads
//! automatically; later pages load on demand when the caller signals "load
//! more". At most one fetch is ever in flight: triggers that arrive while a
//! fetch is outstanding are dropped, not queued.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use pagewise::{Expander, FetchFn, PageResponse, PageState, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let initial = PageState::<String>::new("/v1/items").with_page_size(50);
//!
//!     let fetcher = FetchFn::new(|state: PageState<String>| async move {
//!         // Build a request from state.url_path, state.next_page_token,
//!         // state.page_size, state.url_query and decode the body.
//!         fetch_one_page(&state).await
//!     });
//!
//!     let (handle, triggers) = pagewise::load_more_channel();
//!     let mut pages = Expander::new(fetcher, initial).expand(triggers);
//!
//!     while let Some(state) = pages.next().await.transpose()? {
//!         render(&state.result);
//!         if state.has_more {
//!             handle.load_more();
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ExpandStream                           │
//! │  triggers ──► Idle/Fetching/Completed/Failed state machine  │
//! │                    │                     ▲                  │
//! │                    ▼                     │                  │
//! │             PageFetcher::fetch_page ──► Accumulator         │
//! │                                          │                  │
//! │                                          ▼                  │
//! │                              Stream<Result<PageState<T>>>   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transport, retry policy, caching, and rendering are all the fetcher's or
//! the consumer's business; the engine only owns the pagination state machine.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Pagination snapshot and accumulation policies
pub mod state;

/// Stepping-function trait
pub mod fetch;

/// The expansion engine
pub mod engine;

// ============================================================================
// Re-exports
// ============================================================================

pub use engine::{load_more_channel, ExpandStream, Expander, LoadMoreHandle, Phase, Trigger};
pub use error::{Error, Result, ResultExt};
pub use fetch::{FetchFn, PageFetcher};
pub use state::{
    AccumulateFn, Accumulator, ConcatAccumulator, PageResponse, PageState, PageToken,
    ReplaceAccumulator,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
