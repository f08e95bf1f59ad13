//! State model
//!
//! The immutable pagination snapshot plus the pure fold that advances it.
//!
//! # Overview
//!
//! A session's progress lives in a [`PageState`]: the items accumulated so
//! far, the continuation token to request next, and the `has_more` flag the
//! engine consults before launching another fetch. Each fetched
//! [`PageResponse`] is folded in by an [`Accumulator`] to produce the next
//! snapshot; the previous one is never mutated.

mod accumulators;
mod types;

pub use accumulators::{AccumulateFn, Accumulator, ConcatAccumulator, ReplaceAccumulator};
pub use types::{PageResponse, PageState, PageToken};
