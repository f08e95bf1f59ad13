//! Engine types
//!
//! Trigger events, the engine's phase, and the channel-backed trigger source.

use crate::error::{Error, Result};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

// ============================================================================
// Trigger
// ============================================================================

/// A pacing signal: "consider fetching the next page".
///
/// Carries no payload. The first trigger of a session is synthesized by the
/// engine; later ones come from the caller's trigger source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Load the next page, if one is warranted and none is in flight
    LoadMore,
}

// ============================================================================
// Phase
// ============================================================================

/// The engine's position in its session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No fetch in flight; triggers are accepted
    Idle,
    /// One fetch in flight; triggers are dropped
    Fetching,
    /// Terminal: no more pages, or the trigger source completed
    Completed,
    /// Terminal: the fetcher or the trigger source reported an error
    Failed,
}

impl Phase {
    /// Check whether the session has ended
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

// ============================================================================
// Load-More Channel
// ============================================================================

/// Caller-side handle for issuing "load more" triggers.
///
/// Dropping the handle completes the trigger source, which ends the session
/// once any in-flight fetch has been accumulated.
#[derive(Debug, Clone)]
pub struct LoadMoreHandle {
    tx: mpsc::UnboundedSender<Result<Trigger>>,
}

impl LoadMoreHandle {
    /// Request the next page. Returns false if the engine is gone.
    pub fn load_more(&self) -> bool {
        self.tx.send(Ok(Trigger::LoadMore)).is_ok()
    }

    /// Fail the trigger source, terminating the session with an upstream
    /// error. Returns false if the engine is gone.
    pub fn fail(&self, message: impl Into<String>) -> bool {
        self.tx.send(Err(Error::upstream(message))).is_ok()
    }
}

/// Create a channel-backed trigger source.
///
/// The returned stream plugs into [`Expander::expand`](crate::Expander::expand);
/// the handle is kept by whoever decides when to load more.
pub fn load_more_channel() -> (LoadMoreHandle, UnboundedReceiverStream<Result<Trigger>>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (LoadMoreHandle { tx }, UnboundedReceiverStream::new(rx))
}
