//! Expansion engine
//!
//! Coordinates trigger events, the stepping function, and accumulation into
//! one serialized, observable sequence of pagination snapshots.
//!
//! # Overview
//!
//! [`Expander`] is the builder; [`ExpandStream`] is the session. The stream
//! is the state machine: every transition happens inside `poll_next`, so
//! trigger handling and the in-flight guard are serialized by the `Stream`
//! poll contract itself — no locks. The guarantees:
//!
//! - at most one fetch is outstanding at any instant,
//! - a trigger arriving while a fetch is in flight is dropped (not queued),
//! - a trigger arriving when no more pages are warranted ends the stream,
//! - fetch N+1 only launches after fetch N's response has been accumulated
//!   and emitted.
//!
//! Dropping the stream drops the trigger subscription and cancels any
//! in-flight fetch.

mod types;

pub use types::{load_more_channel, LoadMoreHandle, Phase, Trigger};

use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::state::{Accumulator, ConcatAccumulator, PageResponse, PageState};
use futures::future::BoxFuture;
use futures::stream::{self, Stream};
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

// ============================================================================
// Expander
// ============================================================================

/// Builder for one pagination session
pub struct Expander<T> {
    fetcher: Arc<dyn PageFetcher<T>>,
    accumulator: Arc<dyn Accumulator<T>>,
    initial: PageState<T>,
}

impl<T: Clone + Send + Sync + 'static> Expander<T> {
    /// Create an expander with the default concatenating accumulator
    pub fn new(fetcher: impl PageFetcher<T> + 'static, initial: PageState<T>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            accumulator: Arc::new(ConcatAccumulator),
            initial,
        }
    }

    /// Swap in an alternative accumulation policy
    #[must_use]
    pub fn with_accumulator(mut self, accumulator: impl Accumulator<T> + 'static) -> Self {
        self.accumulator = Arc::new(accumulator);
        self
    }

    /// Start the session against a trigger source.
    ///
    /// The engine prepends the implicit first trigger itself, so the first
    /// page loads without the source emitting anything. `Ok(Trigger)` items
    /// are pacing signals, an `Err` item fails the session, and the end of
    /// the source completes it.
    pub fn expand<S>(self, triggers: S) -> ExpandStream<T, S>
    where
        S: Stream<Item = Result<Trigger>>,
    {
        ExpandStream {
            triggers,
            fetcher: self.fetcher,
            accumulator: self.accumulator,
            state: self.initial,
            inflight: None,
            phase: Phase::Idle,
            primed: false,
            triggers_done: false,
        }
    }

    /// Start the session with no external triggers: the implicit first
    /// trigger fires, exactly the initial page loads, and the stream ends.
    pub fn expand_auto(self) -> ExpandStream<T, stream::Empty<Result<Trigger>>> {
        self.expand(stream::empty())
    }
}

// ============================================================================
// Expand Stream
// ============================================================================

/// Maximum number of trigger events consumed per poll of the stream.
const TRIGGER_BUDGET: usize = 32;

pin_project! {
    /// One pagination session as a stream of snapshots.
    ///
    /// Yields `Ok(state)` once per successfully accumulated page. A fetch or
    /// trigger-source error is yielded once as `Err` and ends the stream;
    /// normal completion is the end of the stream.
    pub struct ExpandStream<T, S> {
        #[pin]
        triggers: S,
        fetcher: Arc<dyn PageFetcher<T>>,
        accumulator: Arc<dyn Accumulator<T>>,
        state: PageState<T>,
        // The in-flight guard: Some exactly while phase == Fetching.
        inflight: Option<BoxFuture<'static, Result<PageResponse<T>>>>,
        phase: Phase,
        primed: bool,
        triggers_done: bool,
    }
}

impl<T, S> ExpandStream<T, S> {
    /// The current snapshot
    pub fn state(&self) -> &PageState<T> {
        &self.state
    }

    /// The engine's current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

impl<T, S> Stream for ExpandStream<T, S>
where
    T: Clone + Send + Sync + 'static,
    S: Stream<Item = Result<Trigger>>,
{
    type Item = Result<PageState<T>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if this.phase.is_terminal() {
            return Poll::Ready(None);
        }

        // Consume every trigger event that is ready right now. This is where
        // the exclusion policy lives: a trigger landing while a fetch is
        // outstanding is discarded, so back-to-back signals collapse into
        // the single fetch already running. The budget keeps an always-ready
        // source from starving the in-flight fetch.
        let mut budget = TRIGGER_BUDGET;
        loop {
            if budget == 0 {
                // Re-schedule so the remaining triggers are seen next poll.
                cx.waker().wake_by_ref();
                break;
            }
            budget -= 1;

            let event: Result<Trigger> = if !*this.primed {
                // The implicit first trigger, so an empty source still
                // yields the initial page.
                *this.primed = true;
                Ok(Trigger::LoadMore)
            } else if *this.triggers_done {
                break;
            } else {
                match this.triggers.as_mut().poll_next(cx) {
                    Poll::Ready(Some(item)) => item,
                    Poll::Ready(None) => {
                        *this.triggers_done = true;
                        break;
                    }
                    Poll::Pending => break,
                }
            };

            match event {
                Ok(Trigger::LoadMore) => {
                    if this.inflight.is_some() {
                        tracing::debug!("trigger dropped: fetch already in flight");
                        continue;
                    }
                    if !this.state.has_more {
                        tracing::debug!("trigger with no more pages: completing session");
                        *this.phase = Phase::Completed;
                        return Poll::Ready(None);
                    }

                    // Launch with the snapshot as it stands right now.
                    let fetcher = Arc::clone(this.fetcher);
                    let snapshot = this.state.clone();
                    tracing::debug!(page = snapshot.next_page, "launching page fetch");
                    let fut: BoxFuture<'static, Result<PageResponse<T>>> =
                        Box::pin(async move { fetcher.fetch_page(&snapshot).await });
                    *this.inflight = Some(fut);
                    *this.phase = Phase::Fetching;
                }
                Err(err) => {
                    // Upstream failure cancels any in-flight fetch by drop.
                    *this.inflight = None;
                    *this.phase = Phase::Failed;
                    return Poll::Ready(Some(Err(err)));
                }
            }
        }

        if let Some(fut) = this.inflight.as_mut() {
            return match fut.as_mut().poll(cx) {
                Poll::Ready(Ok(response)) => {
                    *this.inflight = None;
                    let next = this.accumulator.accumulate(this.state, response);
                    *this.state = next;
                    *this.phase = Phase::Idle;
                    tracing::debug!(
                        page = this.state.next_page,
                        items = this.state.result.len(),
                        has_more = this.state.has_more,
                        "page accumulated"
                    );
                    Poll::Ready(Some(Ok(this.state.clone())))
                }
                Poll::Ready(Err(err)) => {
                    // Guard cleared before the error is surfaced.
                    *this.inflight = None;
                    *this.phase = Phase::Failed;
                    Poll::Ready(Some(Err(err)))
                }
                Poll::Pending => Poll::Pending,
            };
        }

        if *this.triggers_done {
            // Source completed and nothing is in flight.
            *this.phase = Phase::Completed;
            return Poll::Ready(None);
        }

        Poll::Pending
    }
}
