//! # Dispatcher
//!
//! Drives one run: pulls items from the generator in order, keeps at most
//! `mode.window()` of them in flight, feeds every completion into the progress
//! tracker and every failure into the error aggregator, then finalizes.
//!
//! In-flight items are polled cooperatively through a `FuturesUnordered`
//! inside the caller's task. Nothing is spawned, so work closures may borrow
//! from the caller and need not be `'static`.

use super::failures::ErrorAggregator;
use super::options::DispatchMode;
use super::work_items::WorkItem;
use crate::constants::events;
use crate::error::{AsyncForError, BoxError, ItemPanic, Result};
use crate::logging::log_run_operation;
use crate::progress::{ProgressTracker, ReportProgress};
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{info, info_span, trace, warn, Instrument};
use uuid::Uuid;

/// Everything one run needs
pub struct ExecutionRequest<'a, I, F> {
    /// Work items in dispatch order
    pub items: I,
    pub work: F,
    pub mode: DispatchMode,
    /// Progress targets written by this run (handle and/or external sink)
    pub targets: Vec<&'a dyn ReportProgress>,
}

struct ItemOutcome {
    ordinal: usize,
    result: std::result::Result<(), BoxError>,
}

/// Run every item of the request to completion
///
/// Item failures never stop dispatch. Returns `AsyncForError::Aggregated`
/// with one cause per failed item once all items have finished.
pub async fn execute<I, T, F, Fut, E>(request: ExecutionRequest<'_, I, F>) -> Result<()>
where
    I: ExactSizeIterator<Item = WorkItem<T>>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = std::result::Result<(), E>>,
    E: Into<BoxError>,
{
    let ExecutionRequest {
        items,
        mut work,
        mode,
        targets,
    } = request;

    let run_id = Uuid::new_v4();
    let total = items.len();
    let span = info_span!("async_for_run", run_id = %run_id, total_items = total, mode = %mode);

    async move {
        let started_at = Instant::now();
        log_run_operation(events::RUN_STARTED, run_id, total, "running", None);

        let tracker = ProgressTracker::start(total, targets);
        let aggregator = ErrorAggregator::new();
        let window = mode.window();

        let mut items = items.fuse();
        let mut in_flight = FuturesUnordered::new();

        loop {
            while in_flight.len() < window {
                let Some(item) = items.next() else { break };
                trace!(ordinal = item.ordinal, in_flight = in_flight.len(), "Dispatching work item");
                in_flight.push(start_item(&mut work, item));
            }

            let Some(outcome) = in_flight.next().await else {
                break;
            };

            if let Err(error) = outcome.result {
                aggregator.record(outcome.ordinal, error);
            }
            tracker.report();
            trace!(
                ordinal = outcome.ordinal,
                completed = tracker.completed(),
                total = tracker.total(),
                progress = tracker.fraction(),
                "Work item finished"
            );
        }

        tracker.finish();

        let failed_items = aggregator.len();
        let duration_ms = started_at.elapsed().as_millis() as u64;

        match aggregator.into_result() {
            Ok(()) => {
                info!(duration_ms = duration_ms, "✅ Async run completed");
                log_run_operation(events::RUN_COMPLETED, run_id, total, "completed", None);
                Ok(())
            }
            Err(aggregate) => {
                warn!(
                    duration_ms = duration_ms,
                    failed_items = failed_items,
                    "❌ Async run finished with failed items"
                );
                let details = format!("{failed_items} of {total} items failed");
                log_run_operation(events::RUN_FAILED, run_id, total, "failed", Some(&details));
                Err(AsyncForError::Aggregated(aggregate))
            }
        }
    }
    .instrument(span)
    .await
}

/// Create the item's future, catching panics both while the work function
/// builds it and while it is polled
fn start_item<T, F, Fut, E>(work: &mut F, item: WorkItem<T>) -> impl Future<Output = ItemOutcome>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = std::result::Result<(), E>>,
    E: Into<BoxError>,
{
    let WorkItem { ordinal, value } = item;
    let started = panic::catch_unwind(AssertUnwindSafe(|| work(value)));

    async move {
        let result = match started {
            Ok(future) => match AssertUnwindSafe(future).catch_unwind().await {
                Ok(result) => result.map_err(Into::into),
                Err(payload) => Err(panic_error(payload)),
            },
            Err(payload) => Err(panic_error(payload)),
        };
        ItemOutcome { ordinal, result }
    }
}

fn panic_error(payload: Box<dyn Any + Send>) -> BoxError {
    Box::new(ItemPanic::from_payload(payload))
}
