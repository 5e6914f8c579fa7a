use crate::error::{AggregateError, AsyncForError, BoxError};
use parking_lot::Mutex;
use tracing::warn;

/// The effective failure of one item
#[derive(Debug)]
pub struct FailureRecord {
    pub ordinal: usize,
    pub error: BoxError,
}

/// Thread-safe collector of per-item failures
///
/// Holds exactly one record per failed item. A failure that is an
/// [`AggregateError`] with a single cause is replaced by that cause; one with
/// several causes is stored as-is, so a work function's deliberate
/// multi-cause failure stays a single opaque entry.
///
/// A nested run's [`AsyncForError::Aggregated`] failure is treated the same
/// way as a bare `AggregateError`.
///
/// The single-cause check is a heuristic: an item that deliberately returns
/// a one-cause `AggregateError` is unwrapped the same way.
#[derive(Debug, Default)]
pub struct ErrorAggregator {
    records: Mutex<Vec<FailureRecord>>,
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, ordinal: usize, error: BoxError) {
        let error = unwrap_single_cause(error);
        warn!(ordinal = ordinal, error = %error, "⚠️ Work item failed");
        self.records.lock().push(FailureRecord { ordinal, error });
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// `Ok` when nothing failed, otherwise one cause per failed item in
    /// ordinal order
    pub fn into_result(self) -> Result<(), AggregateError> {
        let mut records = self.records.into_inner();
        if records.is_empty() {
            return Ok(());
        }

        records.sort_by_key(|record| record.ordinal);
        Err(AggregateError::new(
            records.into_iter().map(|record| record.error).collect(),
        ))
    }
}

fn unwrap_single_cause(error: BoxError) -> BoxError {
    let error = match error.downcast::<AsyncForError>() {
        Ok(run_error) => match *run_error {
            AsyncForError::Aggregated(aggregate) => return unwrap_aggregate(aggregate),
            other => return Box::new(other),
        },
        Err(error) => error,
    };

    match error.downcast::<AggregateError>() {
        Ok(aggregate) => unwrap_aggregate(*aggregate),
        Err(error) => error,
    }
}

fn unwrap_aggregate(aggregate: AggregateError) -> BoxError {
    if aggregate.len() != 1 {
        return Box::new(aggregate);
    }

    let mut causes = aggregate.into_causes();
    match causes.pop() {
        Some(cause) => cause,
        None => Box::new(AggregateError::new(causes)),
    }
}
