#![allow(dead_code)]

pub mod gauge;
pub mod strategies;

/// Failure returned by test work functions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("item {0} failed")]
pub struct TestError(pub i64);

/// Downcast every cause of an aggregated run failure to `TestError`
pub fn failed_items(error: &tasker_async_for::AsyncForError) -> Vec<i64> {
    error
        .as_aggregate()
        .map(|aggregate| {
            aggregate
                .causes()
                .iter()
                .filter_map(|cause| cause.downcast_ref::<TestError>())
                .map(|e| e.0)
                .collect()
        })
        .unwrap_or_default()
}
