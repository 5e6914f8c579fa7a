//! # Free Functions
//!
//! One-shot range and collection runs. Each call is an independent run with
//! no reentrancy guard, so any number may execute concurrently. Progress is
//! only visible through an optional sink in [`ExecutionOptions`].

use crate::error::{BoxError, Result};
use crate::execution::dispatcher::{self, ExecutionRequest};
use crate::execution::{CollectionItems, ExecutionOptions, StepRange, WorkItem};
use crate::progress::ReportProgress;
use std::future::Future;

/// Run `work` for every index in `start..end` with default options
///
/// ```rust
/// use std::sync::atomic::{AtomicI64, Ordering};
///
/// # async fn example() -> tasker_async_for::Result<()> {
/// let sum = AtomicI64::new(0);
/// tasker_async_for::for_range(0, 10, |i| {
///     sum.fetch_add(i, Ordering::SeqCst);
///     std::future::ready(Ok::<(), std::io::Error>(()))
/// })
/// .await?;
/// assert_eq!(sum.load(Ordering::SeqCst), 45);
/// # Ok(())
/// # }
/// ```
pub async fn for_range<F, Fut, E>(start: i64, end: i64, work: F) -> Result<()>
where
    F: FnMut(i64) -> Fut,
    Fut: Future<Output = std::result::Result<(), E>>,
    E: Into<BoxError>,
{
    for_range_with(StepRange::new(start, end), ExecutionOptions::default(), work).await
}

/// Fails with `InvalidArgument` for a zero stride before any item runs
pub async fn for_range_with<F, Fut, E>(
    range: StepRange,
    options: ExecutionOptions,
    work: F,
) -> Result<()>
where
    F: FnMut(i64) -> Fut,
    Fut: Future<Output = std::result::Result<(), E>>,
    E: Into<BoxError>,
{
    let items = range.into_items()?;
    run(items, &options, work).await
}

/// Run `work` for every element of `collection` with default options
pub async fn for_each<I, F, Fut, E>(collection: I, work: F) -> Result<()>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = std::result::Result<(), E>>,
    E: Into<BoxError>,
{
    for_each_with(collection, ExecutionOptions::default(), work).await
}

pub async fn for_each_with<I, F, Fut, E>(
    collection: I,
    options: ExecutionOptions,
    work: F,
) -> Result<()>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = std::result::Result<(), E>>,
    E: Into<BoxError>,
{
    run(CollectionItems::new(collection), &options, work).await
}

async fn run<It, T, F, Fut, E>(items: It, options: &ExecutionOptions, work: F) -> Result<()>
where
    It: ExactSizeIterator<Item = WorkItem<T>>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = std::result::Result<(), E>>,
    E: Into<BoxError>,
{
    let targets: Vec<&dyn ReportProgress> = options
        .progress_sink
        .as_deref()
        .map(|sink| sink as &dyn ReportProgress)
        .into_iter()
        .collect();

    dispatcher::execute(ExecutionRequest {
        items,
        work,
        mode: options.dispatch_mode(),
        targets,
    })
    .await
}
