use crate::api;
use crate::error::{BoxError, Result};
use crate::execution::ExecutionOptions;
use std::future::Future;

/// Method-call form of [`for_each`](crate::for_each) for any collection
///
/// ```rust
/// use tasker_async_for::AsyncForEachExt;
///
/// # async fn example() -> tasker_async_for::Result<()> {
/// vec![1, 2, 3]
///     .async_for_each(|n| async move {
///         println!("{n}");
///         Ok::<(), std::io::Error>(())
///     })
///     .await
/// # }
/// ```
pub trait AsyncForEachExt: IntoIterator + Sized {
    fn async_for_each<F, Fut, E>(self, work: F) -> impl Future<Output = Result<()>>
    where
        F: FnMut(Self::Item) -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
        E: Into<BoxError>,
    {
        api::for_each(self, work)
    }

    fn async_for_each_with<F, Fut, E>(
        self,
        options: ExecutionOptions,
        work: F,
    ) -> impl Future<Output = Result<()>>
    where
        F: FnMut(Self::Item) -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
        E: Into<BoxError>,
    {
        api::for_each_with(self, options, work)
    }
}

impl<I: IntoIterator> AsyncForEachExt for I {}
