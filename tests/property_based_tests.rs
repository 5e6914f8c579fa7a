mod common;

use common::strategies::*;
use parking_lot::Mutex;
use proptest::prelude::*;
use tasker_async_for::{for_range_with, DispatchMode, ExecutionOptions, StepRange};

proptest! {
    /// Property: a stepped range yields exactly what a plain loop visits
    #[test]
    fn step_range_matches_naive_loop((start, end) in bounds_strategy(), stride in stride_strategy()) {
        let range = StepRange::new(start, end).with_stride(stride);
        let expected = naive_range(start, end, stride);

        let items = range.into_items().unwrap();
        prop_assert_eq!(items.len(), expected.len());

        let values: Vec<i64> = items.map(|item| item.value).collect();
        prop_assert_eq!(values, expected);
    }

    /// Property: ordinals are dense and start at zero
    #[test]
    fn step_range_ordinals_are_dense((start, end) in bounds_strategy(), stride in stride_strategy()) {
        let items = StepRange::new(start, end).with_stride(stride).into_items().unwrap();
        for (expected, item) in items.enumerate() {
            prop_assert_eq!(item.ordinal, expected);
        }
    }

    /// Property: non-positive limits are unbounded, positive limits bound the window
    #[test]
    fn dispatch_window_follows_limit(limit in concurrency_limit_strategy(), synchronous in any::<bool>()) {
        let mode = ExecutionOptions::new()
            .synchronous(synchronous)
            .with_concurrency_limit(limit)
            .dispatch_mode();

        match mode {
            DispatchMode::Sequential => prop_assert!(synchronous),
            DispatchMode::Bounded(n) => prop_assert_eq!(n as i32, limit),
            DispatchMode::Unbounded => prop_assert!(!synchronous && limit <= 0),
        }
        prop_assert!(mode.window() >= 1);
    }

    /// Property: a run visits every index of the range exactly once
    #[test]
    fn run_visits_each_index_once(
        (start, end) in (-60i64..60, -60i64..60),
        stride in stride_strategy(),
        limit in concurrency_limit_strategy(),
    ) {
        let visited = Mutex::new(Vec::new());
        let result = tokio_test::block_on(for_range_with(
            StepRange::new(start, end).with_stride(stride),
            ExecutionOptions::new().with_concurrency_limit(limit),
            |i| {
                visited.lock().push(i);
                std::future::ready(Ok::<(), std::io::Error>(()))
            },
        ));
        prop_assert!(result.is_ok());

        let mut visited = visited.into_inner();
        let mut expected = naive_range(start, end, stride);
        visited.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(visited, expected);
    }
}

#[test]
fn extreme_bounds_do_not_overflow() {
    let range = StepRange::new(i64::MIN, i64::MAX).with_stride(i64::MAX);
    let values: Vec<i64> = range
        .into_items()
        .unwrap()
        .map(|item| item.value)
        .collect();
    assert_eq!(values, vec![i64::MIN, -1, i64::MAX - 1]);

    let descending = StepRange::new(i64::MAX, i64::MIN).with_stride(i64::MIN);
    assert_eq!(descending.item_count().unwrap(), 2);
}
