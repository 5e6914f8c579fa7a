use proptest::prelude::*;

/// Strategy for range bounds small enough to enumerate naively
pub fn bounds_strategy() -> impl Strategy<Value = (i64, i64)> {
    (-500i64..500, -500i64..500)
}

/// Strategy for non-zero strides in either direction
pub fn stride_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![-40i64..=-1, 1i64..=40]
}

/// Strategy for concurrency limits, including the unbounded `<= 0` values
pub fn concurrency_limit_strategy() -> impl Strategy<Value = i32> {
    -2i32..=16
}

/// Values a stepped range should produce, computed with a plain loop
pub fn naive_range(start: i64, end: i64, stride: i64) -> Vec<i64> {
    let mut values = Vec::new();
    let mut i = start;
    if stride > 0 {
        while i < end {
            values.push(i);
            i += stride;
        }
    } else {
        while i > end {
            values.push(i);
            i += stride;
        }
    }
    values
}
