//! # Work-Item Generation
//!
//! Produces the ordered, finite item sequence a run dispatches: stepped
//! integer indices for range runs, or the elements of a collection. Both
//! generators know their length before the first item is produced so the
//! progress total can be fixed at run start.

use crate::constants::defaults;
use crate::error::{AsyncForError, Result};
use std::iter::{Enumerate, FusedIterator};

/// One unit of input handed to the work function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem<T> {
    /// 0-based position in dispatch order
    pub ordinal: usize,
    pub value: T,
}

/// Integer range `start..end` visited in steps of `stride`
///
/// A positive stride visits `start, start + stride, ...` while the index is
/// below `end`; a negative stride visits downward while the index is above
/// `end`. `end` is never visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepRange {
    pub start: i64,
    pub end: i64,
    pub stride: i64,
}

impl StepRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            stride: defaults::STRIDE,
        }
    }

    pub fn with_stride(mut self, stride: i64) -> Self {
        self.stride = stride;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(AsyncForError::invalid_argument(
                "stride",
                "stride must not be zero",
            ));
        }
        Ok(())
    }

    /// Number of indices the range visits
    pub fn item_count(&self) -> Result<usize> {
        self.validate()?;

        let (start, end, stride) = (self.start as i128, self.end as i128, self.stride as i128);
        let span = if stride > 0 { end - start } else { start - end };
        if span <= 0 {
            return Ok(0);
        }

        let step = stride.abs();
        let count = (span + step - 1) / step;
        Ok(usize::try_from(count).unwrap_or(usize::MAX))
    }

    /// Fails with `InvalidArgument` for a zero stride
    pub fn into_items(self) -> Result<RangeItems> {
        let len = self.item_count()?;
        Ok(RangeItems {
            range: self,
            next_ordinal: 0,
            len,
        })
    }
}

/// Iterator over the indices of a [`StepRange`]
#[derive(Debug, Clone)]
pub struct RangeItems {
    range: StepRange,
    next_ordinal: usize,
    len: usize,
}

impl Iterator for RangeItems {
    type Item = WorkItem<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_ordinal >= self.len {
            return None;
        }

        let ordinal = self.next_ordinal;
        // Every visited index lies between start and end, so it fits in i64
        let value = self.range.start as i128 + ordinal as i128 * self.range.stride as i128;
        self.next_ordinal += 1;

        Some(WorkItem {
            ordinal,
            value: value as i64,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next_ordinal;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RangeItems {}

impl FusedIterator for RangeItems {}

/// Elements of a materialized collection paired with their ordinal
#[derive(Debug)]
pub struct CollectionItems<T> {
    inner: Enumerate<std::vec::IntoIter<T>>,
}

impl<T> CollectionItems<T> {
    /// Materializes the collection so its length is known up front
    pub fn new<I>(collection: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = collection.into_iter().collect();
        Self {
            inner: items.into_iter().enumerate(),
        }
    }
}

impl<T> Iterator for CollectionItems<T> {
    type Item = WorkItem<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(ordinal, value)| WorkItem { ordinal, value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for CollectionItems<T> {}

impl<T> FusedIterator for CollectionItems<T> {}
