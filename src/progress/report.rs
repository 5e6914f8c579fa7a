/// Snapshot carried by every progress-changed notification
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    /// Fraction of finished work in `[0, 1]`
    pub progress: f32,
    /// User-facing description of what the operation is doing
    pub message: String,
    /// Whether progress can be meaningfully determined
    pub is_indeterminate: bool,
}

/// Something that can receive progress from an async run
///
/// Implemented by [`ProgressReportToken`](super::ProgressReportToken) and by
/// the reusable [`AsyncFor`](crate::AsyncFor) handle. Setters of `progress`,
/// `message` and `is_indeterminate` raise one progress-changed notification
/// each; `set_completed(true)` pins progress to `1.0` and raises the completed
/// notification when the value flips from `false`.
pub trait ReportProgress: Send + Sync {
    fn progress(&self) -> f32;
    fn set_progress(&self, progress: f32);

    fn message(&self) -> String;
    fn set_message(&self, message: String);

    fn is_indeterminate(&self) -> bool;
    fn set_indeterminate(&self, is_indeterminate: bool);

    fn is_completed(&self) -> bool;
    fn set_completed(&self, is_completed: bool);

    /// Clear progress, indeterminate and completion state for a new run
    /// without raising notifications. The message is kept.
    fn restart(&self);

    fn snapshot(&self) -> ProgressReport {
        ProgressReport {
            progress: self.progress(),
            message: self.message(),
            is_indeterminate: self.is_indeterminate(),
        }
    }
}
