use super::report::{ProgressReport, ReportProgress};
use crate::events::{EventHandlers, SubscriptionId};
use parking_lot::RwLock;

#[derive(Debug, Clone, Default)]
struct TokenState {
    progress: f32,
    message: String,
    is_indeterminate: bool,
    is_completed: bool,
}

/// Stand-alone progress sink
///
/// Relays progress from a run to any number of subscribers when the caller has
/// no [`AsyncFor`](crate::AsyncFor) handle of its own. Pass it to a run through
/// [`ExecutionOptions::with_progress_sink`](crate::ExecutionOptions::with_progress_sink).
///
/// ```rust
/// use std::sync::Arc;
/// use tasker_async_for::{for_range_with, ExecutionOptions, ProgressReportToken, StepRange};
///
/// # async fn example() -> tasker_async_for::Result<()> {
/// let token = Arc::new(ProgressReportToken::new());
/// token.on_progress_changed(|report| println!("Progress: {:.0}%", report.progress * 100.0));
/// token.on_completed(|| println!("Completed!"));
///
/// let options = ExecutionOptions::new().with_progress_sink(token.clone());
/// for_range_with(StepRange::new(0, 10), options, |i| async move {
///     println!("{i}");
///     Ok::<(), std::io::Error>(())
/// })
/// .await?;
///
/// assert!(token.is_completed());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ProgressReportToken {
    state: RwLock<TokenState>,
    progress_changed: EventHandlers<ProgressReport>,
    completed: EventHandlers<()>,
}

impl ProgressReportToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> f32 {
        self.state.read().progress
    }

    /// Values outside `[0, 1]` are clamped
    pub fn set_progress(&self, progress: f32) {
        self.state.write().progress = progress.clamp(0.0, 1.0);
        self.raise_progress_changed();
    }

    pub fn message(&self) -> String {
        self.state.read().message.clone()
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.state.write().message = message.into();
        self.raise_progress_changed();
    }

    pub fn is_indeterminate(&self) -> bool {
        self.state.read().is_indeterminate
    }

    pub fn set_indeterminate(&self, is_indeterminate: bool) {
        self.state.write().is_indeterminate = is_indeterminate;
        self.raise_progress_changed();
    }

    pub fn is_completed(&self) -> bool {
        self.state.read().is_completed
    }

    pub fn set_completed(&self, is_completed: bool) {
        let newly_completed = {
            let mut state = self.state.write();
            let was_completed = state.is_completed;
            state.is_completed = is_completed;
            if is_completed {
                state.progress = 1.0;
            }
            is_completed && !was_completed
        };

        if newly_completed {
            self.completed.raise(&());
        }
    }

    pub fn restart(&self) {
        let mut state = self.state.write();
        state.progress = 0.0;
        state.is_indeterminate = false;
        state.is_completed = false;
    }

    pub fn snapshot(&self) -> ProgressReport {
        let state = self.state.read();
        ProgressReport {
            progress: state.progress,
            message: state.message.clone(),
            is_indeterminate: state.is_indeterminate,
        }
    }

    pub fn on_progress_changed<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&ProgressReport) + Send + Sync + 'static,
    {
        self.progress_changed.add(handler)
    }

    pub fn remove_progress_changed(&self, id: SubscriptionId) -> bool {
        self.progress_changed.remove(id)
    }

    pub fn on_completed<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.completed.add(move |_| handler())
    }

    pub fn remove_completed(&self, id: SubscriptionId) -> bool {
        self.completed.remove(id)
    }

    fn raise_progress_changed(&self) {
        // Snapshot first: handlers may read this token
        let report = self.snapshot();
        self.progress_changed.raise(&report);
    }
}

impl ReportProgress for ProgressReportToken {
    fn progress(&self) -> f32 {
        ProgressReportToken::progress(self)
    }

    fn set_progress(&self, progress: f32) {
        ProgressReportToken::set_progress(self, progress);
    }

    fn message(&self) -> String {
        ProgressReportToken::message(self)
    }

    fn set_message(&self, message: String) {
        ProgressReportToken::set_message(self, message);
    }

    fn is_indeterminate(&self) -> bool {
        ProgressReportToken::is_indeterminate(self)
    }

    fn set_indeterminate(&self, is_indeterminate: bool) {
        ProgressReportToken::set_indeterminate(self, is_indeterminate);
    }

    fn is_completed(&self) -> bool {
        ProgressReportToken::is_completed(self)
    }

    fn set_completed(&self, is_completed: bool) {
        ProgressReportToken::set_completed(self, is_completed);
    }

    fn restart(&self) {
        ProgressReportToken::restart(self);
    }

    fn snapshot(&self) -> ProgressReport {
        ProgressReportToken::snapshot(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_setters_raise_progress_changed() {
        let token = ProgressReportToken::new();
        let reports = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&reports);
        token.on_progress_changed(move |report| sink.lock().push(report.clone()));

        token.set_message("Loading");
        token.set_progress(0.5);
        token.set_indeterminate(true);

        let reports = reports.lock();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[1].progress, 0.5);
        assert_eq!(reports[1].message, "Loading");
        assert!(reports[2].is_indeterminate);
    }

    #[test]
    fn test_completion_pins_progress_and_fires_once() {
        let token = ProgressReportToken::new();
        let completions = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&completions);
        token.on_completed(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        token.set_progress(0.25);
        token.set_completed(true);
        token.set_completed(true);

        assert_eq!(token.progress(), 1.0);
        assert!(token.is_completed());
        assert_eq!(completions.load(Ordering::SeqCst), 1);

        token.set_completed(false);
        token.set_completed(true);
        assert_eq!(completions.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_progress_is_clamped() {
        let token = ProgressReportToken::new();
        token.set_progress(1.5);
        assert_eq!(token.progress(), 1.0);
        token.set_progress(-0.5);
        assert_eq!(token.progress(), 0.0);
    }

    #[test]
    fn test_restart_is_silent_and_keeps_message() {
        let token = ProgressReportToken::new();
        token.set_message("Indexing");
        token.set_completed(true);

        let notified = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notified);
        token.on_progress_changed(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        token.restart();

        assert_eq!(notified.load(Ordering::SeqCst), 0);
        assert_eq!(token.progress(), 0.0);
        assert!(!token.is_completed());
        assert_eq!(token.message(), "Indexing");
    }
}
