use super::report::ReportProgress;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use tracing::warn;

/// Per-run progress accounting
///
/// Counts finished items against a total fixed at run start and writes the
/// resulting fraction to every target. The reported fraction never regresses:
/// non-negative `f32` values order the same as their bit patterns, so the
/// high-water mark is kept with a single `fetch_max`.
pub struct ProgressTracker<'a> {
    total: usize,
    completed: AtomicUsize,
    high_water: AtomicU32,
    finished: AtomicBool,
    targets: Vec<&'a dyn ReportProgress>,
}

impl<'a> ProgressTracker<'a> {
    /// Start tracking a run of `total` items; targets are restarted silently
    pub fn start(total: usize, targets: Vec<&'a dyn ReportProgress>) -> Self {
        for target in &targets {
            target.restart();
        }

        Self {
            total,
            completed: AtomicUsize::new(0),
            high_water: AtomicU32::new(0.0_f32.to_bits()),
            finished: AtomicBool::new(false),
            targets,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Current fraction; `1.0` once finished, `0.0` for an empty unfinished run
    pub fn fraction(&self) -> f32 {
        if self.is_finished() {
            1.0
        } else {
            fraction_of(self.completed(), self.total)
        }
    }

    /// Record one finished item, successful or not
    pub fn report(&self) {
        if self.is_finished() {
            warn!(total = self.total, "Progress reported after run completion - ignoring");
            return;
        }

        let done = match self
            .completed
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |done| {
                (done < self.total).then_some(done + 1)
            }) {
            Ok(previous) => previous + 1,
            Err(done) => {
                warn!(total = self.total, completed = done, "Progress reported past total - ignoring");
                return;
            }
        };

        let fraction = fraction_of(done, self.total);
        let previous = f32::from_bits(self.high_water.fetch_max(fraction.to_bits(), Ordering::AcqRel));
        let progress = fraction.max(previous);

        for target in &self.targets {
            target.set_progress(progress);
        }
    }

    /// Mark the run completed; only the first call has any effect
    pub fn finish(&self) {
        if self.finished.swap(true, Ordering::AcqRel) {
            return;
        }

        self.high_water.store(1.0_f32.to_bits(), Ordering::Release);
        for target in &self.targets {
            target.set_completed(true);
        }
    }
}

fn fraction_of(done: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (done as f64 / total as f64).clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressReportToken;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_report_advances_fraction() {
        let token = ProgressReportToken::new();
        let tracker = ProgressTracker::start(4, vec![&token as &dyn ReportProgress]);

        tracker.report();
        assert_eq!(token.progress(), 0.25);
        tracker.report();
        tracker.report();
        assert_eq!(token.progress(), 0.75);
        assert!(!token.is_completed());

        tracker.report();
        assert_eq!(tracker.completed(), tracker.total());
        assert_eq!(token.progress(), 1.0);

        tracker.finish();
        assert!(token.is_completed());
    }

    #[test]
    fn test_completed_never_exceeds_total() {
        let token = ProgressReportToken::new();
        let tracker = ProgressTracker::start(1, vec![&token as &dyn ReportProgress]);

        tracker.report();
        tracker.report();

        assert_eq!(tracker.completed(), 1);
        assert_eq!(tracker.fraction(), 1.0);
    }

    #[test]
    fn test_empty_run_finishes_at_one() {
        let token = ProgressReportToken::new();
        let tracker = ProgressTracker::start(0, vec![&token as &dyn ReportProgress]);
        assert_eq!(tracker.fraction(), 0.0);

        tracker.finish();

        assert_eq!(tracker.fraction(), 1.0);
        assert_eq!(token.progress(), 1.0);
        assert!(token.is_completed());
    }

    #[test]
    fn test_start_restarts_targets_and_finish_is_single_shot() {
        let token = ProgressReportToken::new();
        token.set_completed(true);

        let completions = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&completions);
        token.on_completed(move || *counter.lock() += 1);

        let tracker = ProgressTracker::start(2, vec![&token as &dyn ReportProgress]);
        assert!(!token.is_completed());
        assert_eq!(token.progress(), 0.0);

        tracker.report();
        tracker.report();
        tracker.finish();
        tracker.finish();
        tracker.report();

        assert_eq!(*completions.lock(), 1);
        assert_eq!(tracker.completed(), 2);
    }

    #[test]
    fn test_fans_out_to_every_target() {
        let first = ProgressReportToken::new();
        let second = ProgressReportToken::new();
        let tracker = ProgressTracker::start(2, vec![&first as &dyn ReportProgress, &second]);

        tracker.report();

        assert_eq!(first.progress(), 0.5);
        assert_eq!(second.progress(), 0.5);
    }
}
