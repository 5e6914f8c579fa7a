use crate::config::AsyncForConfig;
use crate::constants::defaults;
use crate::progress::ReportProgress;
use std::fmt;
use std::sync::Arc;

/// Per-run execution settings
///
/// Defaults: concurrent, no concurrency cap, no external progress sink.
#[derive(Clone)]
pub struct ExecutionOptions {
    /// Run one item at a time, each starting after the previous finished
    pub run_synchronously: bool,
    /// Maximum in-flight items; `<= 0` means unbounded
    pub concurrency_limit: i32,
    pub progress_sink: Option<Arc<dyn ReportProgress>>,
}

impl ExecutionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn synchronous(mut self, run_synchronously: bool) -> Self {
        self.run_synchronously = run_synchronously;
        self
    }

    pub fn with_concurrency_limit(mut self, concurrency_limit: i32) -> Self {
        self.concurrency_limit = concurrency_limit;
        self
    }

    pub fn with_progress_sink(mut self, sink: Arc<dyn ReportProgress>) -> Self {
        self.progress_sink = Some(sink);
        self
    }

    pub fn dispatch_mode(&self) -> DispatchMode {
        if self.run_synchronously {
            DispatchMode::Sequential
        } else if self.concurrency_limit > 0 {
            DispatchMode::Bounded(self.concurrency_limit as usize)
        } else {
            DispatchMode::Unbounded
        }
    }
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            run_synchronously: defaults::RUN_SYNCHRONOUSLY,
            concurrency_limit: defaults::CONCURRENCY_LIMIT,
            progress_sink: None,
        }
    }
}

impl fmt::Debug for ExecutionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionOptions")
            .field("run_synchronously", &self.run_synchronously)
            .field("concurrency_limit", &self.concurrency_limit)
            .field("progress_sink", &self.progress_sink.is_some())
            .finish()
    }
}

impl From<&AsyncForConfig> for ExecutionOptions {
    fn from(config: &AsyncForConfig) -> Self {
        Self {
            run_synchronously: config.run_synchronously,
            concurrency_limit: config.concurrency_limit,
            progress_sink: None,
        }
    }
}

/// How many items may be in flight at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Exactly one item at a time; completion order equals dispatch order
    Sequential,
    /// Sliding window of at most this many items
    Bounded(usize),
    /// Every item started without an artificial cap
    Unbounded,
}

impl DispatchMode {
    pub fn window(&self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Bounded(limit) => *limit,
            Self::Unbounded => usize::MAX,
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Bounded(limit) => write!(f, "bounded({limit})"),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}
