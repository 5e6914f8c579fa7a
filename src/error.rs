//! # Error Types
//!
//! Structured errors for async for/foreach runs. A run either succeeds, is
//! rejected up front (`InvalidArgument`, `ConcurrencyGuardViolation`), or
//! finishes every item and reports one [`AggregateError`] listing each failed
//! item's cause.

use std::any::Any;
use std::fmt;

/// Type-erased failure produced by a work function
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum AsyncForError {
    /// A run parameter is out of range (e.g. a zero stride)
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    /// A run was requested on a handle that is already running one
    #[error("Concurrency guard violation: an operation is already running on this handle")]
    ConcurrencyGuardViolation,

    /// One or more items failed; every item was still processed
    #[error(transparent)]
    Aggregated(#[from] AggregateError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AsyncForError {
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// The aggregated failure, if this error is one
    pub fn as_aggregate(&self) -> Option<&AggregateError> {
        match self {
            Self::Aggregated(aggregate) => Some(aggregate),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AsyncForError>;

/// Multi-cause failure
///
/// The engine raises one of these at the end of a run that had failing items,
/// with one cause per failed item. Work functions may also return one to
/// report several causes for a single item; such a value is kept intact as
/// that item's single entry. A value holding exactly one cause is treated as
/// an incidental wrapper and replaced by its cause when recorded.
#[derive(Debug)]
pub struct AggregateError {
    causes: Vec<BoxError>,
}

impl AggregateError {
    pub fn new(causes: Vec<BoxError>) -> Self {
        Self { causes }
    }

    /// Build from any iterator of errors convertible to [`BoxError`]
    pub fn from_errors<I, E>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<BoxError>,
    {
        Self::new(errors.into_iter().map(Into::into).collect())
    }

    pub fn causes(&self) -> &[BoxError] {
        &self.causes
    }

    pub fn into_causes(self) -> Vec<BoxError> {
        self.causes
    }

    pub fn len(&self) -> usize {
        self.causes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "One or more errors occurred ({} causes)", self.causes.len())?;
        for cause in &self.causes {
            write!(f, "; {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes
            .first()
            .map(|cause| cause.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// A work function panicked while its item was being processed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Work item panicked: {message}")]
pub struct ItemPanic {
    pub message: String,
}

impl ItemPanic {
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        Self { message }
    }
}
