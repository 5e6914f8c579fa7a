//! # Event System
//!
//! Observer registry behind the progress-changed and completed notifications
//! of progress sinks and reusable handles.

pub mod handlers;

pub use handlers::{EventHandler, EventHandlers, SubscriptionId};
