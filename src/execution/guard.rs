use crate::error::{AsyncForError, Result};
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::{debug, warn};

/// Lifecycle of a reusable handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardState {
    Idle = 0,
    Running = 1,
}

impl From<u8> for GuardState {
    fn from(value: u8) -> Self {
        match value {
            0 => GuardState::Idle,
            _ => GuardState::Running,
        }
    }
}

/// Single-flight guard: `Idle -> Running -> Idle`
///
/// [`try_acquire`](Self::try_acquire) hands out a lease that returns the
/// guard to `Idle` when dropped, so success, aggregated failure, panics and a
/// dropped run future all release it.
#[derive(Debug)]
pub struct ReentrancyGuard {
    state: AtomicU8,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(GuardState::Idle as u8),
        }
    }

    pub fn state(&self) -> GuardState {
        GuardState::from(self.state.load(Ordering::Acquire))
    }

    pub fn is_running(&self) -> bool {
        self.state() == GuardState::Running
    }

    pub fn try_acquire(&self) -> Result<GuardLease<'_>> {
        match self.state.compare_exchange(
            GuardState::Idle as u8,
            GuardState::Running as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                debug!("🔒 Reentrancy guard acquired");
                Ok(GuardLease { guard: self })
            }
            Err(_) => {
                warn!("🚫 Run rejected - handle already running");
                Err(AsyncForError::ConcurrencyGuardViolation)
            }
        }
    }
}

impl Default for ReentrancyGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that the guard is `Running`; dropping it returns the guard to `Idle`
#[derive(Debug)]
pub struct GuardLease<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for GuardLease<'_> {
    fn drop(&mut self) {
        self.guard
            .state
            .store(GuardState::Idle as u8, Ordering::Release);
        debug!("🔓 Reentrancy guard released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected() {
        let guard = ReentrancyGuard::new();
        assert_eq!(guard.state(), GuardState::Idle);

        let lease = guard.try_acquire().unwrap();
        assert!(guard.is_running());
        assert!(matches!(
            guard.try_acquire(),
            Err(AsyncForError::ConcurrencyGuardViolation)
        ));

        drop(lease);
        assert_eq!(guard.state(), GuardState::Idle);
        assert!(guard.try_acquire().is_ok());
    }

    #[test]
    fn test_lease_released_on_unwind() {
        let guard = ReentrancyGuard::new();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _lease = guard.try_acquire().unwrap();
            panic!("work aborted");
        }));

        assert!(result.is_err());
        assert_eq!(guard.state(), GuardState::Idle);
    }
}
