//! Single-flight request guard
//!
//! At most one guarded operation runs per guard; overlapping callers are
//! rejected with [`ClientError::ConcurrentRequest`], never queued.

use crate::utils::error::{ClientError, ClientResult};
use std::sync::atomic::{AtomicBool, Ordering};

/// Observable guard state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightState {
    Idle,
    Busy,
}

/// Busy flag owned by one client
#[derive(Debug, Default)]
pub struct FlightGuard {
    busy: AtomicBool,
}

impl FlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `Idle -> Busy`, or fail if already busy
    ///
    /// The returned permit moves the guard back to `Idle` when dropped,
    /// including when the owning future is dropped mid-request.
    pub fn try_acquire(&self) -> ClientResult<FlightPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| FlightPermit { guard: self })
            .map_err(|_| ClientError::ConcurrentRequest)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn state(&self) -> FlightState {
        if self.is_busy() {
            FlightState::Busy
        } else {
            FlightState::Idle
        }
    }
}

/// Proof of holding the guard
#[derive(Debug)]
#[must_use = "the guard is released as soon as the permit is dropped"]
pub struct FlightPermit<'a> {
    guard: &'a FlightGuard,
}

impl Drop for FlightPermit<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_rejected() {
        let guard = FlightGuard::new();
        assert_eq!(guard.state(), FlightState::Idle);

        let permit = guard.try_acquire().unwrap();
        assert_eq!(guard.state(), FlightState::Busy);
        assert!(matches!(guard.try_acquire(), Err(ClientError::ConcurrentRequest)));

        drop(permit);
        assert_eq!(guard.state(), FlightState::Idle);
        assert!(guard.try_acquire().is_ok());
    }

    #[test]
    fn test_released_on_error_path() {
        fn failing(guard: &FlightGuard) -> ClientResult<()> {
            let _permit = guard.try_acquire()?;
            Err(ClientError::MalformedResponse)
        }

        let guard = FlightGuard::new();
        assert!(failing(&guard).is_err());
        assert!(!guard.is_busy());
    }

    #[test]
    fn test_only_one_thread_wins() {
        use std::sync::{Arc, Barrier};

        let guard = Arc::new(FlightGuard::new());
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let guard = Arc::clone(&guard);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    let permit = guard.try_acquire();
                    let won = permit.is_ok();
                    // hold any permit until every thread has tried
                    barrier.wait();
                    won
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
        assert!(!guard.is_busy());
    }
}
