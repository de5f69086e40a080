//! Start-rate limiter for AWS calls
//!
//! Admits at most N operation starts per second by handing out admission
//! slots spaced `1/N` seconds apart. Slots are reserved synchronously, so
//! admission order is submission order. The limiter does not bound how many
//! admitted operations are in flight at once.

use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Shared admission gate.
///
/// Cloning yields another handle to the same schedule, so every clone counts
/// against one global rate.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    interval: Duration,
    next_slot: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Limiter admitting at most `max_per_second` starts per second
    pub fn per_second(max_per_second: NonZeroU32) -> Self {
        Self {
            interval: Duration::from_secs(1) / max_per_second.get(),
            next_slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Reserve the next admission slot.
    ///
    /// Returns immediately with the instant at which the caller may start.
    /// Slots are fixed at reservation time: a caller that wakes late does not
    /// push later slots back, so under scheduler delay two consecutive starts
    /// can land closer than `1/N` apart in wall-clock time. The schedule
    /// itself never exceeds N slots per second.
    pub fn reserve(&self) -> Instant {
        let now = Instant::now();
        let mut next = self
            .next_slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let slot = match *next {
            Some(pending) if pending > now => pending,
            _ => now,
        };
        *next = Some(slot + self.interval);
        slot
    }
}
