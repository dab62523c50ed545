//! Readout rate limiting
//!
//! Pointer devices report at 100-1000 Hz. A human-readable readout does
//! not need to change faster than it can be read, so display updates pass
//! through a [`RateLimiter`] while the draw path never waits on it.

use serde::Serialize;
use std::time::{Duration, Instant};

/// Default readout rate: one update every 100 ms.
pub const DEFAULT_RATE_HZ: u32 = 10;

/// Slot gate: at most one granted slot per `1 / rate_hz` seconds.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    rate_hz: u32,
    period: Duration,
    /// Earliest instant the next slot may be granted.
    next_slot: Option<Instant>,
    granted: u64,
    refused: u64,
}

impl RateLimiter {
    /// A rate of 0 is treated as 1 Hz.
    pub fn new(rate_hz: u32) -> Self {
        let rate_hz = rate_hz.max(1);
        Self {
            rate_hz,
            period: Duration::from_secs(1) / rate_hz,
            next_slot: None,
            granted: 0,
            refused: 0,
        }
    }

    pub fn rate_hz(&self) -> u32 {
        self.rate_hz
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Claim the slot if one is free now.
    pub fn should_process(&mut self) -> bool {
        self.should_process_at(Instant::now())
    }

    /// [`RateLimiter::should_process`] against an explicit clock reading.
    pub fn should_process_at(&mut self, now: Instant) -> bool {
        match self.next_slot {
            Some(next) if now < next => {
                self.refused = self.refused.saturating_add(1);
                false
            }
            _ => {
                self.next_slot = now.checked_add(self.period);
                self.granted = self.granted.saturating_add(1);
                true
            }
        }
    }

    /// Zero when a slot is free now.
    pub fn time_until_slot(&self) -> Duration {
        self.next_slot
            .map(|next| next.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::ZERO)
    }

    pub fn granted(&self) -> u64 {
        self.granted
    }

    pub fn refused(&self) -> u64 {
        self.refused
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_HZ)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimiterStats {
    pub rate_hz: u32,
    pub granted: u64,
    pub refused: u64,
}

impl From<&RateLimiter> for RateLimiterStats {
    fn from(limiter: &RateLimiter) -> Self {
        Self {
            rate_hz: limiter.rate_hz,
            granted: limiter.granted,
            refused: limiter.refused,
        }
    }
}
