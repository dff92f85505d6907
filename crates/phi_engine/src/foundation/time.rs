//! Time management utilities
//!
//! The simulation never reads a wall clock: the host supplies the elapsed time
//! for each tick, and everything here only accumulates or decrements it.

/// Countdown timer driven by caller-supplied tick lengths.
///
/// A countdown is "running" while its remaining time is strictly positive.
/// [`Countdown::tick`] reports the single tick on which it crosses zero, so
/// one-shot effects (re-arming an ability, clearing invincibility) fire exactly
/// once.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// A countdown that is not running
    pub const fn idle() -> Self {
        Self { remaining: 0.0 }
    }

    /// Create a countdown already running for `seconds`
    pub fn started(seconds: f32) -> Self {
        let mut countdown = Self::idle();
        countdown.start(seconds);
        countdown
    }

    /// (Re)start the countdown, replacing any remaining time
    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    /// Stop the countdown without firing its expiry
    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    /// Decrement by `delta_time`.
    ///
    /// Returns `true` only on the tick where the countdown goes from running
    /// to expired.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= delta_time;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            true
        } else {
            false
        }
    }

    /// Whether time remains
    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    /// Remaining time in seconds (never negative)
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Remaining fraction of `total` in [0, 1]; 0 means ready.
    pub fn ratio(&self, total: f32) -> f32 {
        if total <= 0.0 {
            return 0.0;
        }
        (self.remaining / total).clamp(0.0, 1.0)
    }
}

/// Accumulated simulation time
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    total_time: f32,
}

impl SimClock {
    /// Create a clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tick of `delta_time` seconds
    pub fn advance(&mut self, delta_time: f32) {
        self.total_time += delta_time;
    }

    /// Total elapsed simulation time
    pub fn total_time(&self) -> f32 {
        self.total_time
    }
}
