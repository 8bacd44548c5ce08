//! Lockout after repeated failed master password attempts.
//!
//! The state is two values: how many verifications have failed in a row,
//! and when the last one failed.  Whether attempts are currently refused
//! is derived from those and the current time, never stored:
//!
//! ```text
//! Locked  <=>  failed_attempts >= 3  &&  now - last_failure < cooldown(failed_attempts)
//! ```
//!
//! The cooldown is a step function of the failure count, from 30 seconds
//! at the third failure up to a full day from the ninth onward.  Waits are
//! logical: callers compare timestamps, nothing sleeps.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Number of consecutive failures at which the lockout engages.
pub const LOCKOUT_THRESHOLD: u32 = 3;

/// Cooldown that applies after `failed_attempts` consecutive failures.
pub fn cooldown(failed_attempts: u32) -> Duration {
    let secs = match failed_attempts {
        0..=2 => 0,
        3 => 30,
        4 => 60,
        5 => 180,
        6 => 300,
        7 => 1_200,
        8 => 3_600,
        _ => 86_400,
    };
    Duration::from_secs(secs)
}

/// Derived lockout status at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    /// Attempts are allowed.
    Open,
    /// Attempts are refused until `until`.
    Locked { until: DateTime<Utc> },
}

/// Consecutive-failure counter for master password verification.
///
/// Lives for the process only; it is never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockoutState {
    failed_attempts: u32,
    last_failure: Option<DateTime<Utc>>,
}

impl LockoutState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn last_failure(&self) -> Option<DateTime<Utc>> {
        self.last_failure
    }

    /// Record a failed verification at `now`.
    pub fn on_failure(&mut self, now: DateTime<Utc>) {
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        self.last_failure = Some(now);
    }

    /// Record a successful verification.
    pub fn on_success(&mut self) {
        self.failed_attempts = 0;
        self.last_failure = None;
    }

    /// `true` while attempts must be refused.
    pub fn is_blocked(&self, now: DateTime<Utc>) -> bool {
        self.failed_attempts >= LOCKOUT_THRESHOLD && !self.remaining(now).is_zero()
    }

    /// Time left before the next attempt is accepted, floored at zero.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        let Some(last) = self.last_failure else {
            return Duration::ZERO;
        };

        // A clock that went backwards counts as no time elapsed.
        let elapsed = (now - last).to_std().unwrap_or(Duration::ZERO);
        cooldown(self.failed_attempts).saturating_sub(elapsed)
    }

    /// Remaining wait rounded up to whole seconds, for display.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u64 {
        let remaining = self.remaining(now);
        let whole = remaining.as_secs();
        if remaining.subsec_nanos() > 0 {
            whole + 1
        } else {
            whole
        }
    }

    pub fn status(&self, now: DateTime<Utc>) -> LockStatus {
        match self.last_failure {
            Some(last) if self.is_blocked(now) => {
                let wait = chrono::Duration::from_std(cooldown(self.failed_attempts))
                    .unwrap_or_else(|_| chrono::Duration::zero());
                LockStatus::Locked { until: last + wait }
            }
            _ => LockStatus::Open,
        }
    }
}
