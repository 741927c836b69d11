//! Per-session request counting for the verification endpoint.
//!
//! This tier is independent of the wrong-guess counter on an individual
//! token: it caps how often a session may hit the verification endpoint
//! at all, locking the session out for a fixed period and escalating to
//! an account block once the lockout count reaches a threshold.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::config::OtpServiceConfig;

/// What the session may do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutDecision {
    /// Under the limit; handle the request
    Proceed,
    /// Over the limit; reject until the lockout lapses
    LockedOut { seconds_remaining: i64 },
    /// Lockouts reached the block threshold; block the account
    Blocked,
}

/// Mutable per-session lockout state, carried by the caller between
/// verification requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLockout {
    /// Requests made since the last lockout ended
    pub attempt_count: u32,
    /// Lockouts incurred so far in this session
    pub block_count: u32,
    /// Start of the current lockout, if one is running
    pub locked_at: Option<DateTime<Utc>>,
}

impl SessionLockout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one verification request and decides whether it may
    /// proceed. A `Blocked` decision is final; the caller must block the
    /// account.
    pub fn register_request(&mut self, config: &OtpServiceConfig) -> LockoutDecision {
        let now = Utc::now();
        let lockout = Duration::minutes(config.lockout_duration_minutes);

        if let Some(locked_at) = self.locked_at {
            let elapsed = now - locked_at;
            if elapsed < lockout {
                let seconds_remaining = (lockout - elapsed).num_seconds().max(1);
                return LockoutDecision::LockedOut { seconds_remaining };
            }
            // lockout lapsed; the counter starts over
            self.locked_at = None;
            self.attempt_count = 0;
        }

        self.attempt_count += 1;
        if self.attempt_count >= config.max_verify_requests {
            self.block_count += 1;
            if self.block_count >= config.block_threshold {
                return LockoutDecision::Blocked;
            }
            self.locked_at = Some(now);
            self.attempt_count = 0;
            return LockoutDecision::LockedOut {
                seconds_remaining: lockout.num_seconds(),
            };
        }

        LockoutDecision::Proceed
    }
}
