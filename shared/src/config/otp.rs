//! OTP threshold and expiry configuration

use serde::{Deserialize, Serialize};

/// Thresholds governing the OTP challenge lifecycle and the session-level
/// lockout tier. The two counters are deliberately distinct: wrong guesses
/// against a single token are bounded by `max_failed_attempts`, while
/// verification POSTs from one session are bounded by
/// `max_verify_requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpConfig {
    /// Seconds before an issued token expires
    #[serde(default = "default_expiry_seconds")]
    pub expiry_seconds: i64,

    /// Wrong guesses allowed against one token before it is expired
    /// and replaced
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: u32,

    /// Verification requests one session may make before a timed lockout
    #[serde(default = "default_max_verify_requests")]
    pub max_verify_requests: u32,

    /// Minutes a session lockout lasts
    #[serde(default = "default_lockout_minutes")]
    pub lockout_duration_minutes: i64,

    /// Lockout count at which the account is blocked
    #[serde(default = "default_block_threshold")]
    pub block_threshold: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiry_seconds: default_expiry_seconds(),
            max_failed_attempts: default_max_failed_attempts(),
            max_verify_requests: default_max_verify_requests(),
            lockout_duration_minutes: default_lockout_minutes(),
            block_threshold: default_block_threshold(),
        }
    }
}

impl OtpConfig {
    /// Load from environment variables, falling back to defaults for any
    /// that are unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            expiry_seconds: env_parse("OTP_EXPIRY_SECONDS", default_expiry_seconds()),
            max_failed_attempts: env_parse(
                "OTP_MAX_FAILED_ATTEMPTS",
                default_max_failed_attempts(),
            ),
            max_verify_requests: env_parse("OTP_MAX_VERIFY_REQUESTS", default_max_verify_requests()),
            lockout_duration_minutes: env_parse(
                "OTP_LOCKOUT_DURATION_MINUTES",
                default_lockout_minutes(),
            ),
            block_threshold: env_parse("OTP_BLOCK_COUNT", default_block_threshold()),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_expiry_seconds() -> i64 {
    120
}

fn default_max_failed_attempts() -> u32 {
    4
}

fn default_max_verify_requests() -> u32 {
    6
}

fn default_lockout_minutes() -> i64 {
    2
}

fn default_block_threshold() -> u32 {
    1
}
