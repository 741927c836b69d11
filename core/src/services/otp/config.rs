//! Configuration for the OTP verification service

use authkit_shared::config::OtpConfig;

use crate::domain::entities::otp::{DEFAULT_EXPIRY_SECONDS, DEFAULT_MAX_FAILED_ATTEMPTS};

/// Configuration for the OTP verification service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Seconds a token stays valid after being sent
    pub expiry_seconds: i64,
    /// Wrong guesses allowed against one token before it is retired
    pub max_failed_attempts: u32,
    /// Verification requests allowed in a session before a lockout
    pub max_verify_requests: u32,
    /// Minutes a session lockout lasts
    pub lockout_duration_minutes: i64,
    /// Lockout count at which the account is blocked
    pub block_threshold: u32,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            expiry_seconds: DEFAULT_EXPIRY_SECONDS,
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            max_verify_requests: 6,
            lockout_duration_minutes: 2,
            block_threshold: 1,
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            expiry_seconds: config.expiry_seconds,
            max_failed_attempts: config.max_failed_attempts,
            max_verify_requests: config.max_verify_requests,
            lockout_duration_minutes: config.lockout_duration_minutes,
            block_threshold: config.block_threshold,
        }
    }
}
