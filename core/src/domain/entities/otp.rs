//! OTP challenge entity and its state machine.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the numeric token
pub const TOKEN_LENGTH: usize = 6;

/// Default wrong guesses allowed against one token
pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 4;

/// Default seconds before an issued token expires
pub const DEFAULT_EXPIRY_SECONDS: i64 = 120;

/// Why an OTP challenge was issued. A subject can hold one live challenge
/// per reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtpReason {
    EmailActivation,
    PhoneActivation,
    Login,
    ForgetPassword,
}

impl OtpReason {
    /// Whether a successful verification for this reason activates the
    /// account
    pub fn is_activation(&self) -> bool {
        matches!(self, OtpReason::EmailActivation | OtpReason::PhoneActivation)
    }
}

/// Lifecycle state of an OTP record. `Expired` and `Consumed` are
/// terminal; a fresh challenge always creates a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtpState {
    Active,
    Expired,
    Consumed,
}

/// One OTP challenge for a (subject, reason) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// The user this challenge belongs to
    pub subject: Uuid,

    /// Purpose of the challenge
    pub reason: OtpReason,

    /// Fixed-width numeric token
    pub token: String,

    /// Lifecycle state
    pub state: OtpState,

    /// Wrong guesses made against this token
    pub failed_attempts: u32,

    /// When the token was last dispatched; expiry is measured from here
    pub last_sent_at: DateTime<Utc>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a new active challenge with a freshly generated token
    pub fn new(subject: Uuid, reason: OtpReason) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            subject,
            reason,
            token: Self::generate_token(),
            state: OtpState::Active,
            failed_attempts: 0,
            last_sent_at: now,
            created_at: now,
        }
    }

    /// Generates a fixed-width numeric token from the OS CSPRNG
    pub fn generate_token() -> String {
        let mut rng = OsRng;
        let mut bytes = [0u8; 4];
        rng.fill_bytes(&mut bytes);
        let num = u32::from_le_bytes(bytes) % 1_000_000;
        format!("{:06}", num)
    }

    /// Whether the expiry window has elapsed since the token was sent
    pub fn is_expired(&self, expiry: Duration) -> bool {
        Utc::now() - self.last_sent_at > expiry
    }

    /// Whether the record can still accept verification attempts
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, OtpState::Expired | OtpState::Consumed)
    }

    /// Constant-time token comparison
    pub fn matches(&self, entered: &str) -> bool {
        entered.len() == self.token.len()
            && constant_time_eq(entered.as_bytes(), self.token.as_bytes())
    }

    /// Transition to `Expired`
    pub fn expire(&mut self) {
        self.state = OtpState::Expired;
    }

    /// Transition to `Consumed`
    pub fn consume(&mut self) {
        self.state = OtpState::Consumed;
    }

    /// Records a wrong guess
    pub fn register_failure(&mut self) {
        self.failed_attempts += 1;
    }

    /// Wrong guesses left before the limit, given a configured maximum
    pub fn remaining_attempts(&self, max_failed_attempts: u32) -> u32 {
        max_failed_attempts.saturating_sub(self.failed_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_record_is_active() {
        let record = OtpRecord::new(Uuid::new_v4(), OtpReason::Login);
        assert_eq!(record.state, OtpState::Active);
        assert_eq!(record.failed_attempts, 0);
        assert!(!record.is_terminal());
        assert_eq!(record.token.len(), TOKEN_LENGTH);
    }

    #[test]
    fn test_token_format() {
        for _ in 0..100 {
            let token = OtpRecord::generate_token();
            assert_eq!(token.len(), TOKEN_LENGTH);
            assert!(token.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_token_uniqueness() {
        let tokens: HashSet<String> = (0..100).map(|_| OtpRecord::generate_token()).collect();
        assert!(tokens.len() > 1);
    }

    #[test]
    fn test_expiry_window() {
        let mut record = OtpRecord::new(Uuid::new_v4(), OtpReason::Login);
        assert!(!record.is_expired(Duration::seconds(DEFAULT_EXPIRY_SECONDS)));

        record.last_sent_at = Utc::now() - Duration::seconds(DEFAULT_EXPIRY_SECONDS + 1);
        assert!(record.is_expired(Duration::seconds(DEFAULT_EXPIRY_SECONDS)));
    }

    #[test]
    fn test_matches_is_exact() {
        let record = OtpRecord::new(Uuid::new_v4(), OtpReason::Login);
        assert!(record.matches(&record.token));
        assert!(!record.matches("0000000"));
        assert!(!record.matches(""));
    }

    #[test]
    fn test_terminal_states() {
        let mut consumed = OtpRecord::new(Uuid::new_v4(), OtpReason::EmailActivation);
        consumed.consume();
        assert_eq!(consumed.state, OtpState::Consumed);
        assert!(consumed.is_terminal());

        let mut expired = OtpRecord::new(Uuid::new_v4(), OtpReason::EmailActivation);
        expired.expire();
        assert_eq!(expired.state, OtpState::Expired);
        assert!(expired.is_terminal());
    }

    #[test]
    fn test_failure_counting() {
        let mut record = OtpRecord::new(Uuid::new_v4(), OtpReason::ForgetPassword);
        record.register_failure();
        record.register_failure();
        assert_eq!(record.failed_attempts, 2);
        assert_eq!(record.remaining_attempts(DEFAULT_MAX_FAILED_ATTEMPTS), 2);

        record.register_failure();
        record.register_failure();
        record.register_failure();
        assert_eq!(record.remaining_attempts(DEFAULT_MAX_FAILED_ATTEMPTS), 0);
    }

    #[test]
    fn test_activation_reasons() {
        assert!(OtpReason::EmailActivation.is_activation());
        assert!(OtpReason::PhoneActivation.is_activation());
        assert!(!OtpReason::Login.is_activation());
        assert!(!OtpReason::ForgetPassword.is_activation());
    }
}
