//! Types for OTP service results

use serde::{Deserialize, Serialize};

/// Delivery channel for a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtpChannel {
    Email,
    Sms,
}

/// Outcome of a verification attempt, reported as a status rather than an
/// error so callers can show it to the end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyStatus {
    /// Token matched; challenge consumed
    Verified,
    /// Challenge had expired; a fresh token was issued
    Expired,
    /// Wrong-guess limit reached; a fresh token was issued
    MaxAttempts,
    /// Token did not match
    Incorrect,
    /// No live challenge for this user and reason
    Invalid,
    /// The challenge store could not be read
    Error,
}

impl VerifyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyStatus::Verified => "verified",
            VerifyStatus::Expired => "expired",
            VerifyStatus::MaxAttempts => "max_attempts",
            VerifyStatus::Incorrect => "incorrect",
            VerifyStatus::Invalid => "invalid",
            VerifyStatus::Error => "error",
        }
    }
}

/// Result of verifying a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// True only for [`VerifyStatus::Verified`]
    pub success: bool,
    pub status: VerifyStatus,
    /// Wrong guesses left on the current token, when one is still live
    pub remaining_attempts: Option<u32>,
}

impl VerificationOutcome {
    pub fn verified() -> Self {
        Self {
            success: true,
            status: VerifyStatus::Verified,
            remaining_attempts: None,
        }
    }

    pub fn failed(status: VerifyStatus) -> Self {
        Self {
            success: false,
            status,
            remaining_attempts: None,
        }
    }

    pub fn incorrect(remaining_attempts: u32) -> Self {
        Self {
            success: false,
            status: VerifyStatus::Incorrect,
            remaining_attempts: Some(remaining_attempts),
        }
    }
}

/// Result of issuing a challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeOutcome {
    /// A new token was generated and dispatched
    Sent {
        channel: OtpChannel,
        destination: String,
    },
    /// An unexpired token already exists; nothing was sent
    AlreadyActive { destination: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(VerifyStatus::Verified.as_str(), "verified");
        assert_eq!(VerifyStatus::MaxAttempts.as_str(), "max_attempts");
        assert_eq!(VerifyStatus::Error.as_str(), "error");
    }

    #[test]
    fn test_outcome_constructors() {
        assert!(VerificationOutcome::verified().success);
        let incorrect = VerificationOutcome::incorrect(3);
        assert!(!incorrect.success);
        assert_eq!(incorrect.remaining_attempts, Some(3));
        assert!(!VerificationOutcome::failed(VerifyStatus::Invalid).success);
    }
}
