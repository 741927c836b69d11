//! OTP verification module
//!
//! Covers the full one-time-token workflow: challenge issuing and
//! delivery, verification with per-token guess limits, per-session
//! request lockouts with block escalation, and automatic reissue of
//! expired or exhausted tokens.

mod config;
mod lockout;
mod mock;
mod service;
mod traits;
mod types;


pub use config::OtpServiceConfig;
pub use lockout::{LockoutDecision, SessionLockout};
pub use mock::{MockNotificationGateway, SentMessage};
pub use service::OtpVerificationService;
pub use traits::NotificationGateway;
pub use types::{ChallengeOutcome, OtpChannel, VerificationOutcome, VerifyStatus};
