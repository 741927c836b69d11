//! Business services containing domain logic and use cases.

pub mod auth;
pub mod metrics;
pub mod otp;
pub mod strategy;

// Re-export commonly used types
pub use auth::{AuthenticationService, LoginOutcome, SignupResult};
pub use metrics::LoginAttemptTracker;
pub use otp::{
    ChallengeOutcome, LockoutDecision, NotificationGateway, OtpChannel, OtpServiceConfig,
    OtpVerificationService, SessionLockout, VerificationOutcome, VerifyStatus,
};
pub use strategy::{AuthStrategy, StrategyResolver};
