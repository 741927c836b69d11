//! Domain entities representing core business objects.

pub mod login_attempt;
pub mod otp;
pub mod user;

// Re-export commonly used types
pub use login_attempt::{AttemptTotals, LoginAttemptRecord};
pub use otp::{
    OtpReason, OtpRecord, OtpState,
    DEFAULT_EXPIRY_SECONDS, DEFAULT_MAX_FAILED_ATTEMPTS, TOKEN_LENGTH,
};
pub use user::User;
