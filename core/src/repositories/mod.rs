pub mod login_attempt;
pub mod otp;
pub mod user;

pub use login_attempt::{InMemoryLoginAttemptRepository, LoginAttemptRepository};
pub use otp::{InMemoryOtpStore, OtpStore};
pub use user::{InMemoryUserDirectory, UserDirectory};
