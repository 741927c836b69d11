//! Domain-specific error types for authentication operations
//!
//! Presentation layers map these to user-facing messages; nothing here
//! exposes which identifiers are registered.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No enabled authentication method matches the submitted data")]
    NoStrategy,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User account is blocked")]
    UserBlocked,

    #[error("Session is locked out for {seconds_remaining} seconds")]
    SessionLockedOut { seconds_remaining: i64 },

    #[error("User has no email or phone number to deliver a code to")]
    NoContactAddress,

    #[error("Failed to deliver notification via {channel}")]
    DeliveryFailure { channel: String },
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Duplicate value for field: {field}")]
    DuplicateValue { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Email domain is not in the allowed list: {domain}")]
    EmailDomainNotAllowed { domain: String },

    #[error("Invalid phone number format: {phone}")]
    InvalidPhoneFormat { phone: String },
}

/// Deployment configuration errors, fatal at startup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No authentication method is enabled")]
    NoMethodEnabled,

    #[error("Activation links require the email method to be enabled")]
    ActivationRequiresEmail,

    #[error("OTP and activation-link delivery cannot both be enabled")]
    ConflictingDeliveryModes,
}
