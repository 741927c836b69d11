//! Shared configuration and validation utilities for the authentication core
//!
//! This crate provides the pieces used across the workspace:
//! - Authentication method configuration types
//! - OTP threshold configuration
//! - Identifier validators (email, phone)

pub mod config;
pub mod validators;

// Re-export commonly used items at crate root
pub use config::{
    AuthMethod, AuthSettings, IdentifierField, IdentityConfiguration, OtpConfig, SettingsIssue,
};
pub use validators::{canonicalize_identifier, classify_identifier, email, phone};
