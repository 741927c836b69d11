//! Authentication method configuration
//!
//! `IdentityConfiguration` is an explicit value constructed once and passed
//! into every component that needs it. Two deployments (or two tests) can
//! hold different configurations side by side.

use serde::{Deserialize, Serialize};

/// An enabled authentication method, paired with a password credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthMethod {
    EmailPassword,
    PhonePassword,
    UsernamePassword,
}

impl AuthMethod {
    /// Fixed enumeration order; the first enabled method in this order
    /// becomes the primary identifier.
    pub const ORDERED: [AuthMethod; 3] = [
        AuthMethod::EmailPassword,
        AuthMethod::PhonePassword,
        AuthMethod::UsernamePassword,
    ];

    /// The user field this method identifies users by
    pub fn field(self) -> IdentifierField {
        match self {
            AuthMethod::EmailPassword => IdentifierField::Email,
            AuthMethod::PhonePassword => IdentifierField::PhoneNumber,
            AuthMethod::UsernamePassword => IdentifierField::Username,
        }
    }
}

/// A user field that can serve as a login identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierField {
    Email,
    PhoneNumber,
    Username,
}

impl IdentifierField {
    /// Field name as used in submitted data and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierField::Email => "email",
            IdentifierField::PhoneNumber => "phone_number",
            IdentifierField::Username => "username",
        }
    }
}

impl std::fmt::Display for IdentifierField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which authentication methods a deployment has enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfiguration {
    #[serde(default)]
    pub email_password: bool,
    #[serde(default)]
    pub phone_password: bool,
    #[serde(default)]
    pub username_password: bool,
}

impl IdentityConfiguration {
    pub fn new(email_password: bool, phone_password: bool, username_password: bool) -> Self {
        Self {
            email_password,
            phone_password,
            username_password,
        }
    }

    /// The documented substitute for an empty configuration: email plus
    /// username. Callers that want a fallback must opt in explicitly;
    /// `IdentityPolicy::resolve` never applies this on its own.
    pub fn fallback_default() -> Self {
        Self {
            email_password: true,
            phone_password: false,
            username_password: true,
        }
    }

    /// Load from `AUTH_EMAIL_PASSWORD` / `AUTH_PHONE_PASSWORD` /
    /// `AUTH_USERNAME_PASSWORD` environment variables.
    pub fn from_env() -> Self {
        Self {
            email_password: env_flag("AUTH_EMAIL_PASSWORD"),
            phone_password: env_flag("AUTH_PHONE_PASSWORD"),
            username_password: env_flag("AUTH_USERNAME_PASSWORD"),
        }
    }

    pub fn is_enabled(&self, method: AuthMethod) -> bool {
        match method {
            AuthMethod::EmailPassword => self.email_password,
            AuthMethod::PhonePassword => self.phone_password,
            AuthMethod::UsernamePassword => self.username_password,
        }
    }

    pub fn any_enabled(&self) -> bool {
        self.email_password || self.phone_password || self.username_password
    }

    /// Enabled methods in the fixed enumeration order
    pub fn enabled_methods(&self) -> impl Iterator<Item = AuthMethod> + '_ {
        AuthMethod::ORDERED
            .into_iter()
            .filter(|m| self.is_enabled(*m))
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim(), "1" | "true" | "True" | "TRUE"))
        .unwrap_or(false)
}
