//! Signup input values carried from the outer surface into the strategies.

use authkit_shared::config::IdentifierField;
use serde::{Deserialize, Serialize};

/// Raw signup payload. Which fields must be present is decided by the
/// resolved strategies, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupData {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

impl SignupData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// The submitted value for an identifier field, if any
    pub fn value(&self, field: IdentifierField) -> Option<&str> {
        match field {
            IdentifierField::Email => self.email.as_deref(),
            IdentifierField::PhoneNumber => self.phone_number.as_deref(),
            IdentifierField::Username => self.username.as_deref(),
        }
    }

    /// Whether the field carries a non-empty value
    pub fn has_field(&self, field: IdentifierField) -> bool {
        self.value(field).is_some_and(|v| !v.trim().is_empty())
    }
}
