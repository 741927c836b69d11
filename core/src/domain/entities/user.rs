//! User entity supporting multiple login identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authkit_shared::config::IdentifierField;

use crate::errors::{DomainError, DomainResult};

/// A registered user. At least one of `email`, `phone_number` and
/// `username` is populated; uniqueness is enforced per populated field by
/// the directory. Deletion is an external concern, so there is no delete
/// transition here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, if the email method applies to this user
    pub email: Option<String>,

    /// Phone number in canonical `+98…` form
    pub phone_number: Option<String>,

    /// Username, if the username method applies to this user
    pub username: Option<String>,

    /// Bcrypt hash of the password; `None` until a password is set
    pub password_hash: Option<String>,

    /// Whether the account has completed activation
    pub is_active: bool,

    /// Whether the account is blocked after repeated lockouts
    pub is_blocked: bool,

    /// Staff flag, carried through to admin-login metrics
    pub is_staff: bool,

    /// Superuser flag
    pub is_superuser: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates an empty, inactive user. Strategies populate the identifier
    /// fields they own before the record is persisted.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: None,
            phone_number: None,
            username: None,
            password_hash: None,
            is_active: false,
            is_blocked: false,
            is_staff: false,
            is_superuser: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// The value of a given identifier field, if populated
    pub fn identifier(&self, field: IdentifierField) -> Option<&str> {
        match field {
            IdentifierField::Email => self.email.as_deref(),
            IdentifierField::PhoneNumber => self.phone_number.as_deref(),
            IdentifierField::Username => self.username.as_deref(),
        }
    }

    /// Whether any identifier field is populated
    pub fn has_identifier(&self) -> bool {
        self.email.is_some() || self.phone_number.is_some() || self.username.is_some()
    }

    /// Hashes and stores the password
    pub fn set_password(&mut self, raw: &str) -> DomainResult<()> {
        let hash = bcrypt::hash(raw, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })?;
        self.password_hash = Some(hash);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Verifies a password against the stored hash. A user without a
    /// password hash never matches.
    pub fn check_password(&self, raw: &str) -> bool {
        match &self.password_hash {
            Some(hash) => bcrypt::verify(raw, hash).unwrap_or(false),
            None => false,
        }
    }

    /// Marks the account as activated
    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Blocks the account and deactivates it
    pub fn block(&mut self) {
        self.is_blocked = true;
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Clears the blocked flag; activation state is restored separately
    pub fn unblock(&mut self) {
        self.is_blocked = false;
        self.updated_at = Utc::now();
    }

    /// Whether this user counts as an admin for login metrics
    pub fn is_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_empty_and_inactive() {
        let user = User::new();
        assert!(!user.has_identifier());
        assert!(!user.is_active);
        assert!(!user.is_blocked);
        assert!(user.password_hash.is_none());
    }

    #[test]
    fn test_identifier_lookup_per_field() {
        let mut user = User::new();
        user.email = Some("a@x.com".to_string());
        user.phone_number = Some("+989123456789".to_string());

        assert_eq!(user.identifier(IdentifierField::Email), Some("a@x.com"));
        assert_eq!(
            user.identifier(IdentifierField::PhoneNumber),
            Some("+989123456789")
        );
        assert_eq!(user.identifier(IdentifierField::Username), None);
        assert!(user.has_identifier());
    }

    #[test]
    fn test_password_round_trip() {
        let mut user = User::new();
        user.set_password("s3cret").unwrap();
        assert!(user.check_password("s3cret"));
        assert!(!user.check_password("wrong"));
    }

    #[test]
    fn test_check_password_without_hash() {
        let user = User::new();
        assert!(!user.check_password("anything"));
    }

    #[test]
    fn test_block_deactivates() {
        let mut user = User::new();
        user.activate();
        assert!(user.is_active);

        user.block();
        assert!(user.is_blocked);
        assert!(!user.is_active);

        user.unblock();
        assert!(!user.is_blocked);
        assert!(!user.is_active);
    }

    #[test]
    fn test_admin_flags() {
        let mut user = User::new();
        assert!(!user.is_admin());
        user.is_staff = true;
        assert!(user.is_admin());
    }
}
