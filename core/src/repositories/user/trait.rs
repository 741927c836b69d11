//! User directory trait defining the interface for account lookup and
//! persistence.
//!
//! Implementations handle the actual storage while keeping the domain
//! layer free of infrastructure concerns. Every identifier lookup goes
//! through a field name rather than a field-specific method, because
//! which fields exist is a deployment decision.

use async_trait::async_trait;
use authkit_shared::config::IdentifierField;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Directory of user accounts keyed by their identifier fields
///
/// # Errors
/// Methods return `DomainError` for storage failures. `find_*` methods
/// signal absence with `Ok(None)`, not an error.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user whose given identifier field equals `value`
    async fn find_by_identifier(
        &self,
        field: IdentifierField,
        value: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persist a new user. Fails with `ValidationError::DuplicateValue`
    /// when another account already holds one of the user's populated
    /// identifier fields.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist changes to an existing user
    async fn save(&self, user: User) -> Result<User, DomainError>;

    /// Whether any account holds `value` in the given field
    async fn exists(&self, field: IdentifierField, value: &str) -> Result<bool, DomainError>;
}
