//! Strategy seam for creating accounts from different identifier fields.

use async_trait::async_trait;
use authkit_shared::config::IdentifierField;

use crate::domain::entities::user::User;
use crate::domain::value_objects::SignupData;
use crate::errors::DomainResult;
use crate::repositories::UserDirectory;

/// One way of establishing an account identity. A strategy validates the
/// signup input for its field and writes that field onto the user; it
/// never touches fields owned by other strategies.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// The identifier field this strategy owns
    fn field(&self) -> IdentifierField;

    /// Validates the signup input for this strategy's field, including
    /// uniqueness against the directory
    async fn validate(&self, data: &SignupData) -> DomainResult<()>;

    /// Copies this strategy's field from the input onto the user
    fn populate(&self, data: &SignupData, user: &mut User) -> DomainResult<()>;

    /// Validates, builds, and persists a new user
    async fn create_user(&self, data: &SignupData) -> DomainResult<User>;
}

impl std::fmt::Debug for dyn AuthStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStrategy")
            .field("field", &self.field())
            .finish()
    }
}

/// Applies the non-identifier signup fields and persists the user once.
/// Shared by every strategy's `create_user`.
pub(super) async fn finalize<D: UserDirectory>(
    directory: &D,
    data: &SignupData,
    mut user: User,
) -> DomainResult<User> {
    if let Some(password) = data.password.as_deref() {
        user.set_password(password)?;
    }
    user.is_staff = data.is_staff;
    user.is_superuser = data.is_superuser;
    directory.create(user).await
}
