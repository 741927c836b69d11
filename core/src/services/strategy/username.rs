//! Username-based account creation strategy.

use std::sync::Arc;

use async_trait::async_trait;
use authkit_shared::config::IdentifierField;

use crate::domain::entities::user::User;
use crate::domain::value_objects::SignupData;
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::UserDirectory;

use super::traits::{finalize, AuthStrategy};

/// Creates accounts identified by a free-form username
pub struct UsernameStrategy<D: UserDirectory> {
    directory: Arc<D>,
}

impl<D: UserDirectory> UsernameStrategy<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    fn username_of<'a>(&self, data: &'a SignupData) -> DomainResult<&'a str> {
        data.username
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ValidationError::RequiredField {
                    field: IdentifierField::Username.as_str().to_string(),
                }
                .into()
            })
    }
}

#[async_trait]
impl<D: UserDirectory> AuthStrategy for UsernameStrategy<D> {
    fn field(&self) -> IdentifierField {
        IdentifierField::Username
    }

    async fn validate(&self, data: &SignupData) -> DomainResult<()> {
        let username = self.username_of(data)?;

        if self
            .directory
            .exists(IdentifierField::Username, username)
            .await?
        {
            return Err(ValidationError::DuplicateValue {
                field: IdentifierField::Username.as_str().to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn populate(&self, data: &SignupData, user: &mut User) -> DomainResult<()> {
        user.username = Some(self.username_of(data)?.to_string());
        Ok(())
    }

    async fn create_user(&self, data: &SignupData) -> DomainResult<User> {
        self.validate(data).await?;
        let mut user = User::new();
        self.populate(data, &mut user)?;
        finalize(self.directory.as_ref(), data, user).await
    }
}
