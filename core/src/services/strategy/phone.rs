//! Phone-based account creation strategy.

use std::sync::Arc;

use async_trait::async_trait;
use authkit_shared::config::IdentifierField;
use authkit_shared::validators::phone::normalize_phone;

use crate::domain::entities::user::User;
use crate::domain::value_objects::SignupData;
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::UserDirectory;

use super::traits::{finalize, AuthStrategy};

/// Creates accounts identified by a phone number. Numbers are normalized
/// to international form before uniqueness checks and storage.
pub struct PhoneStrategy<D: UserDirectory> {
    directory: Arc<D>,
}

impl<D: UserDirectory> PhoneStrategy<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    fn normalized_of(&self, data: &SignupData) -> DomainResult<String> {
        let phone = data
            .phone_number
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ValidationError::RequiredField {
                field: IdentifierField::PhoneNumber.as_str().to_string(),
            })?;

        normalize_phone(phone).ok_or_else(|| {
            ValidationError::InvalidPhoneFormat {
                phone: phone.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl<D: UserDirectory> AuthStrategy for PhoneStrategy<D> {
    fn field(&self) -> IdentifierField {
        IdentifierField::PhoneNumber
    }

    async fn validate(&self, data: &SignupData) -> DomainResult<()> {
        let normalized = self.normalized_of(data)?;

        if self
            .directory
            .exists(IdentifierField::PhoneNumber, &normalized)
            .await?
        {
            return Err(ValidationError::DuplicateValue {
                field: IdentifierField::PhoneNumber.as_str().to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn populate(&self, data: &SignupData, user: &mut User) -> DomainResult<()> {
        user.phone_number = Some(self.normalized_of(data)?);
        Ok(())
    }

    async fn create_user(&self, data: &SignupData) -> DomainResult<User> {
        self.validate(data).await?;
        let mut user = User::new();
        self.populate(data, &mut user)?;
        finalize(self.directory.as_ref(), data, user).await
    }
}
