//! Email-based account creation strategy.

use std::sync::Arc;

use async_trait::async_trait;
use authkit_shared::config::IdentifierField;
use authkit_shared::validators::email::{domain_allowed, is_valid_email};

use crate::domain::entities::user::User;
use crate::domain::value_objects::SignupData;
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::UserDirectory;

use super::traits::{finalize, AuthStrategy};

/// Creates accounts identified by an email address, optionally restricted
/// to a set of company domains.
pub struct EmailStrategy<D: UserDirectory> {
    directory: Arc<D>,
    allowed_domains: Option<Vec<String>>,
}

impl<D: UserDirectory> EmailStrategy<D> {
    pub fn new(directory: Arc<D>, allowed_domains: Option<Vec<String>>) -> Self {
        Self {
            directory,
            allowed_domains,
        }
    }

    fn email_of<'a>(&self, data: &'a SignupData) -> DomainResult<&'a str> {
        let email = data
            .email
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ValidationError::RequiredField {
                field: IdentifierField::Email.as_str().to_string(),
            })?;
        Ok(email)
    }
}

#[async_trait]
impl<D: UserDirectory> AuthStrategy for EmailStrategy<D> {
    fn field(&self) -> IdentifierField {
        IdentifierField::Email
    }

    async fn validate(&self, data: &SignupData) -> DomainResult<()> {
        let email = self.email_of(data)?;

        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        if let Some(domains) = &self.allowed_domains {
            if !domain_allowed(email, domains) {
                let domain = email.rsplit_once('@').map(|(_, d)| d).unwrap_or(email);
                return Err(ValidationError::EmailDomainNotAllowed {
                    domain: domain.to_string(),
                }
                .into());
            }
        }

        if self
            .directory
            .exists(IdentifierField::Email, email)
            .await?
        {
            return Err(ValidationError::DuplicateValue {
                field: IdentifierField::Email.as_str().to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn populate(&self, data: &SignupData, user: &mut User) -> DomainResult<()> {
        let email = self.email_of(data)?;
        user.email = Some(email.to_lowercase());
        Ok(())
    }

    async fn create_user(&self, data: &SignupData) -> DomainResult<User> {
        self.validate(data).await?;
        let mut user = User::new();
        self.populate(data, &mut user)?;
        finalize(self.directory.as_ref(), data, user).await
    }
}
