//! Strategy composing several identifier strategies into one signup.

use std::sync::Arc;

use async_trait::async_trait;
use authkit_shared::config::IdentifierField;

use crate::domain::entities::user::User;
use crate::domain::value_objects::SignupData;
use crate::errors::DomainResult;
use crate::repositories::UserDirectory;

use super::traits::{finalize, AuthStrategy};

/// Validates and populates through every member strategy, then persists
/// the single resulting user once. Validation is fail-fast in member
/// order.
pub struct CombinedStrategy<D: UserDirectory> {
    strategies: Vec<Box<dyn AuthStrategy>>,
    directory: Arc<D>,
}

impl<D: UserDirectory> CombinedStrategy<D> {
    pub fn new(strategies: Vec<Box<dyn AuthStrategy>>, directory: Arc<D>) -> Self {
        Self {
            strategies,
            directory,
        }
    }
}

#[async_trait]
impl<D: UserDirectory> AuthStrategy for CombinedStrategy<D> {
    /// The primary field is the first member's field
    fn field(&self) -> IdentifierField {
        self.strategies[0].field()
    }

    async fn validate(&self, data: &SignupData) -> DomainResult<()> {
        for strategy in &self.strategies {
            strategy.validate(data).await?;
        }
        Ok(())
    }

    fn populate(&self, data: &SignupData, user: &mut User) -> DomainResult<()> {
        for strategy in &self.strategies {
            strategy.populate(data, user)?;
        }
        Ok(())
    }

    async fn create_user(&self, data: &SignupData) -> DomainResult<User> {
        self.validate(data).await?;
        let mut user = User::new();
        self.populate(data, &mut user)?;
        finalize(self.directory.as_ref(), data, user).await
    }
}
