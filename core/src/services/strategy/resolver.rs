//! Selection of the strategy set for the enabled identifier methods.

use std::sync::Arc;

use authkit_shared::config::{AuthMethod, IdentifierField, IdentityConfiguration};
use tracing::debug;

use crate::domain::value_objects::SignupData;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::UserDirectory;

use super::combined::CombinedStrategy;
use super::email::EmailStrategy;
use super::phone::PhoneStrategy;
use super::traits::AuthStrategy;
use super::username::UsernameStrategy;

/// Builds the strategy matching a deployment's enabled methods: a single
/// strategy when one method is enabled, a [`CombinedStrategy`] when
/// several are, and `AuthError::NoStrategy` when none is.
pub struct StrategyResolver<D: UserDirectory> {
    directory: Arc<D>,
    allowed_domains: Option<Vec<String>>,
}

impl<D: UserDirectory + 'static> StrategyResolver<D> {
    pub fn new(directory: Arc<D>, allowed_domains: Option<Vec<String>>) -> Self {
        Self {
            directory,
            allowed_domains,
        }
    }

    fn strategy_for(&self, field: IdentifierField) -> Box<dyn AuthStrategy> {
        match field {
            IdentifierField::Email => Box::new(EmailStrategy::new(
                self.directory.clone(),
                self.allowed_domains.clone(),
            )),
            IdentifierField::PhoneNumber => Box::new(PhoneStrategy::new(self.directory.clone())),
            IdentifierField::Username => Box::new(UsernameStrategy::new(self.directory.clone())),
        }
    }

    /// The strategy for the enabled methods whose field is present in the
    /// submitted data, in the fixed method order. Submitting no field of
    /// any enabled method is a `NoStrategy` failure, not a validation
    /// error.
    pub fn select(
        &self,
        data: &SignupData,
        config: &IdentityConfiguration,
    ) -> DomainResult<Box<dyn AuthStrategy>> {
        let mut strategies: Vec<Box<dyn AuthStrategy>> = Vec::new();
        for method in AuthMethod::ORDERED {
            if config.is_enabled(method) && data.has_field(method.field()) {
                strategies.push(self.strategy_for(method.field()));
            }
        }

        debug!(
            event = "strategy_selected",
            count = strategies.len(),
            "Resolved signup strategies"
        );

        match strategies.len() {
            0 => Err(AuthError::NoStrategy.into()),
            1 => Ok(strategies.remove(0)),
            _ => Ok(Box::new(CombinedStrategy::new(
                strategies,
                self.directory.clone(),
            ))),
        }
    }
}
