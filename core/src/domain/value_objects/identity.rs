//! Resolution of which identifier fields a deployment collects.

use authkit_shared::config::{AuthMethod, IdentifierField, IdentityConfiguration};

use crate::errors::{ConfigError, DomainResult};

/// The identifier fields a deployment works with: one primary field plus
/// any further required fields, in the fixed EMAIL, PHONE, USERNAME order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPolicy {
    /// Field of the first enabled method
    pub primary_field: IdentifierField,

    /// Fields of the remaining enabled methods, duplicates removed
    pub required_fields: Vec<IdentifierField>,
}

impl IdentityPolicy {
    /// Derives the policy from the enabled methods. Fails when no method
    /// is enabled; callers that want a default must opt in via
    /// [`IdentityConfiguration::fallback_default`].
    pub fn resolve(config: &IdentityConfiguration) -> DomainResult<Self> {
        let mut fields: Vec<IdentifierField> = Vec::new();
        for method in AuthMethod::ORDERED {
            if config.is_enabled(method) {
                let field = method.field();
                if !fields.contains(&field) {
                    fields.push(field);
                }
            }
        }

        let mut iter = fields.into_iter();
        let primary_field = iter.next().ok_or(ConfigError::NoMethodEnabled)?;
        Ok(Self {
            primary_field,
            required_fields: iter.collect(),
        })
    }

    /// All fields the policy covers, primary first
    pub fn all_fields(&self) -> Vec<IdentifierField> {
        let mut fields = Vec::with_capacity(1 + self.required_fields.len());
        fields.push(self.primary_field);
        fields.extend(self.required_fields.iter().copied());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;

    #[test]
    fn test_email_and_phone_enabled() {
        let config = IdentityConfiguration::new(true, true, false);
        let policy = IdentityPolicy::resolve(&config).unwrap();
        assert_eq!(policy.primary_field, IdentifierField::Email);
        assert_eq!(policy.required_fields, vec![IdentifierField::PhoneNumber]);
    }

    #[test]
    fn test_single_method() {
        let config = IdentityConfiguration::new(false, false, true);
        let policy = IdentityPolicy::resolve(&config).unwrap();
        assert_eq!(policy.primary_field, IdentifierField::Username);
        assert!(policy.required_fields.is_empty());
    }

    #[test]
    fn test_all_methods_keep_fixed_order() {
        let config = IdentityConfiguration::new(true, true, true);
        let policy = IdentityPolicy::resolve(&config).unwrap();
        assert_eq!(policy.primary_field, IdentifierField::Email);
        assert_eq!(
            policy.required_fields,
            vec![IdentifierField::PhoneNumber, IdentifierField::Username]
        );
        assert_eq!(
            policy.all_fields(),
            vec![
                IdentifierField::Email,
                IdentifierField::PhoneNumber,
                IdentifierField::Username
            ]
        );
    }

    #[test]
    fn test_no_method_enabled_fails() {
        let config = IdentityConfiguration::new(false, false, false);
        let err = IdentityPolicy::resolve(&config).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Config(ConfigError::NoMethodEnabled)
        ));
    }

    #[test]
    fn test_fallback_default_resolves() {
        let policy = IdentityPolicy::resolve(&IdentityConfiguration::fallback_default()).unwrap();
        assert_eq!(policy.primary_field, IdentifierField::Email);
        assert_eq!(policy.required_fields, vec![IdentifierField::Username]);
    }
}
