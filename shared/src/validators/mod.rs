//! Identifier validators

pub mod email;
pub mod phone;

use crate::config::IdentifierField;

/// Decide which identifier field a raw login identifier denotes.
///
/// Anything containing `@` is treated as an email; anything matching one of
/// the accepted phone shapes as a phone number; everything else as a
/// username.
pub fn classify_identifier(value: &str) -> IdentifierField {
    if value.contains('@') {
        IdentifierField::Email
    } else if phone::is_valid_phone(value) {
        IdentifierField::PhoneNumber
    } else {
        IdentifierField::Username
    }
}

/// Classify a raw identifier and reduce it to the canonical form accounts
/// are stored under: emails lowercased, phone numbers normalized to the
/// `+98` shape, usernames trimmed. Lookups must go through this so any
/// accepted spelling of an identifier finds the account it was registered
/// with.
pub fn canonicalize_identifier(value: &str) -> (IdentifierField, String) {
    let trimmed = value.trim();
    let field = classify_identifier(trimmed);
    let canonical = match field {
        IdentifierField::Email => trimmed.to_lowercase(),
        IdentifierField::PhoneNumber => {
            phone::normalize_phone(trimmed).unwrap_or_else(|| trimmed.to_string())
        }
        IdentifierField::Username => trimmed.to_string(),
    };
    (field, canonical)
}
