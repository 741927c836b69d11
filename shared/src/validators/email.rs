//! Email validation with an optional company domain allow-list

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
});

/// Basic syntactic email check
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check an email's domain against an allow-list. Suffix matching lets an
/// entry like `example.com` also cover `mail.example.com`. An empty list
/// allows nothing.
pub fn domain_allowed(email: &str, allowed_domains: &[String]) -> bool {
    match email.rsplit_once('@') {
        Some((_, domain)) => allowed_domains.iter().any(|d| domain.ends_with(d.as_str())),
        None => false,
    }
}

/// Mask an email for logs, keeping the first character and the domain
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
