//! Phone number validation and normalization
//!
//! Accepted shapes, all denoting the same subscriber number:
//! - local with leading zero: `09XXXXXXXXX`
//! - international with plus: `+989XXXXXXXXX`
//! - international with double zero: `00989XXXXXXXXX`
//!
//! Numbers are normalized to the `+98` form before any uniqueness check.

use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+98|0098|0)?9\d{9}$").expect("phone regex is valid")
});

/// Check whether a string matches one of the accepted phone shapes
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Normalize an accepted phone shape to canonical `+989XXXXXXXXX` form.
/// Returns `None` when the input is not a valid phone number.
pub fn normalize_phone(phone: &str) -> Option<String> {
    if !is_valid_phone(phone) {
        return None;
    }
    // The subscriber part is always the trailing 10 digits (9XXXXXXXXX).
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let subscriber = &digits[digits.len() - 10..];
    Some(format!("+98{}", subscriber))
}

/// Mask a phone number for logs, keeping only the last four digits
pub fn mask_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 4 {
        format!("****{}", &digits[digits.len() - 4..])
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_shapes() {
        assert!(is_valid_phone("09123456789"));
        assert!(is_valid_phone("+989123456789"));
        assert!(is_valid_phone("00989123456789"));
        assert!(is_valid_phone("9123456789"));
    }

    #[test]
    fn test_rejected_shapes() {
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("0912345678")); // too short
        assert!(!is_valid_phone("091234567890")); // too long
        assert!(!is_valid_phone("08123456789")); // wrong subscriber prefix
        assert!(!is_valid_phone("+449123456789")); // wrong country code
        assert!(!is_valid_phone("091234S6789"));
    }

    #[test]
    fn test_normalization_is_canonical() {
        let canonical = "+989123456789";
        assert_eq!(normalize_phone("09123456789").as_deref(), Some(canonical));
        assert_eq!(normalize_phone("+989123456789").as_deref(), Some(canonical));
        assert_eq!(
            normalize_phone("00989123456789").as_deref(),
            Some(canonical)
        );
        assert_eq!(normalize_phone("9123456789").as_deref(), Some(canonical));
    }

    #[test]
    fn test_normalize_rejects_invalid() {
        assert_eq!(normalize_phone("12345"), None);
        assert_eq!(normalize_phone("not-a-phone"), None);
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("+989123456789"), "****6789");
        assert_eq!(mask_phone("09123456789"), "****6789");
        assert_eq!(mask_phone("12"), "****");
    }
}
