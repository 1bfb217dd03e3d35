//! Shared input normalization and validation rules

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Basic `local@domain.tld` shape, no whitespace.
pub static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Emails are compared case-insensitively: every lookup and every stored
/// address goes through this first.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Blank optional fields are treated as absent.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_regex() {
        assert!(EMAIL_REGEX.is_match("jane@example.com"));
        assert!(EMAIL_REGEX.is_match("a.b+c@sub.example.org"));
        assert!(!EMAIL_REGEX.is_match("jane@example"));
        assert!(!EMAIL_REGEX.is_match("jane example@example.com"));
        assert!(!EMAIL_REGEX.is_match("@example.com"));
        assert!(!EMAIL_REGEX.is_match(""));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane@Example.COM "), "jane@example.com");
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("   ".to_string())), None);
        assert_eq!(normalize_optional(Some(" bio ".to_string())), Some("bio".to_string()));
        assert_eq!(normalize_optional(None), None);
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Jane").is_ok());
        assert!(not_blank("  ").is_err());
    }
}
