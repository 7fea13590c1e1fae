// src/utils/email.rs

//! Email syntax validation and normalization.
//!
//! A deliberately simple syntactic check: no deliverability lookups, no
//! full RFC grammar. Normalization trims surrounding whitespace and
//! lower-cases the address, and is a fixed point (re-validating a
//! normalized address yields the same string).

use std::sync::OnceLock;

use regex::Regex;

const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

fn anchored() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!("^{EMAIL_PATTERN}$")).expect("valid email regex"))
}

fn unanchored() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("valid email regex"))
}

/// Validate an email address, returning its normalized form.
///
/// Returns `None` when the input is empty or fails the syntax check.
pub fn validate(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !anchored().is_match(trimmed) {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}

/// Find the first email-looking token inside free text.
pub fn find_in_text(text: &str) -> Option<String> {
    unanchored().find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_and_normalizes() {
        assert_eq!(
            validate("  John.Smith@Gmail.COM "),
            Some("john.smith@gmail.com".to_string())
        );
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert_eq!(validate(""), None);
        assert_eq!(validate("   "), None);
    }

    #[test]
    fn test_validate_rejects_malformed() {
        assert_eq!(validate("not-an-email"), None);
        assert_eq!(validate("missing@tld"), None);
        assert_eq!(validate("two words@example.com"), None);
    }

    #[test]
    fn test_normalization_is_fixed_point() {
        let once = validate("Jane.Doe@Example.Com").unwrap();
        let twice = validate(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_find_in_text() {
        assert_eq!(
            find_in_text("reach me at bob@studio.io or on socials"),
            Some("bob@studio.io".to_string())
        );
        assert_eq!(find_in_text("no contact details here"), None);
    }
}
