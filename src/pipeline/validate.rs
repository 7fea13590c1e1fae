// src/pipeline/validate.rs

//! Email validation stage.

use crate::models::Profile;
use crate::utils::email;

use super::stage::{AdmissionStage, Rejection};

/// Rejects records whose email is missing or malformed; on success,
/// rewrites the email to its normalized form so every downstream stage
/// sees only normalized addresses.
#[derive(Debug, Default)]
pub struct EmailValidation;

impl AdmissionStage for EmailValidation {
    fn name(&self) -> &'static str {
        "email_validation"
    }

    fn process(&mut self, mut profile: Profile) -> Result<Profile, Rejection> {
        match email::validate(&profile.email) {
            Some(normalized) => {
                profile.email = normalized;
                Ok(profile)
            }
            None => Err(Rejection::invalid_email(profile.email)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: &str) -> Profile {
        Profile {
            name: "Jane Doe".to_string(),
            email: email.to_string(),
            profile_link: "https://example.com/jane".to_string(),
            role_type: "UGC".to_string(),
        }
    }

    #[test]
    fn test_normalizes_on_success() {
        let mut stage = EmailValidation;
        let admitted = stage.process(profile(" Jane@Example.COM ")).unwrap();
        assert_eq!(admitted.email, "jane@example.com");
    }

    #[test]
    fn test_rejects_empty_email() {
        let mut stage = EmailValidation;
        assert_eq!(
            stage.process(profile("")),
            Err(Rejection::invalid_email(""))
        );
    }

    #[test]
    fn test_rejects_malformed_email() {
        let mut stage = EmailValidation;
        assert!(matches!(
            stage.process(profile("not-an-email")),
            Err(Rejection::InvalidEmail { .. })
        ));
    }
}
