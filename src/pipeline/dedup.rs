// src/pipeline/dedup.rs

//! Deduplication stage.

use std::collections::HashSet;

use crate::models::Profile;

use super::stage::{AdmissionStage, Rejection};

/// Rejects records whose (normalized) email was already admitted this run.
///
/// The membership set lives for the whole run and is shared across roles:
/// the first record for an email wins globally, regardless of which role
/// or name the later duplicates carry.
#[derive(Debug, Default)]
pub struct Deduplication {
    seen_emails: HashSet<String>,
}

impl Deduplication {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AdmissionStage for Deduplication {
    fn name(&self) -> &'static str {
        "deduplication"
    }

    fn process(&mut self, profile: Profile) -> Result<Profile, Rejection> {
        if self.seen_emails.insert(profile.email.clone()) {
            Ok(profile)
        } else {
            Err(Rejection::duplicate_email(&profile.email))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, email: &str, role: &str) -> Profile {
        Profile {
            name: name.to_string(),
            email: email.to_string(),
            profile_link: "https://example.com/p".to_string(),
            role_type: role.to_string(),
        }
    }

    #[test]
    fn test_first_email_wins() {
        let mut stage = Deduplication::new();
        assert!(stage.process(profile("A", "a@b.com", "UGC")).is_ok());
        assert_eq!(
            stage.process(profile("A", "a@b.com", "UGC")),
            Err(Rejection::duplicate_email("a@b.com"))
        );
    }

    #[test]
    fn test_duplicate_rejected_across_roles_and_names() {
        let mut stage = Deduplication::new();
        assert!(stage.process(profile("John Smith", "j@x.com", "UGC")).is_ok());
        assert!(stage
            .process(profile("John Duplicate", "j@x.com", "Video"))
            .is_err());
    }

    #[test]
    fn test_distinct_emails_pass() {
        let mut stage = Deduplication::new();
        assert!(stage.process(profile("A", "a@b.com", "UGC")).is_ok());
        assert!(stage.process(profile("B", "b@b.com", "UGC")).is_ok());
    }
}
