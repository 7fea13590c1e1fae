// src/pipeline/admission.rs

//! The ordered admission chain.

use crate::models::{FilterConfig, Profile, RejectionCounts};

use super::brand::BrandNameFilter;
use super::dedup::Deduplication;
use super::stage::{AdmissionStage, Rejection};
use super::validate::EmailValidation;

/// Ordered chain of admission stages plus the run's rejection counters.
///
/// Stage order is fixed: email validation, then the brand-name filter,
/// then deduplication. Deduplication runs last so its membership set only
/// ever holds normalized, admissible emails.
pub struct AdmissionPipeline {
    stages: Vec<Box<dyn AdmissionStage>>,
    seen: usize,
    admitted: usize,
    rejections: RejectionCounts,
}

impl AdmissionPipeline {
    /// Build the standard chain from filter configuration.
    pub fn new(filter: &FilterConfig) -> Self {
        Self::with_stages(vec![
            Box::new(EmailValidation),
            Box::new(BrandNameFilter::new(&filter.brand_keywords)),
            Box::new(Deduplication::new()),
        ])
    }

    /// Build a pipeline from an explicit stage list.
    pub fn with_stages(stages: Vec<Box<dyn AdmissionStage>>) -> Self {
        Self {
            stages,
            seen: 0,
            admitted: 0,
            rejections: RejectionCounts::default(),
        }
    }

    /// Run one record through every stage in order.
    ///
    /// Admission is all-or-nothing: the record either clears the whole
    /// chain (possibly mutated along the way) or is dropped at the first
    /// rejecting stage, with the reason counted.
    pub fn admit(&mut self, profile: Profile) -> Result<Profile, Rejection> {
        self.seen += 1;
        let mut current = profile;
        for stage in &mut self.stages {
            match stage.process(current) {
                Ok(next) => current = next,
                Err(rejection) => {
                    self.rejections.record(&rejection);
                    log::debug!("Stage {} dropped record: {}", stage.name(), rejection);
                    return Err(rejection);
                }
            }
        }
        self.admitted += 1;
        Ok(current)
    }

    /// Candidates seen so far.
    pub fn seen(&self) -> usize {
        self.seen
    }

    /// Records admitted so far.
    pub fn admitted(&self) -> usize {
        self.admitted
    }

    /// Rejection counters so far.
    pub fn rejections(&self) -> RejectionCounts {
        self.rejections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, email: &str, link: &str) -> Profile {
        Profile {
            name: name.to_string(),
            email: email.to_string(),
            profile_link: link.to_string(),
            role_type: "UGC".to_string(),
        }
    }

    #[test]
    fn test_end_to_end_admission_scenario() {
        let mut pipeline = AdmissionPipeline::new(&FilterConfig::default());

        let admitted = pipeline
            .admit(profile("John Smith", "john.smith@gmail.com", "l1"))
            .unwrap();
        assert_eq!(admitted.email, "john.smith@gmail.com");

        assert_eq!(
            pipeline.admit(profile("Creative Studio", "info@creative.com", "l2")),
            Err(Rejection::brand_like_name("Creative Studio", "studio"))
        );
        assert!(matches!(
            pipeline.admit(profile("Bob", "not-an-email", "l3")),
            Err(Rejection::InvalidEmail { .. })
        ));
        assert_eq!(
            pipeline.admit(profile("John Duplicate", "john.smith@gmail.com", "l4")),
            Err(Rejection::duplicate_email("john.smith@gmail.com"))
        );

        assert_eq!(pipeline.seen(), 4);
        assert_eq!(pipeline.admitted(), 1);
        let counts = pipeline.rejections();
        assert_eq!(counts.invalid_email, 1);
        assert_eq!(counts.brand_like_name, 1);
        assert_eq!(counts.duplicate_email, 1);
    }

    #[test]
    fn test_dedup_sees_normalized_emails() {
        // Same address with different casing collapses to one admission.
        let mut pipeline = AdmissionPipeline::new(&FilterConfig::default());
        assert!(pipeline.admit(profile("Jane", "Jane@X.com", "l1")).is_ok());
        assert!(pipeline.admit(profile("Jane", "jane@x.COM", "l2")).is_err());
    }

    #[test]
    fn test_invalid_email_never_reaches_dedup() {
        let mut pipeline = AdmissionPipeline::new(&FilterConfig::default());
        assert!(pipeline.admit(profile("Bob", "broken", "l1")).is_err());
        // The broken address was never recorded, so a valid record with a
        // fresh email is unaffected.
        assert!(pipeline.admit(profile("Bob", "bob@ok.com", "l2")).is_ok());
    }
}
