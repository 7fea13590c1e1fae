// src/pipeline/stage.rs

//! Stage capability and per-record rejection reasons.

use thiserror::Error;

use crate::models::Profile;

/// Why a record was dropped. Per-record and non-fatal; these are counted
/// and reported, never propagated as run-level failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Email is missing or fails syntax validation
    #[error("invalid email: '{email}'")]
    InvalidEmail { email: String },

    /// Name contains a brand-indicating keyword
    #[error("brand-like name '{name}' (matched '{keyword}')")]
    BrandLikeName { name: String, keyword: String },

    /// Email was already admitted earlier in this run
    #[error("duplicate email: {email}")]
    DuplicateEmail { email: String },
}

impl Rejection {
    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }

    pub fn brand_like_name(name: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self::BrandLikeName {
            name: name.into(),
            keyword: keyword.into(),
        }
    }

    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// One admission stage.
///
/// A stage either returns the (possibly mutated) record or a rejection;
/// it never emits a partially-valid record downstream. Only the
/// deduplication stage carries state.
pub trait AdmissionStage: Send {
    /// Stage name for logging.
    fn name(&self) -> &'static str;

    /// Accept, mutate, or reject one record.
    fn process(&mut self, profile: Profile) -> Result<Profile, Rejection>;
}
