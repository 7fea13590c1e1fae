//! Profile data structures.

use serde::{Deserialize, Serialize};

/// One creator contact record, as written to the export file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Display name
    pub name: String,

    /// Contact email (normalized by the validation stage)
    pub email: String,

    /// Absolute URL to the creator's profile page
    pub profile_link: String,

    /// Role the record was collected under (e.g. "UGC", "Video").
    /// Assigned by the traversal loop, never inferred from page content.
    pub role_type: String,
}

impl Profile {
    /// Column order of the export file.
    pub const FIELDS: [&'static str; 4] = ["name", "email", "profile_link", "role_type"];

    /// Build a profile from a raw extracted candidate.
    ///
    /// A candidate without an email becomes a profile with an empty email
    /// string; the validation stage fails closed on empty input.
    pub fn from_candidate(candidate: Candidate, role_type: &str) -> Self {
        Self {
            name: candidate.name,
            email: candidate.email.unwrap_or_default(),
            profile_link: candidate.link,
            role_type: role_type.to_string(),
        }
    }

    /// Row representation in export column order.
    pub fn to_row(&self) -> [&str; 4] {
        [&self.name, &self.email, &self.profile_link, &self.role_type]
    }
}

/// A raw candidate pulled from one profile card, before admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Display name, trimmed
    pub name: String,

    /// Email if one was found on the card
    pub email: Option<String>,

    /// Absolute URL to the profile page
    pub link: String,
}

/// Everything extracted from one rendered directory page.
#[derive(Debug, Default)]
pub struct ExtractedPage {
    /// Candidates in page order
    pub candidates: Vec<Candidate>,

    /// Absolute URL of the next page, if pagination continues
    pub next_page: Option<String>,
}
