// src/pipeline/brand.rs

//! Brand-name filter stage.

use crate::models::Profile;

use super::stage::{AdmissionStage, Rejection};

/// Rejects records whose name looks like a brand rather than a person.
///
/// The check is a case-insensitive *substring* match against a fixed
/// keyword list. Short keywords such as "co" and "the" will also hit
/// ordinary names that merely contain them ("Cole", "Theresa"); that is
/// the intended heuristic, not an accident.
#[derive(Debug)]
pub struct BrandNameFilter {
    keywords: Vec<String>,
}

impl BrandNameFilter {
    /// Create a filter from a keyword list. Keywords are lower-cased once
    /// up front; empty keywords are dropped.
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    fn matched_keyword(&self, name: &str) -> Option<&str> {
        let lowered = name.to_lowercase();
        self.keywords
            .iter()
            .find(|k| lowered.contains(k.as_str()))
            .map(String::as_str)
    }
}

impl AdmissionStage for BrandNameFilter {
    fn name(&self) -> &'static str {
        "brand_name_filter"
    }

    fn process(&mut self, profile: Profile) -> Result<Profile, Rejection> {
        match self.matched_keyword(&profile.name) {
            Some(keyword) => Err(Rejection::brand_like_name(&profile.name, keyword)),
            None => Ok(profile),
        }
    }
}
