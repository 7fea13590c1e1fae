// src/models/mod.rs

//! Domain models for the scraper application.

mod config;
mod profile;
mod stats;

// Re-export all public types
pub use config::{Config, CrawlerConfig, FilterConfig, LoggingConfig, OutputConfig, RoleConfig};
pub use profile::{Candidate, ExtractedPage, Profile};
pub use stats::{RejectionCounts, RoleEnding, RoleOutcome, RunStats};
