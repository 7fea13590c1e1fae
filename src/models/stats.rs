//! Run statistics.

use chrono::{DateTime, Utc};

use crate::pipeline::Rejection;

/// Per-rejection-kind counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectionCounts {
    pub invalid_email: usize,
    pub brand_like_name: usize,
    pub duplicate_email: usize,
}

impl RejectionCounts {
    /// Record one rejection.
    pub fn record(&mut self, rejection: &Rejection) {
        match rejection {
            Rejection::InvalidEmail { .. } => self.invalid_email += 1,
            Rejection::BrandLikeName { .. } => self.brand_like_name += 1,
            Rejection::DuplicateEmail { .. } => self.duplicate_email += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.invalid_email + self.brand_like_name + self.duplicate_email
    }
}

/// How a role's traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleEnding {
    /// The configured minimum admitted count was reached
    QuotaMet,
    /// Pagination ran out (no next-page locator, or a pagination loop)
    PagesExhausted,
    /// A page fetch failed after retries; the role kept what it had
    FetchFailed,
}

impl RoleEnding {
    fn describe(&self) -> &'static str {
        match self {
            RoleEnding::QuotaMet => "quota met",
            RoleEnding::PagesExhausted => "pagination exhausted",
            RoleEnding::FetchFailed => "fetch failed",
        }
    }
}

/// Outcome of one role's traversal.
#[derive(Debug, Clone)]
pub struct RoleOutcome {
    /// Role tag
    pub tag: String,

    /// Pages fetched for this role
    pub pages: usize,

    /// Records admitted for this role
    pub admitted: usize,

    /// Why the traversal stopped
    pub ending: RoleEnding,
}

/// Summary of a full run, logged on completion.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// Candidates seen across all pages and roles
    pub seen: usize,

    /// Records admitted and written
    pub admitted: usize,

    /// Per-kind rejection counters
    pub rejections: RejectionCounts,

    /// Per-role outcomes
    pub roles: Vec<RoleOutcome>,
}

impl RunStats {
    /// Log the closing summary.
    pub fn log_summary(&self) {
        let elapsed = self.end_time - self.start_time;
        log::info!(
            "Run complete in {}s: {} seen, {} admitted, {} rejected",
            elapsed.num_seconds(),
            self.seen,
            self.admitted,
            self.rejections.total()
        );
        log::info!(
            "Rejections: invalid_email={}, brand_like_name={}, duplicate_email={}",
            self.rejections.invalid_email,
            self.rejections.brand_like_name,
            self.rejections.duplicate_email
        );
        for role in &self.roles {
            log::info!(
                "Role {}: {} admitted over {} pages ({})",
                role.tag,
                role.admitted,
                role.pages,
                role.ending.describe()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_by_kind() {
        let mut counts = RejectionCounts::default();
        counts.record(&Rejection::invalid_email("bad"));
        counts.record(&Rejection::invalid_email(""));
        counts.record(&Rejection::brand_like_name("Acme Studio", "studio"));
        counts.record(&Rejection::duplicate_email("a@b.com"));
        assert_eq!(counts.invalid_email, 2);
        assert_eq!(counts.brand_like_name, 1);
        assert_eq!(counts.duplicate_email, 1);
        assert_eq!(counts.total(), 4);
    }
}
