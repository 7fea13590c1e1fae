//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Brand-name filtering settings
    #[serde(default)]
    pub filter: FilterConfig,

    /// Export output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Minimum admitted records per role before a role stops paginating
    #[serde(default = "defaults::min_per_role")]
    pub min_per_role: usize,

    /// Role directories to crawl
    #[serde(default = "defaults::roles")]
    pub roles: Vec<RoleConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent_roles == 0 {
            return Err(AppError::validation(
                "crawler.max_concurrent_roles must be > 0",
            ));
        }
        if self.min_per_role == 0 {
            return Err(AppError::validation("min_per_role must be > 0"));
        }
        if self.roles.is_empty() {
            return Err(AppError::validation("No roles defined"));
        }
        for role in &self.roles {
            if role.tag.trim().is_empty() {
                return Err(AppError::validation("Role with empty tag"));
            }
            let parsed = url::Url::parse(&role.start_url)?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(AppError::validation(format!(
                    "Role {} has a non-http start_url: {}",
                    role.tag, role.start_url
                )));
            }
        }
        Ok(())
    }

    /// Look up a role by tag.
    pub fn role(&self, tag: &str) -> Option<&RoleConfig> {
        self.roles.iter().find(|r| r.tag == tag)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            filter: FilterConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
            min_per_role: defaults::min_per_role(),
            roles: defaults::roles(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between page requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Retry attempts per page before the role gives up
    #[serde(default = "defaults::max_retries")]
    pub max_retries: usize,

    /// Maximum roles crawled concurrently
    #[serde(default = "defaults::max_concurrent_roles")]
    pub max_concurrent_roles: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_retries: defaults::max_retries(),
            max_concurrent_roles: defaults::max_concurrent_roles(),
        }
    }
}

/// Brand-name filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Substrings that mark a name as brand-like (matched case-insensitively)
    #[serde(default = "defaults::brand_keywords")]
    pub brand_keywords: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            brand_keywords: defaults::brand_keywords(),
        }
    }
}

/// Export output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV export file
    #[serde(default = "defaults::output_file")]
    pub file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: defaults::output_file(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when no CLI flag or env filter overrides it
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// One role directory to crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Role tag stamped onto every record collected under this role
    pub tag: String,

    /// First page of the role's directory listing
    pub start_url: String,
}

mod defaults {
    use super::RoleConfig;

    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
    }

    pub fn timeout() -> u64 {
        30
    }

    pub fn request_delay() -> u64 {
        2000
    }

    pub fn max_retries() -> usize {
        3
    }

    pub fn max_concurrent_roles() -> usize {
        2
    }

    pub fn min_per_role() -> usize {
        50
    }

    pub fn output_file() -> String {
        "profiles.csv".to_string()
    }

    pub fn log_level() -> String {
        "info".to_string()
    }

    pub fn roles() -> Vec<RoleConfig> {
        vec![
            RoleConfig {
                tag: "UGC".to_string(),
                start_url: "https://www.shoutt.co/creators/ugc".to_string(),
            },
            RoleConfig {
                tag: "Video".to_string(),
                start_url: "https://www.shoutt.co/creators/video".to_string(),
            },
        ]
    }

    pub fn brand_keywords() -> Vec<String> {
        [
            "studio",
            "media",
            "agency",
            "productions",
            "designs",
            "labs",
            "official",
            "channel",
            "team",
            "llc",
            "inc",
            "ltd",
            "pvt",
            "gmbh",
            "plc",
            "co",
            "company",
            "group",
            "the",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}
