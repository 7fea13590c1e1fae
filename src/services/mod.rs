// src/services/mod.rs

//! Crawling services.
//!
//! - `fetch`: page retrieval with retries
//! - `extract`: profile card and pagination extraction
//! - `crawl`: per-role traversal driving the admission pipeline

mod crawl;
mod extract;
mod fetch;

pub use crawl::run_crawl;
pub use extract::ProfileExtractor;
pub use fetch::{HttpFetcher, PageFetcher};
