// src/services/crawl.rs

//! Per-role traversal loop.
//!
//! Each role walks its directory one page at a time: fetch, extract, run
//! every candidate through the admission pipeline, write survivors, then
//! decide whether to follow pagination. Page N+1 is never requested
//! before page N's records have fully cleared the pipeline.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{Config, Profile, RoleConfig, RoleEnding, RoleOutcome, RunStats};
use crate::pipeline::AdmissionPipeline;
use crate::storage::CsvSink;

use super::extract::ProfileExtractor;
use super::fetch::PageFetcher;

/// The run's only shared mutable state: the dedup-carrying pipeline and
/// the sink. One lock around both makes admission-check plus append a
/// single critical section, so "first admitted wins" holds across roles.
struct Admission {
    pipeline: AdmissionPipeline,
    sink: CsvSink,
}

/// Crawl every configured role and export admitted profiles.
///
/// Roles run concurrently up to `crawler.max_concurrent_roles`. A failed
/// page fetch ends that role's traversal early; a sink write failure
/// aborts the whole run.
pub async fn run_crawl(config: &Config, fetcher: Arc<dyn PageFetcher>) -> Result<RunStats> {
    let start_time = Utc::now();

    log::info!(
        "Starting crawl for roles: {:?}",
        config.roles.iter().map(|r| r.tag.as_str()).collect::<Vec<_>>()
    );
    log::info!("Minimum profiles per role: {}", config.min_per_role);

    let extractor = Arc::new(ProfileExtractor::new()?);
    let sink = CsvSink::create(&config.output.file)?;
    let admission = Arc::new(Mutex::new(Admission {
        pipeline: AdmissionPipeline::new(&config.filter),
        sink,
    }));

    let concurrency = config.crawler.max_concurrent_roles.max(1);
    let delay = Duration::from_millis(config.crawler.request_delay_ms);
    let min = config.min_per_role;

    let mut outcomes = Vec::with_capacity(config.roles.len());
    {
        let mut role_stream = stream::iter(config.roles.clone())
            .map(|role| {
                let fetcher = Arc::clone(&fetcher);
                let extractor = Arc::clone(&extractor);
                let admission = Arc::clone(&admission);
                async move { crawl_role(role, min, delay, fetcher, extractor, admission).await }
            })
            .buffer_unordered(concurrency);

        while let Some(result) = role_stream.next().await {
            outcomes.push(result?);
        }
    }

    let admission = Arc::into_inner(admission)
        .ok_or_else(|| AppError::export("admission unit still shared after all roles finished"))?
        .into_inner();

    let stats = RunStats {
        start_time,
        end_time: Utc::now(),
        seen: admission.pipeline.seen(),
        admitted: admission.pipeline.admitted(),
        rejections: admission.pipeline.rejections(),
        roles: outcomes,
    };

    admission.sink.finish()?;
    stats.log_summary();
    Ok(stats)
}

/// Drive one role from its start URL to `Done`.
///
/// Returns `Err` only for fatal conditions (sink failure); exhausted
/// pagination and exhausted fetch retries both end the role normally
/// with whatever count was reached.
async fn crawl_role(
    role: RoleConfig,
    min: usize,
    delay: Duration,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<ProfileExtractor>,
    admission: Arc<Mutex<Admission>>,
) -> Result<RoleOutcome> {
    let mut url = role.start_url.clone();
    let mut pages = 0;
    let mut admitted = 0;
    let mut ending = RoleEnding::PagesExhausted;

    // Processed pages are never revisited; this also stops pagination
    // that cycles back on itself.
    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(url.clone());

    loop {
        log::info!("Parsing {} page {}: {}", role.tag, pages + 1, url);

        let html = match fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(error) => {
                log::warn!(
                    "Ending {} after failed fetch of page {}: {}",
                    role.tag,
                    pages + 1,
                    error
                );
                ending = RoleEnding::FetchFailed;
                break;
            }
        };
        pages += 1;

        let extracted = extractor.extract(&html, &url);
        log::debug!(
            "Extracted {} candidates from {} page {}",
            extracted.candidates.len(),
            role.tag,
            pages
        );

        {
            let mut admission = admission.lock().await;
            for candidate in extracted.candidates {
                let profile = Profile::from_candidate(candidate, &role.tag);
                match admission.pipeline.admit(profile) {
                    Ok(profile) => {
                        admission.sink.write(&profile)?;
                        admitted += 1;
                    }
                    Err(_) => {
                        // Counted and logged by the pipeline.
                    }
                }
            }
        }

        if admitted >= min {
            ending = RoleEnding::QuotaMet;
            log::info!(
                "Quota met for {}: {} profiles over {} pages",
                role.tag,
                admitted,
                pages
            );
            break;
        }

        match extracted.next_page {
            Some(next) => {
                if !visited.insert(next.clone()) {
                    log::warn!(
                        "Pagination for {} cycles back to {}; stopping",
                        role.tag,
                        next
                    );
                    break;
                }
                log::info!("Following pagination to: {}", next);
                url = next;
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            None => {
                log::info!(
                    "No more pagination found for {}. Collected {} profiles.",
                    role.tag,
                    admitted
                );
                break;
            }
        }
    }

    Ok(RoleOutcome {
        tag: role.tag,
        pages,
        admitted,
        ending,
    })
}
