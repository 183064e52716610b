// ABOUTME: Assembly of one page of job search results from parsed listings.
// ABOUTME: Applies the result limit, total fallback, page number, and has-more heuristic.

use linkedin_extract::JobSummary;
use serde::Serialize;

use crate::search::JobSearchParams;

/// Results the guest endpoint returns per page.
pub const PAGE_SIZE: u64 = 25;
pub const DEFAULT_JOB_LIMIT: usize = 25;
pub const MAX_JOB_LIMIT: usize = 50;

/// One page of job search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchResult {
    pub jobs: Vec<JobSummary>,
    pub total_results: u64,
    pub current_page: u64,
    pub has_more: bool,
    pub search_params: JobSearchParams,
}

impl JobSearchResult {
    /// Builds the page from everything the listings fragment yielded.
    ///
    /// `has_more` looks at the untruncated count: a full page means the
    /// endpoint probably has another one.
    pub fn assemble(
        mut jobs: Vec<JobSummary>,
        scraped_total: Option<u64>,
        params: JobSearchParams,
    ) -> Self {
        let limit = params
            .limit
            .filter(|&l| l > 0)
            .unwrap_or(DEFAULT_JOB_LIMIT)
            .min(MAX_JOB_LIMIT);
        let start = params.start.unwrap_or(0);
        let found = jobs.len() as u64;

        let total_results = scraped_total
            .filter(|&t| t > 0)
            .unwrap_or_else(|| found.saturating_add(start));
        let has_more = found >= PAGE_SIZE;
        jobs.truncate(limit);

        Self {
            jobs,
            total_results,
            current_page: start / PAGE_SIZE + 1,
            has_more,
            search_params: params,
        }
    }
}
