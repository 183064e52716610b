// ABOUTME: Identifier extraction from LinkedIn URNs and URL shapes.
// ABOUTME: Also synthesizes canonical job and company URLs from known-good identifiers.

//! Job and company identifiers.
//!
//! LinkedIn embeds job ids in entity URNs (`urn:li:jobPosting:123`), in
//! `/jobs/view/<id>` paths, and in `currentJobId=`/`jobId=` query parameters.
//! [`job_id_from_url`] tries the URL shapes in a fixed order and stops at the
//! first one that matches.

use once_cell::sync::Lazy;
use regex::Regex;

const JOB_VIEW_BASE: &str = "https://www.linkedin.com/jobs/view";
const COMPANY_BASE: &str = "https://www.linkedin.com/company";

static URN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"jobPosting:(\d+)").unwrap());

/// URL patterns in priority order. The first capture group is the id.
static JOB_URL_PATTERNS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"/jobs/view/(\d+)").unwrap(),
        Regex::new(r"currentJobId=(\d+)").unwrap(),
        Regex::new(r"jobId=(\d+)").unwrap(),
        Regex::new(r"/(\d{10,})").unwrap(),
    ]
});

static COMPANY_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/company/([^/]+)").unwrap());

/// Extracts the numeric job id from an entity URN such as `urn:li:jobPosting:3812345678`.
pub fn job_id_from_urn(urn: &str) -> Option<String> {
    URN_RE
        .captures(urn)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extracts a job id from a LinkedIn URL.
///
/// Tries `/jobs/view/<digits>`, then `currentJobId=<digits>`, then
/// `jobId=<digits>`, then any `/` followed by ten or more digits.
pub fn job_id_from_url(url: &str) -> Option<String> {
    JOB_URL_PATTERNS.iter().find_map(|re| {
        re.captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Extracts the company slug (vanity name or numeric id) from a `/company/<slug>` link.
pub fn company_slug_from_url(url: &str) -> Option<String> {
    COMPANY_SLUG_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Canonical job URL for `id`.
pub fn job_view_url(id: &str) -> String {
    format!("{}/{}", JOB_VIEW_BASE, id)
}

/// Canonical company profile URL for `id`.
pub fn company_url(id: &str) -> String {
    format!("{}/{}", COMPANY_BASE, id)
}
