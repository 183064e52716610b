// ABOUTME: Job search result parsing: one card fragment to a JobSummary, and whole result pages.
// ABOUTME: Also scrapes the best-effort total result count from the page header.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::batch::collect_isolated;
use crate::error::ExtractError;
use crate::ids::{job_id_from_url, job_id_from_urn, job_view_url};
use crate::mapper::detect_workplace_type;
use crate::models::{JobSummary, JobType};
use crate::query::{first_attr, first_non_empty_text, optional_text, Query};
use crate::text::parse_number;

static CARD_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.base-card, li").unwrap());

const LINK: &[Query] = &[Query::css("a.base-card__full-link, a")];
const TITLE: &[Query] = &[
    Query::css("h3.base-search-card__title"),
    Query::css(".base-search-card__title"),
];
const COMPANY: &[Query] = &[
    Query::css("h4.base-search-card__subtitle a"),
    Query::css("h4.base-search-card__subtitle"),
];
const LOGO: &[Query] = &[Query::css("img.artdeco-entity-image"), Query::css("img")];
const LOCATION: &[Query] = &[Query::css(".job-search-card__location")];
const POSTED: &[Query] = &[Query::css("time")];
const SALARY: &[Query] = &[Query::css(".job-search-card__salary-info")];
const TOTAL: &[Query] = &[Query::css("span.results-context-header__job-count")];

/// Resolves the card's job id: entity URN on the card first, then its link.
fn card_job_id(card: ElementRef<'_>) -> Result<Option<String>, ExtractError> {
    if let Some(id) = card
        .value()
        .attr("data-entity-urn")
        .and_then(job_id_from_urn)
    {
        return Ok(Some(id));
    }
    Ok(first_attr(card, LINK, "href")?.and_then(|href| job_id_from_url(&href)))
}

/// Parses one search result card.
///
/// Returns `Ok(None)` when no job id can be derived from the card: such a
/// fragment carries nothing actionable and is dropped.
pub fn parse_job_card(card: ElementRef<'_>) -> Result<Option<JobSummary>, ExtractError> {
    let Some(id) = card_job_id(card)? else {
        return Ok(None);
    };

    let title = first_non_empty_text(card, TITLE)?;
    let company = first_non_empty_text(card, COMPANY)?;
    let company_logo = first_attr(card, LOGO, "data-delayed-url")?;
    let location = first_non_empty_text(card, LOCATION)?;
    let posted_time_ago = first_non_empty_text(card, POSTED)?;
    let posted_date = first_attr(card, POSTED, "datetime")?.unwrap_or_default();
    let salary = optional_text(card, SALARY)?;

    // Badges ("Remote", "Easy Apply", "Promoted") can sit anywhere in the card.
    let card_text = card.text().collect::<String>().to_lowercase();

    Ok(Some(JobSummary {
        url: job_view_url(&id),
        id,
        title: or_fallback(title, "Unknown Title"),
        company: or_fallback(company, "Unknown Company"),
        company_logo,
        location: or_fallback(location, "Unknown Location"),
        workplace_type: detect_workplace_type(&card_text),
        job_type: JobType::FullTime,
        experience_level: None,
        posted_date,
        posted_time_ago: or_fallback(posted_time_ago, "Unknown"),
        applicants: None,
        salary,
        is_easy_apply: card_text.contains("easy apply"),
        is_promoted: card_text.contains("promoted"),
    }))
}

/// Parses every job card on a search result page, in document order.
///
/// Cards without an id, or whose parsing fails, are skipped individually.
/// Listing markup nests `div.base-card` inside `li`, so both wrappers resolve
/// to the same job; only the first record per id is kept.
pub fn parse_job_listings(html: &str) -> Vec<JobSummary> {
    let doc = Html::parse_document(html);
    let mut jobs = collect_isolated(doc.select(&CARD_SELECTOR), "job card", parse_job_card);

    let mut seen = HashSet::new();
    jobs.retain(|job| seen.insert(job.id.clone()));
    jobs
}

/// Scrapes the total result count from a search page header, if present and positive.
pub fn extract_total_results(html: &str) -> Option<u64> {
    let doc = Html::parse_document(html);
    let text = first_non_empty_text(doc.root_element(), TOTAL).ok()?;
    parse_number(&text).filter(|&n| n > 0)
}

pub(crate) fn or_fallback(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
