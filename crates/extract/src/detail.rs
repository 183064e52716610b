// ABOUTME: Job detail page parsing, including the criteria label/value list.
// ABOUTME: Also maps the JSON job-posting shape served by the guest API onto JobDetail.

//! Job details.
//!
//! A detail page is parsed all-or-nothing: if any query in the chain fails the
//! whole call yields `None` rather than a partially populated record.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::error::ExtractError;
use crate::ids::job_view_url;
use crate::jobs::or_fallback;
use crate::mapper::{detect_workplace_type, map_experience_level, map_job_type};
use crate::models::{JobDetail, JobSummary, JobType, WorkplaceType};
use crate::query::{first_attr, first_non_empty_text, optional_text, text_of, Query};
use crate::text::{normalize_whitespace, split_list};

static CRITERIA_ITEM: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li.description__job-criteria-item").unwrap());
static CRITERIA_LABEL: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());
static CRITERIA_VALUE: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());

const TITLE: &[Query] = &[
    Query::css("h1.top-card-layout__title"),
    Query::css("h1.topcard__title"),
    Query::css("h2.top-card-layout__title"),
    Query::css(".top-card-layout__title"),
    Query::css("h1"),
];
const COMPANY: &[Query] = &[
    Query::css("a.topcard__org-name-link"),
    Query::css(".topcard__flavor--black-link"),
    Query::css(r#"a[data-tracking-control-name="public_jobs_topcard-org-name"]"#),
    Query::css(".top-card-layout__second-subline a"),
];
const LOCATION: &[Query] = &[
    Query::css("span.topcard__flavor--bullet"),
    Query::css(".top-card-layout__bullet"),
    Query::nth(".topcard__flavor", 1),
];
const DESCRIPTION: &[Query] = &[
    Query::css("div.show-more-less-html__markup"),
    Query::css(".description__text"),
    Query::css(".show-more-less-html"),
    Query::css("section.description"),
];
const POSTED: &[Query] = &[Query::css("span.posted-time-ago__text")];
const APPLICANTS: &[Query] = &[Query::css("span.num-applicants__caption")];
const SALARY: &[Query] = &[Query::css("div.salary-main-rail")];
const COMPANY_LINK: &[Query] = &[Query::css("a.topcard__org-name-link")];
const APPLY_BUTTON: &[Query] = &[Query::css("button.jobs-apply-button")];
const BODY: &[Query] = &[Query::css("body")];

const SENIORITY: &str = "seniority level";
const EMPLOYMENT_TYPE: &str = "employment type";
const INDUSTRIES: &str = "industries";
const JOB_FUNCTION: &str = "job function";

const API_COMPANY_KEY: &str = "com.linkedin.voyager.deco.jobs.web.shared.WebCompactJobPostingCompany";
const API_ONSITE_APPLY: &str = "com.linkedin.voyager.jobs.ComplexOnsiteApply";
const API_OFFSITE_APPLY: &str = "com.linkedin.voyager.jobs.OffsiteApply";

/// Collects the criteria list into a map keyed by lowercased label.
///
/// Labels lose a trailing colon ("Industries:" and "Industries" are the same
/// key). Runs of whitespace collapse to one space. A repeated label keeps the
/// last value.
pub fn extract_job_criteria(scope: ElementRef<'_>) -> HashMap<String, String> {
    let mut criteria = HashMap::new();
    for item in scope.select(&CRITERIA_ITEM) {
        let label = item
            .select(&CRITERIA_LABEL)
            .next()
            .map(text_of)
            .unwrap_or_default();
        let label = normalize_whitespace(label.trim_end_matches(':')).to_lowercase();
        let value = item
            .select(&CRITERIA_VALUE)
            .next()
            .map(text_of)
            .unwrap_or_default();
        criteria.insert(label, normalize_whitespace(&value));
    }
    criteria
}

fn build_detail(doc: &Html, job_id: &str) -> Result<JobDetail, ExtractError> {
    let root = doc.root_element();

    let title = first_non_empty_text(root, TITLE)?;
    let company = first_non_empty_text(root, COMPANY)?;
    let location = first_non_empty_text(root, LOCATION)?;
    let full_description = first_non_empty_text(root, DESCRIPTION)?;
    let posted_time_ago = first_non_empty_text(root, POSTED)?;
    let applicants = optional_text(root, APPLICANTS)?;
    let salary = optional_text(root, SALARY)?;
    let company_linked_in_url = first_attr(root, COMPANY_LINK, "href")?;
    let is_easy_apply = first_non_empty_text(root, APPLY_BUTTON)?
        .to_lowercase()
        .contains("easy apply");

    // The detail page has no reliable workplace badge; classify from all visible text.
    let page_text = match BODY[0].find(root)? {
        Some(body) => body.text().collect::<String>(),
        None => root.text().collect::<String>(),
    };

    let criteria = extract_job_criteria(root);
    let seniority_level = criteria.get(SENIORITY).cloned();
    let employment_type = criteria.get(EMPLOYMENT_TYPE).cloned();

    Ok(JobDetail {
        summary: JobSummary {
            id: job_id.to_string(),
            title: or_fallback(title, "Unknown Title"),
            company: or_fallback(company, "Unknown Company"),
            company_logo: None,
            location: or_fallback(location, "Unknown Location"),
            workplace_type: detect_workplace_type(&page_text),
            job_type: map_job_type(employment_type.as_deref().unwrap_or_default()),
            experience_level: map_experience_level(seniority_level.as_deref().unwrap_or_default()),
            posted_date: String::new(),
            posted_time_ago: or_fallback(posted_time_ago, "Unknown"),
            applicants,
            salary,
            url: job_view_url(job_id),
            is_easy_apply,
            is_promoted: false,
        },
        full_description,
        seniority_level,
        employment_type,
        industries: criteria.get(INDUSTRIES).map(|v| split_list(v)),
        job_functions: criteria.get(JOB_FUNCTION).map(|v| split_list(v)),
        company_linked_in_url,
        application_url: None,
    })
}

/// Parses a job view page. Returns `None` when the page cannot be interpreted.
pub fn parse_job_details(html: &str, job_id: &str) -> Option<JobDetail> {
    let doc = Html::parse_document(html);
    match build_detail(&doc, job_id) {
        Ok(detail) => Some(detail),
        Err(err) => {
            tracing::debug!(job_id, error = %err, "job detail page not interpretable");
            None
        }
    }
}

fn json_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Renders a JSON scalar as text the way it would print: strings bare, numbers as digits.
fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Maps the guest API's JSON job posting onto a `JobDetail`.
///
/// Returns `None` unless `data` is a JSON object.
pub fn parse_api_job_details(data: &Value, job_id: &str) -> Option<JobDetail> {
    let json = data.as_object()?;

    let company = json
        .get("companyDetails")
        .and_then(|d| d.get(API_COMPANY_KEY))
        .and_then(|c| c.get("companyResolutionResult"))
        .and_then(|r| json_str(r, "name"));
    let apply_method = json.get("applyMethod");
    let is_easy_apply = apply_method
        .and_then(|m| m.get(API_ONSITE_APPLY))
        .is_some_and(|v| !v.is_null());
    let application_url = apply_method
        .and_then(|m| m.get(API_OFFSITE_APPLY))
        .and_then(|o| json_str(o, "companyApplyUrl"))
        .map(str::to_string);
    let listed_at = json.get("listedAt");
    let posted_date = listed_at
        .and_then(Value::as_i64)
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default();

    Some(JobDetail {
        summary: JobSummary {
            id: job_id.to_string(),
            title: json_str(data, "title").unwrap_or("Unknown Title").to_string(),
            company: company.unwrap_or("Unknown Company").to_string(),
            company_logo: None,
            location: json_str(data, "formattedLocation")
                .unwrap_or("Unknown Location")
                .to_string(),
            workplace_type: WorkplaceType::Unknown,
            job_type: JobType::FullTime,
            experience_level: None,
            posted_date,
            posted_time_ago: listed_at
                .and_then(json_text)
                .unwrap_or_else(|| "Unknown".to_string()),
            applicants: None,
            salary: None,
            url: job_view_url(job_id),
            is_easy_apply,
            is_promoted: false,
        },
        full_description: json
            .get("description")
            .and_then(|d| json_str(d, "text"))
            .unwrap_or_default()
            .to_string(),
        seniority_level: None,
        employment_type: None,
        industries: None,
        job_functions: None,
        company_linked_in_url: None,
        application_url,
    })
}
