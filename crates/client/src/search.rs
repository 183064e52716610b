// ABOUTME: Job search parameters and LinkedIn search URL construction.
// ABOUTME: Builds the guest listings endpoint URL and the browser-facing search URL.

use std::fmt;
use std::str::FromStr;

use linkedin_extract::{ExperienceLevel, JobType, WorkplaceType};
use serde::{Deserialize, Serialize};
use url::Url;

pub const GUEST_SEARCH_PATH: &str = "/jobs-guest/jobs/api/seeMoreJobPostings/search";
pub const PUBLIC_SEARCH_PATH: &str = "/jobs/search/";

/// Posting-age filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DatePosted {
    #[serde(rename = "past-24-hours")]
    Past24Hours,
    #[serde(rename = "past-week")]
    PastWeek,
    #[serde(rename = "past-month")]
    PastMonth,
    #[default]
    #[serde(rename = "any-time")]
    AnyTime,
}

impl DatePosted {
    pub const ALL: [DatePosted; 4] = [
        DatePosted::Past24Hours,
        DatePosted::PastWeek,
        DatePosted::PastMonth,
        DatePosted::AnyTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatePosted::Past24Hours => "past-24-hours",
            DatePosted::PastWeek => "past-week",
            DatePosted::PastMonth => "past-month",
            DatePosted::AnyTime => "any-time",
        }
    }

    /// The `f_TPR` value; `None` means no filter.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            DatePosted::Past24Hours => Some("r86400"),
            DatePosted::PastWeek => Some("r604800"),
            DatePosted::PastMonth => Some("r2592000"),
            DatePosted::AnyTime => None,
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    MostRelevant,
    MostRecent,
}

impl SortBy {
    pub const ALL: [SortBy; 2] = [SortBy::MostRelevant, SortBy::MostRecent];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::MostRelevant => "most-relevant",
            SortBy::MostRecent => "most-recent",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SortBy::MostRelevant => "R",
            SortBy::MostRecent => "DD",
        }
    }
}

macro_rules! keyword_enum_str_impls {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| format!("unknown {}: {}", $what, s))
            }
        }
    };
}

keyword_enum_str_impls!(DatePosted, "date filter");
keyword_enum_str_impls!(SortBy, "sort order");

/// Filters for a job search. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_id: Option<String>,
    /// Radius in miles around `location`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub job_type: Vec<JobType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub experience_level: Vec<ExperienceLevel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub workplace_type: Vec<WorkplaceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<DatePosted>,
    #[serde(skip_serializing_if = "is_false")]
    pub easy_apply: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub under_ten_applicants: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub company_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    /// Result offset; pages are 25 results wide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn joined<T>(items: &[T], code: impl Fn(&T) -> Option<&'static str>) -> Option<String> {
    let codes: Vec<&str> = items.iter().filter_map(code).collect();
    (!codes.is_empty()).then(|| codes.join(","))
}

impl JobSearchParams {
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: Some(keywords.into()),
            ..Default::default()
        }
    }

    fn job_type_codes(&self) -> Option<String> {
        joined(&self.job_type, |t| Some(t.code()))
    }

    fn experience_codes(&self) -> Option<String> {
        joined(&self.experience_level, |e| Some(e.code()))
    }

    /// `Unknown` has no code and is dropped.
    fn workplace_codes(&self) -> Option<String> {
        joined(&self.workplace_type, |w| w.code())
    }

    fn date_code(&self) -> Option<&'static str> {
        self.date_posted.and_then(|d| d.code())
    }
}

fn endpoint(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// URL of the guest listings endpoint for `params`.
///
/// Parameters are emitted in a fixed order; `sortBy` is always present and
/// `start` only when positive.
pub fn build_job_search_url(base: &Url, params: &JobSearchParams) -> Url {
    let mut url = endpoint(base, GUEST_SEARCH_PATH);
    {
        let mut q = url.query_pairs_mut();
        if let Some(keywords) = non_empty(&params.keywords) {
            q.append_pair("keywords", keywords);
        }
        if let Some(location) = non_empty(&params.location) {
            q.append_pair("location", location);
        }
        if let Some(geo_id) = non_empty(&params.geo_id) {
            q.append_pair("geoId", geo_id);
        }
        if let Some(distance) = params.distance.filter(|&d| d > 0) {
            q.append_pair("distance", &distance.to_string());
        }
        if let Some(codes) = params.job_type_codes() {
            q.append_pair("f_JT", &codes);
        }
        if let Some(codes) = params.experience_codes() {
            q.append_pair("f_E", &codes);
        }
        if let Some(codes) = params.workplace_codes() {
            q.append_pair("f_WT", &codes);
        }
        if let Some(code) = params.date_code() {
            q.append_pair("f_TPR", code);
        }
        if params.easy_apply {
            q.append_pair("f_AL", "true");
        }
        if params.under_ten_applicants {
            q.append_pair("f_EA", "true");
        }
        if !params.company_ids.is_empty() {
            q.append_pair("f_C", &params.company_ids.join(","));
        }
        q.append_pair("sortBy", params.sort_by.unwrap_or_default().code());
        if let Some(start) = params.start.filter(|&s| s > 0) {
            q.append_pair("start", &start.to_string());
        }
    }
    url
}

/// Browser-facing search URL for the same filters.
pub fn build_public_search_url(base: &Url, params: &JobSearchParams) -> Url {
    let mut url = endpoint(base, PUBLIC_SEARCH_PATH);
    {
        let mut q = url.query_pairs_mut();
        if let Some(keywords) = non_empty(&params.keywords) {
            q.append_pair("keywords", keywords);
        }
        if let Some(location) = non_empty(&params.location) {
            q.append_pair("location", location);
        }
        if let Some(codes) = params.job_type_codes() {
            q.append_pair("f_JT", &codes);
        }
        if let Some(codes) = params.experience_codes() {
            q.append_pair("f_E", &codes);
        }
        if let Some(codes) = params.workplace_codes() {
            q.append_pair("f_WT", &codes);
        }
        if let Some(code) = params.date_code() {
            q.append_pair("f_TPR", code);
        }
        if params.easy_apply {
            q.append_pair("f_AL", "true");
        }
    }
    url
}
