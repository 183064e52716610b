// ABOUTME: Extraction core for LinkedIn guest pages: job cards, job details, companies.
// ABOUTME: Re-exports the parsers, record models, field mappers, and identifier helpers.

//! LinkedIn page extraction.
//!
//! Turns raw HTML (and the JSON job-posting shape) served by LinkedIn's public
//! guest endpoints into plain records. Every parser is a synchronous, pure
//! function over an already-fetched document: no I/O, no shared state.
//!
//! # Example
//!
//! ```
//! use linkedin_extract::parse_job_listings;
//!
//! let html = r#"<ul><li>
//!   <div class="base-card" data-entity-urn="urn:li:jobPosting:3812345678">
//!     <h3 class="base-search-card__title">Backend Engineer</h3>
//!   </div>
//! </li></ul>"#;
//!
//! let jobs = parse_job_listings(html);
//! assert_eq!(jobs[0].id, "3812345678");
//! assert_eq!(jobs[0].url, "https://www.linkedin.com/jobs/view/3812345678");
//! ```

pub mod batch;
pub mod company;
pub mod detail;
pub mod error;
pub mod ids;
pub mod jobs;
pub mod mapper;
pub mod models;
pub mod query;
pub mod text;

pub use crate::batch::{collect_isolated, ItemOutcome, Omission};
pub use crate::company::{parse_company, parse_company_search_results};
pub use crate::detail::{extract_job_criteria, parse_api_job_details, parse_job_details};
pub use crate::error::ExtractError;
pub use crate::ids::{
    company_slug_from_url, company_url, job_id_from_url, job_id_from_urn, job_view_url,
};
pub use crate::jobs::{extract_total_results, parse_job_card, parse_job_listings};
pub use crate::mapper::{detect_workplace_type, map_experience_level, map_job_type};
pub use crate::models::{
    Company, CompanySearchEntry, ExperienceLevel, JobDetail, JobSummary, JobType, WorkplaceType,
};
pub use crate::query::{first_attr, first_non_empty_text, text_of, Query};
