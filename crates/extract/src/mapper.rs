// ABOUTME: Keyword classifiers mapping free text onto workplace, job type, and experience vocabularies.
// ABOUTME: Each is an ordered, case-insensitive substring cascade; first matching rule wins.

//! Field mapping.
//!
//! Rule order is significant: ambiguous text such as "Remote or Hybrid"
//! classifies by whichever rule comes first. None of these functions fail;
//! no signal yields the vocabulary's default.

use crate::models::{ExperienceLevel, JobType, WorkplaceType};

const WORKPLACE_RULES: &[(&[&str], WorkplaceType)] = &[
    (&["remote"], WorkplaceType::Remote),
    (&["hybrid"], WorkplaceType::Hybrid),
    (&["on-site", "onsite"], WorkplaceType::OnSite),
];

const JOB_TYPE_RULES: &[(&[&str], JobType)] = &[
    (&["full-time", "full time"], JobType::FullTime),
    (&["part-time", "part time"], JobType::PartTime),
    (&["contract"], JobType::Contract),
    (&["temporary"], JobType::Temporary),
    (&["internship"], JobType::Internship),
    (&["volunteer"], JobType::Volunteer),
];

const EXPERIENCE_RULES: &[(&[&str], ExperienceLevel)] = &[
    (&["internship"], ExperienceLevel::Internship),
    (&["entry"], ExperienceLevel::EntryLevel),
    (&["associate"], ExperienceLevel::Associate),
    (&["mid", "senior"], ExperienceLevel::MidSenior),
    (&["director"], ExperienceLevel::Director),
    (&["executive"], ExperienceLevel::Executive),
];

fn first_rule<T: Copy>(text: &str, rules: &[(&[&str], T)]) -> Option<T> {
    let lower = text.to_lowercase();
    rules
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, value)| *value)
}

/// Classifies a workplace type from any text; `Unknown` when no keyword is present.
pub fn detect_workplace_type(text: &str) -> WorkplaceType {
    first_rule(text, WORKPLACE_RULES).unwrap_or(WorkplaceType::Unknown)
}

/// Maps an employment-type label ("Full-time", "Contract") to a `JobType`; `Other` otherwise.
pub fn map_job_type(text: &str) -> JobType {
    first_rule(text, JOB_TYPE_RULES).unwrap_or(JobType::Other)
}

/// Maps a seniority label ("Mid-Senior level") to an `ExperienceLevel`.
pub fn map_experience_level(text: &str) -> Option<ExperienceLevel> {
    first_rule(text, EXPERIENCE_RULES)
}
