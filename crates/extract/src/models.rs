// ABOUTME: Plain record types produced by the extraction layer.
// ABOUTME: Job summaries and details, companies, search entries, and their closed vocabularies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkplaceType {
    OnSite,
    Remote,
    Hybrid,
    #[default]
    Unknown,
}

/// Employment type of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Temporary,
    Internship,
    Volunteer,
    Other,
}

/// Seniority bucket. There is no "unknown" member; absence is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    Internship,
    EntryLevel,
    Associate,
    MidSenior,
    Director,
    Executive,
}

impl WorkplaceType {
    pub const ALL: [WorkplaceType; 4] = [
        WorkplaceType::OnSite,
        WorkplaceType::Remote,
        WorkplaceType::Hybrid,
        WorkplaceType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkplaceType::OnSite => "on-site",
            WorkplaceType::Remote => "remote",
            WorkplaceType::Hybrid => "hybrid",
            WorkplaceType::Unknown => "unknown",
        }
    }

    /// LinkedIn `f_WT` filter code. `Unknown` cannot be filtered on.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            WorkplaceType::OnSite => Some("1"),
            WorkplaceType::Remote => Some("2"),
            WorkplaceType::Hybrid => Some("3"),
            WorkplaceType::Unknown => None,
        }
    }
}

impl JobType {
    pub const ALL: [JobType; 7] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Temporary,
        JobType::Internship,
        JobType::Volunteer,
        JobType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Temporary => "temporary",
            JobType::Internship => "internship",
            JobType::Volunteer => "volunteer",
            JobType::Other => "other",
        }
    }

    /// LinkedIn `f_JT` filter code.
    pub fn code(&self) -> &'static str {
        match self {
            JobType::FullTime => "F",
            JobType::PartTime => "P",
            JobType::Contract => "C",
            JobType::Temporary => "T",
            JobType::Internship => "I",
            JobType::Volunteer => "V",
            JobType::Other => "O",
        }
    }
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 6] = [
        ExperienceLevel::Internship,
        ExperienceLevel::EntryLevel,
        ExperienceLevel::Associate,
        ExperienceLevel::MidSenior,
        ExperienceLevel::Director,
        ExperienceLevel::Executive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Internship => "internship",
            ExperienceLevel::EntryLevel => "entry-level",
            ExperienceLevel::Associate => "associate",
            ExperienceLevel::MidSenior => "mid-senior",
            ExperienceLevel::Director => "director",
            ExperienceLevel::Executive => "executive",
        }
    }

    /// LinkedIn `f_E` filter code.
    pub fn code(&self) -> &'static str {
        match self {
            ExperienceLevel::Internship => "1",
            ExperienceLevel::EntryLevel => "2",
            ExperienceLevel::Associate => "3",
            ExperienceLevel::MidSenior => "4",
            ExperienceLevel::Director => "5",
            ExperienceLevel::Executive => "6",
        }
    }
}

macro_rules! vocabulary_str_impls {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| format!("unknown {}: {}", $what, s))
            }
        }
    };
}

vocabulary_str_impls!(WorkplaceType, "workplace type");
vocabulary_str_impls!(JobType, "job type");
vocabulary_str_impls!(ExperienceLevel, "experience level");

/// One job as it appears on a search result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    pub location: String,
    pub workplace_type: WorkplaceType,
    pub job_type: JobType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    pub posted_date: String,
    pub posted_time_ago: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicants: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub url: String,
    pub is_easy_apply: bool,
    pub is_promoted: bool,
}

/// A job page: the summary fields plus everything only the full posting carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    #[serde(flatten)]
    pub summary: JobSummary,
    pub full_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_functions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_linked_in_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_url: Option<String>,
}

/// A company profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub linked_in_url: String,
}

/// One row of a company search result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySearchEntry {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub linked_in_url: String,
}
