// ABOUTME: Static reference data for building searches: popular locations with geo ids,
// ABOUTME: industry names, and job function names.

use serde::Serialize;

/// A location LinkedIn can filter on by `geoId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: &'static str,
    pub geo_id: &'static str,
}

const fn loc(name: &'static str, geo_id: &'static str) -> Location {
    Location { name, geo_id }
}

pub const POPULAR_LOCATIONS: &[Location] = &[
    loc("United States", "103644278"),
    loc("New York, NY", "102571732"),
    loc("San Francisco Bay Area", "90000084"),
    loc("Los Angeles, CA", "102448103"),
    loc("Seattle, WA", "104116203"),
    loc("Austin, TX", "104472866"),
    loc("Chicago, IL", "103112676"),
    loc("Boston, MA", "102380872"),
    loc("Denver, CO", "103203548"),
    loc("United Kingdom", "101165590"),
    loc("London, UK", "102257491"),
    loc("Canada", "101174742"),
    loc("Toronto, Canada", "100025096"),
    loc("Germany", "101282230"),
    loc("India", "102713980"),
];

pub const INDUSTRIES: &[&str] = &[
    "Technology, Information and Internet",
    "Hospitals and Health Care",
    "Financial Services",
    "IT Services and IT Consulting",
    "Software Development",
    "Retail",
    "Staffing and Recruiting",
    "Manufacturing",
    "Higher Education",
    "Banking",
    "Insurance",
    "Real Estate",
    "Construction",
    "Marketing Services",
    "Telecommunications",
    "Automotive",
    "Entertainment Providers",
    "Non-profit Organizations",
    "Government Administration",
    "Legal Services",
];

pub const JOB_FUNCTIONS: &[&str] = &[
    "Engineering",
    "Information Technology",
    "Sales",
    "Marketing",
    "Human Resources",
    "Finance",
    "Operations",
    "Product Management",
    "Design",
    "Data Science",
    "Project Management",
    "Business Development",
    "Customer Service",
    "Legal",
    "Research",
    "Quality Assurance",
    "Administrative",
    "Consulting",
    "Writing/Editing",
    "Healthcare Services",
];

/// Looks up a popular location by name, ignoring case.
pub fn find_location(name: &str) -> Option<&'static Location> {
    let wanted = name.trim();
    POPULAR_LOCATIONS
        .iter()
        .find(|l| l.name.eq_ignore_ascii_case(wanted))
}
