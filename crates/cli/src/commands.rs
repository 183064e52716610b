// ABOUTME: Subcommand execution for the linkedin-jobs CLI.
// ABOUTME: Runs client operations or offline parsers and shapes results into JSON envelopes.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use linkedin_client::{
    decode_body, find_location, Client, EntryLevelSearch, JobSearchParams, JobSearchResult, Location,
    RemoteSearch, INDUSTRIES, JOB_FUNCTIONS, POPULAR_LOCATIONS,
};
use linkedin_extract::{
    extract_total_results, parse_api_job_details, parse_company, parse_company_search_results,
    parse_job_details, parse_job_listings,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::{Command, PageKind};

/// The envelope printed when a command could not produce its result.
pub fn failure(message: &str) -> Value {
    json!({ "success": false, "error": message })
}

fn search_envelope(result: JobSearchResult, search_type: Option<&str>) -> Value {
    let mut out = json!({
        "success": true,
        "totalResults": result.total_results,
        "currentPage": result.current_page,
        "hasMore": result.has_more,
        "jobCount": result.jobs.len(),
        "jobs": result.jobs,
        "searchParams": result.search_params,
    });
    if let Some(kind) = search_type {
        out["searchType"] = json!(kind);
    }
    out
}

pub async fn execute(client: &Client, command: Command) -> Result<Value> {
    let output = match command {
        Command::Search(filters) => {
            let result = client.search_jobs(JobSearchParams::from(filters)).await?;
            search_envelope(result, None)
        }
        Command::Remote {
            keywords,
            date_posted,
            experience_level,
            limit,
        } => {
            let opts = RemoteSearch {
                date_posted,
                experience_level,
                limit,
            };
            let result = client.search_remote_jobs(keywords, opts).await?;
            search_envelope(result, Some("remote_jobs"))
        }
        Command::EntryLevel {
            keywords,
            location,
            no_internships,
            date_posted,
            limit,
        } => {
            let opts = EntryLevelSearch {
                location,
                include_internships: !no_internships,
                date_posted,
                limit,
            };
            let result = client.search_entry_level_jobs(keywords, opts).await?;
            search_envelope(result, Some("entry_level_jobs"))
        }
        Command::Job { id } => match client.get_job_details(&id).await? {
            Some(job) => json!({ "success": true, "job": job }),
            None => failure("Job not found"),
        },
        Command::Company { id } => match client.get_company(&id).await? {
            Some(company) => json!({ "success": true, "company": company }),
            None => failure("Company not found"),
        },
        Command::Companies { query } => {
            let companies = client.search_companies(&query).await?;
            json!({ "success": true, "count": companies.len(), "companies": companies })
        }
        Command::CompanyJobs {
            id,
            keywords,
            limit,
        } => {
            let result = client.get_company_jobs(&id, keywords, limit).await?;
            let mut out = search_envelope(result, None);
            out["companyId"] = json!(id);
            out
        }
        Command::Url(filters) => {
            let params = JobSearchParams::from(filters);
            let url = client.public_search_url(&params);
            json!({ "success": true, "url": url.as_str(), "params": params })
        }
        Command::Locations { name: None } => {
            let locations: Vec<Value> = POPULAR_LOCATIONS.iter().map(location_entry).collect();
            json!({ "success": true, "locations": locations })
        }
        Command::Locations { name: Some(name) } => match find_location(&name) {
            Some(loc) => json!({ "success": true, "locations": [location_entry(loc)] }),
            None => failure(&format!("Unknown location: {}", name)),
        },
        Command::Industries => json!({
            "success": true,
            "industries": INDUSTRIES,
            "note": "Use these industry names when filtering job searches",
        }),
        Command::JobFunctions => json!({
            "success": true,
            "jobFunctions": JOB_FUNCTIONS,
            "note": "Use these job function names when filtering job searches",
        }),
        Command::Parse { kind, input, id } => parse_saved(kind, &input, id.as_deref())?,
    };
    Ok(output)
}

fn location_entry(loc: &Location) -> Value {
    json!({
        "name": loc.name,
        "geoId": loc.geo_id,
        "usage": format!("Use geoId \"{}\" for precise filtering", loc.geo_id),
    })
}

fn required_id<'a>(kind: PageKind, id: Option<&'a str>) -> Result<&'a str> {
    id.filter(|s| !s.trim().is_empty())
        .ok_or_else(|| anyhow!("--id is required to parse a {:?} page", kind))
}

fn parse_saved(kind: PageKind, input: &str, id: Option<&str>) -> Result<Value> {
    let text = load_text(input)?;
    debug!(?kind, "parsing saved page");

    let output = match kind {
        PageKind::Jobs => {
            let jobs = parse_job_listings(&text);
            let total = extract_total_results(&text).unwrap_or(jobs.len() as u64);
            json!({ "success": true, "totalResults": total, "jobCount": jobs.len(), "jobs": jobs })
        }
        PageKind::Job => match parse_job_details(&text, required_id(kind, id)?) {
            Some(job) => json!({ "success": true, "job": job }),
            None => failure("Job page could not be interpreted"),
        },
        PageKind::ApiJob => {
            let id = required_id(kind, id)?;
            let data: Value =
                serde_json::from_str(&text).context("job posting document is not valid JSON")?;
            match parse_api_job_details(&data, id) {
                Some(job) => json!({ "success": true, "job": job }),
                None => failure("Job posting document is not a JSON object"),
            }
        }
        PageKind::Company => match parse_company(&text, required_id(kind, id)?) {
            Some(company) => json!({ "success": true, "company": company }),
            None => failure("Company page could not be interpreted"),
        },
        PageKind::Companies => {
            let companies = parse_company_search_results(&text);
            json!({ "success": true, "count": companies.len(), "companies": companies })
        }
    };
    Ok(output)
}

fn load_text(target: &str) -> Result<String> {
    let bytes = if target == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        let path = Path::new(target);
        if !path.exists() {
            return Err(anyhow!("file not found: {}", target));
        }
        fs::read(path).with_context(|| format!("reading {}", target))?
    };
    debug!(source = target, bytes = bytes.len(), "loaded saved page");
    Ok(decode_body(&bytes, None))
}
