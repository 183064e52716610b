// ABOUTME: The Client struct that fetches LinkedIn guest pages and hands them to the extractors.
// ABOUTME: Provides job search, job detail, company lookup, and company search operations.

use linkedin_extract::{
    extract_total_results, parse_api_job_details, parse_company, parse_company_search_results,
    parse_job_details, parse_job_listings, Company, CompanySearchEntry, ExperienceLevel, JobDetail,
    WorkplaceType,
};
use serde_json::Value;
use url::Url;

use crate::error::ClientError;
use crate::options::{ClientBuilder, Options};
use crate::resource::{fetch, FetchOptions, FetchResult};
use crate::result::JobSearchResult;
use crate::search::{build_job_search_url, build_public_search_url, DatePosted, JobSearchParams};

/// Filters for [`Client::search_remote_jobs`].
#[derive(Debug, Clone, Default)]
pub struct RemoteSearch {
    /// Defaults to the past week.
    pub date_posted: Option<DatePosted>,
    pub experience_level: Vec<ExperienceLevel>,
    pub limit: Option<usize>,
}

/// Filters for [`Client::search_entry_level_jobs`].
#[derive(Debug, Clone)]
pub struct EntryLevelSearch {
    pub location: Option<String>,
    pub include_internships: bool,
    /// Defaults to the past week.
    pub date_posted: Option<DatePosted>,
    pub limit: Option<usize>,
}

impl Default for EntryLevelSearch {
    fn default() -> Self {
        Self {
            location: None,
            include_internships: true,
            date_posted: None,
            limit: None,
        }
    }
}

/// Client for LinkedIn's public guest pages.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    base: Url,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, ClientError> {
        let base = Url::parse(&opts.base_url).map_err(|e| {
            ClientError::invalid_url(
                &opts.base_url,
                "NewClient",
                Some(anyhow::anyhow!("invalid base URL: {}", e)),
            )
        })?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ClientError::invalid_url(
                &opts.base_url,
                "NewClient",
                Some(anyhow::anyhow!("scheme must be http or https")),
            ));
        }

        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    ClientError::fetch(
                        &opts.base_url,
                        "NewClient",
                        Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                    )
                })?,
        };

        Ok(Self {
            opts,
            base,
            http_client,
        })
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Browser-facing search URL for `params` on this client's origin.
    pub fn public_search_url(&self, params: &JobSearchParams) -> Url {
        build_public_search_url(&self.base, params)
    }

    /// Resolves path segments against the base origin, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        url
    }

    async fn get(&self, url: &Url, op: &str) -> Result<FetchResult, ClientError> {
        let opts = FetchOptions {
            headers: self.opts.headers.clone(),
            accept_non_success: false,
        };
        fetch(&self.http_client, url.as_str(), &opts)
            .await
            .map_err(|e| e.in_op(op))
    }

    /// Fetches one page of guest search results.
    pub async fn search_jobs(&self, params: JobSearchParams) -> Result<JobSearchResult, ClientError> {
        let url = build_job_search_url(&self.base, &params);
        let page = self.get(&url, "SearchJobs").await?;
        let html = page.text();

        let jobs = parse_job_listings(&html);
        let total = extract_total_results(&html);
        tracing::debug!(found = jobs.len(), total = ?total, "parsed job listings");

        Ok(JobSearchResult::assemble(jobs, total, params))
    }

    /// Remote-only search, defaulting to postings from the past week.
    pub async fn search_remote_jobs(
        &self,
        keywords: impl Into<String>,
        opts: RemoteSearch,
    ) -> Result<JobSearchResult, ClientError> {
        let params = JobSearchParams {
            keywords: Some(keywords.into()),
            workplace_type: vec![WorkplaceType::Remote],
            date_posted: Some(opts.date_posted.unwrap_or(DatePosted::PastWeek)),
            experience_level: opts.experience_level,
            limit: opts.limit,
            ..Default::default()
        };
        self.search_jobs(params).await
    }

    /// Entry-level (and, unless excluded, internship) search.
    pub async fn search_entry_level_jobs(
        &self,
        keywords: impl Into<String>,
        opts: EntryLevelSearch,
    ) -> Result<JobSearchResult, ClientError> {
        let mut levels = vec![ExperienceLevel::EntryLevel];
        if opts.include_internships {
            levels.push(ExperienceLevel::Internship);
        }
        let params = JobSearchParams {
            keywords: Some(keywords.into()),
            location: opts.location,
            experience_level: levels,
            date_posted: Some(opts.date_posted.unwrap_or(DatePosted::PastWeek)),
            limit: opts.limit,
            ..Default::default()
        };
        self.search_jobs(params).await
    }

    /// Full details of one posting.
    ///
    /// The guest posting endpoint is tried first; its body is read as the JSON
    /// posting shape when it parses as JSON and as a job page otherwise. If
    /// that request fails the public job page is fetched instead. `Ok(None)`
    /// means the posting does not exist.
    pub async fn get_job_details(&self, job_id: &str) -> Result<Option<JobDetail>, ClientError> {
        let api_url = self.endpoint(&["jobs-guest", "jobs", "api", "jobPosting", job_id]);
        match self.get(&api_url, "GetJobDetails").await {
            Ok(page) => return Ok(interpret_posting(&page, job_id)),
            Err(err) => {
                tracing::warn!(job_id, error = %err, "guest posting endpoint failed, falling back to job page");
            }
        }

        let html_url = self.endpoint(&["jobs", "view", job_id]);
        match self.get(&html_url, "GetJobDetails").await {
            Ok(page) => Ok(parse_job_details(&page.text(), job_id)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// A company profile by numeric id or vanity slug. `Ok(None)` on 404.
    pub async fn get_company(&self, company_id: &str) -> Result<Option<Company>, ClientError> {
        let url = self.endpoint(&["company", company_id]);
        match self.get(&url, "GetCompany").await {
            Ok(page) => Ok(parse_company(&page.text(), company_id)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn search_companies(&self, query: &str) -> Result<Vec<CompanySearchEntry>, ClientError> {
        let mut url = self.endpoint(&["search", "results", "companies", ""]);
        url.query_pairs_mut().append_pair("keywords", query);
        let page = self.get(&url, "SearchCompanies").await?;

        let entries = parse_company_search_results(&page.text());
        tracing::debug!(found = entries.len(), "parsed company search results");
        Ok(entries)
    }

    /// Job search restricted to one company.
    pub async fn get_company_jobs(
        &self,
        company_id: &str,
        keywords: Option<String>,
        limit: Option<usize>,
    ) -> Result<JobSearchResult, ClientError> {
        let params = JobSearchParams {
            keywords,
            company_ids: vec![company_id.to_string()],
            limit,
            ..Default::default()
        };
        self.search_jobs(params).await
    }
}

fn interpret_posting(page: &FetchResult, job_id: &str) -> Option<JobDetail> {
    match page.json::<Value>() {
        Ok(value) => parse_api_job_details(&value, job_id),
        Err(_) => parse_job_details(&page.text(), job_id),
    }
}
