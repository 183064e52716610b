// ABOUTME: CLI for searching LinkedIn jobs and companies through the public guest pages.
// ABOUTME: Prints JSON envelopes to stdout; logs go to stderr via tracing.

mod commands;

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use linkedin_client::{Client, DatePosted, JobSearchParams, Options, SortBy};
use linkedin_extract::{ExperienceLevel, JobType, WorkplaceType};
use serde_json::Value;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "linkedin-jobs")]
#[command(about = "Search LinkedIn jobs and companies and print JSON", long_about = None)]
struct Cli {
    /// Origin to send requests to.
    #[arg(long, global = true, env = "LINKEDIN_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true, env = "LINKEDIN_TIMEOUT_SECS")]
    timeout: Option<u64>,

    /// User-Agent header to send.
    #[arg(long, global = true, env = "LINKEDIN_USER_AGENT")]
    user_agent: Option<String>,

    /// Output compact JSON instead of pretty.
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,

    /// Raise log verbosity on stderr (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search jobs with any combination of filters.
    Search(FilterArgs),
    /// Search remote jobs, defaulting to the past week.
    Remote {
        keywords: String,
        #[arg(long)]
        date_posted: Option<DatePosted>,
        #[arg(long, value_delimiter = ',')]
        experience_level: Vec<ExperienceLevel>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Search entry-level and internship jobs, defaulting to the past week.
    EntryLevel {
        keywords: String,
        #[arg(long)]
        location: Option<String>,
        /// Leave internships out.
        #[arg(long)]
        no_internships: bool,
        #[arg(long)]
        date_posted: Option<DatePosted>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the full details of one job posting.
    Job { id: String },
    /// Show a company profile by id or vanity name.
    Company { id: String },
    /// Search companies by name.
    Companies { query: String },
    /// List open jobs at one company.
    CompanyJobs {
        id: String,
        #[arg(long)]
        keywords: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the browser search URL for a set of filters.
    Url(FilterArgs),
    /// List popular locations and their geo ids.
    Locations {
        /// Show only the location with this name.
        #[arg(long)]
        name: Option<String>,
    },
    /// List common industry names.
    Industries,
    /// List common job function names.
    JobFunctions,
    /// Extract records from a saved page instead of fetching.
    Parse {
        #[arg(value_enum)]
        kind: PageKind,
        /// File to read, or "-" for stdin.
        input: String,
        /// Job or company id the page belongs to (job, api-job and company pages).
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PageKind {
    /// A search results page or listings fragment.
    Jobs,
    /// A job view page.
    Job,
    /// The JSON job posting document.
    ApiJob,
    /// A company profile page.
    Company,
    /// A company search results page.
    Companies,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Search keywords.
    keywords: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    geo_id: Option<String>,
    /// Radius in miles around the location.
    #[arg(long)]
    distance: Option<u32>,
    #[arg(long, value_delimiter = ',')]
    job_type: Vec<JobType>,
    #[arg(long, value_delimiter = ',')]
    experience_level: Vec<ExperienceLevel>,
    #[arg(long, value_delimiter = ',')]
    workplace_type: Vec<WorkplaceType>,
    #[arg(long)]
    date_posted: Option<DatePosted>,
    #[arg(long)]
    easy_apply: bool,
    #[arg(long)]
    under_ten_applicants: bool,
    #[arg(long = "company-id", value_delimiter = ',')]
    company_ids: Vec<String>,
    #[arg(long)]
    sort_by: Option<SortBy>,
    /// Result offset (pages are 25 wide).
    #[arg(long)]
    start: Option<u64>,
    /// Maximum jobs to return (at most 50).
    #[arg(long)]
    limit: Option<usize>,
}

impl From<FilterArgs> for JobSearchParams {
    fn from(args: FilterArgs) -> Self {
        JobSearchParams {
            keywords: args.keywords,
            location: args.location,
            geo_id: args.geo_id,
            distance: args.distance,
            job_type: args.job_type,
            experience_level: args.experience_level,
            workplace_type: args.workplace_type,
            date_posted: args.date_posted,
            easy_apply: args.easy_apply,
            under_ten_applicants: args.under_ten_applicants,
            company_ids: args.company_ids,
            sort_by: args.sort_by,
            start: args.start,
            limit: args.limit,
        }
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "warn,linkedin_client=debug,linkedin_extract=debug,linkedin_jobs=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn build_client(cli: &Cli) -> Result<Client> {
    let mut opts = Options::from_env();
    if let Some(base_url) = &cli.base_url {
        opts.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(secs) = cli.timeout.filter(|&s| s > 0) {
        opts.timeout = Duration::from_secs(secs);
    }
    if let Some(agent) = &cli.user_agent {
        opts.user_agent = agent.clone();
    }
    Ok(Client::new(opts)?)
}

fn print_json(output: &Value, compact: bool) -> Result<()> {
    let text = if compact {
        serde_json::to_string(output)?
    } else {
        serde_json::to_string_pretty(output)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text)?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = match build_client(&cli) {
        Ok(client) => commands::execute(&client, cli.command)
            .await
            .unwrap_or_else(|err| commands::failure(&format!("{:#}", err))),
        Err(err) => commands::failure(&format!("{:#}", err)),
    };

    if let Err(err) = print_json(&output, cli.compact) {
        eprintln!("error: {:#}", err);
        return ExitCode::from(1);
    }

    if output.get("success").and_then(Value::as_bool) == Some(false) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
