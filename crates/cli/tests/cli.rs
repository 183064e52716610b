// ABOUTME: Integration tests for the linkedin-jobs CLI binary.
// ABOUTME: Covers offline parsing of saved pages, reference listings, and fetch commands against httpmock.

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn cli_cmd() -> Command {
    let mut cmd = Command::cargo_bin("linkedin-jobs").unwrap();
    cmd.env_remove("LINKEDIN_BASE_URL")
        .env_remove("LINKEDIN_TIMEOUT_SECS")
        .env_remove("LINKEDIN_USER_AGENT")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

const LISTING: &str = r#"<ul class="jobs-search__results-list">
  <li><div class="base-card" data-entity-urn="urn:li:jobPosting:4200000001">
    <h3 class="base-search-card__title">Rust Engineer</h3>
    <h4 class="base-search-card__subtitle"><a href="/company/ferris">Ferris Co</a></h4>
    <span class="job-search-card__location">Remote</span>
  </div></li>
  <li><div class="base-card">
    <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/4200000002"></a>
    <h3 class="base-search-card__title">Go Engineer</h3>
  </div></li>
  <li><div class="base-card"><h3 class="base-search-card__title">No id</h3></div></li>
</ul>"#;

#[test]
fn parse_jobs_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("search.html");
    fs::write(&path, LISTING).unwrap();

    let out = stdout_json(cli_cmd().arg("parse").arg("jobs").arg(&path));
    assert_eq!(out["success"], true);
    assert_eq!(out["jobCount"], 2);
    assert_eq!(out["jobs"][0]["id"], "4200000001");
    assert_eq!(out["jobs"][0]["company"], "Ferris Co");
    assert_eq!(out["jobs"][0]["workplaceType"], "remote");
    assert_eq!(out["jobs"][1]["url"], "https://www.linkedin.com/jobs/view/4200000002");
}

#[test]
fn parse_api_job_from_stdin() {
    let doc = r#"{"title":"Platform Engineer","formattedLocation":"Remote",
                  "description":{"text":"Build the platform"}}"#;
    let out = stdout_json(
        cli_cmd()
            .args(["parse", "api-job", "-", "--id", "77"])
            .write_stdin(doc),
    );
    assert_eq!(out["job"]["id"], "77");
    assert_eq!(out["job"]["title"], "Platform Engineer");
    assert_eq!(out["job"]["fullDescription"], "Build the platform");
}

#[test]
fn parse_job_requires_id() {
    cli_cmd()
        .args(["parse", "job", "-"])
        .write_stdin("<h1>Anything</h1>")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"success\": false"))
        .stdout(predicate::str::contains("--id is required"));
}

#[test]
fn parse_missing_file_fails() {
    cli_cmd()
        .args(["parse", "companies", "/definitely/not/here.html"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("file not found"));
}

#[test]
fn reference_lists() {
    let out = stdout_json(cli_cmd().arg("locations"));
    assert_eq!(out["locations"].as_array().map(Vec::len), Some(15));
    assert_eq!(out["locations"][0]["geoId"], "103644278");

    let out = stdout_json(cli_cmd().args(["locations", "--name", "london, uk"]));
    assert_eq!(out["locations"][0]["geoId"], "102257491");
    cli_cmd()
        .args(["locations", "--name", "Atlantis"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unknown location: Atlantis"));

    let out = stdout_json(cli_cmd().arg("industries"));
    assert_eq!(out["industries"].as_array().map(Vec::len), Some(20));

    let out = stdout_json(cli_cmd().arg("job-functions"));
    assert_eq!(out["jobFunctions"][0], "Engineering");
}

#[test]
fn url_builds_public_search_link() {
    let out = stdout_json(cli_cmd().args([
        "url",
        "rust",
        "--location",
        "Berlin",
        "--workplace-type",
        "remote,hybrid",
        "--date-posted",
        "past-week",
    ]));
    assert_eq!(
        out["url"],
        "https://www.linkedin.com/jobs/search/?keywords=rust&location=Berlin&f_WT=2%2C3&f_TPR=r604800"
    );
}

#[test]
fn invalid_filter_value_is_rejected_by_clap() {
    cli_cmd()
        .args(["url", "--date-posted", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown date filter"));
}

#[test]
fn compact_output_is_one_line() {
    let output = cli_cmd()
        .args(["industries", "--compact"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.trim_end().lines().count(), 1);
}

#[test]
fn search_fetches_from_base_url() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/jobs-guest/jobs/api/seeMoreJobPostings/search")
            .query_param("keywords", "rust")
            .query_param("f_JT", "F,C")
            .query_param("sortBy", "R");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(LISTING);
    });

    let base = server.base_url();
    let out = stdout_json(cli_cmd().args([
        "search",
        "rust",
        "--job-type",
        "full-time,contract",
        "--base-url",
        base.as_str(),
    ]));
    mock.assert();
    assert_eq!(out["success"], true);
    assert_eq!(out["jobCount"], 2);
    assert_eq!(out["totalResults"], 2);
    assert_eq!(out["currentPage"], 1);
    assert_eq!(out["hasMore"], false);
}

#[test]
fn missing_company_exits_nonzero() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/company/ghost-inc");
        then.status(404);
    });

    cli_cmd()
        .env("LINKEDIN_BASE_URL", server.base_url())
        .args(["company", "ghost-inc"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Company not found"));
}

#[test]
fn upstream_error_is_reported_in_envelope() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search/results/companies/");
        then.status(500);
    });

    let base = server.base_url();
    cli_cmd()
        .args(["companies", "acme", "--base-url", base.as_str()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("HTTP status 500"));
}
