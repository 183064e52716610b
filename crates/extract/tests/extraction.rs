// ABOUTME: Integration tests for the extraction layer against guest-page shaped HTML.
// ABOUTME: Covers listings isolation and order, id precedence, detail criteria, and company search filtering.

use linkedin_extract::{
    job_id_from_url, parse_company_search_results, parse_job_details, parse_job_listings,
    ExperienceLevel, JobType, WorkplaceType,
};
use pretty_assertions::assert_eq;

/// One guest search card the way `seeMoreJobPostings` renders it.
fn card(urn: Option<&str>, href: &str, title: &str, extra: &str) -> String {
    let urn_attr = urn
        .map(|u| format!(r#" data-entity-urn="{}""#, u))
        .unwrap_or_default();
    format!(
        r#"<li>
          <div class="base-card relative job-search-card"{urn_attr}>
            <a class="base-card__full-link" href="{href}"><span class="sr-only">{title}</span></a>
            <div class="base-search-card__info">
              <h3 class="base-search-card__title">{title}</h3>
              <h4 class="base-search-card__subtitle"><a href="https://www.linkedin.com/company/acme">Acme</a></h4>
              <div class="base-search-card__metadata">
                <span class="job-search-card__location">Austin, TX</span>
                {extra}
                <time class="job-search-card__listdate" datetime="2024-05-01">1 week ago</time>
              </div>
            </div>
          </div>
        </li>"#
    )
}

fn page(cards: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><body><ul class=\"jobs-search__results-list\">{}</ul></body></html>",
        cards.join("\n")
    )
}

#[test]
fn listings_keep_order_and_drop_cards_without_ids() {
    let html = page(&[
        card(Some("urn:li:jobPosting:1000000001"), "https://www.linkedin.com/jobs/view/1000000001", "One", ""),
        card(None, "https://www.linkedin.com/jobs/view/1000000002?refId=x", "Two", ""),
        card(None, "https://www.linkedin.com/jobs/search/", "No id", ""),
        card(None, "https://www.linkedin.com/jobs/search/?currentJobId=1000000004", "Four", ""),
        card(Some("urn:li:jobPosting:1000000005"), "#", "Five", ""),
    ]);

    let jobs = parse_job_listings(&html);
    let ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, vec!["1000000001", "1000000002", "1000000004", "1000000005"]);

    let titles: Vec<&str> = jobs.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two", "Four", "Five"]);
}

#[test]
fn listings_url_is_always_canonical() {
    let html = page(&[
        card(Some("urn:li:jobPosting:3900000001"), "https://www.linkedin.com/jobs/view/111", "Urn", ""),
        card(None, "https://www.linkedin.com/jobs/collections/recommended/?jobId=3900000002", "Param", ""),
        card(None, "https://lnkd.in/jobs/3900000003", "Long run", ""),
    ]);

    for job in parse_job_listings(&html) {
        assert_eq!(job.url, format!("https://www.linkedin.com/jobs/view/{}", job.id));
    }
}

#[test]
fn urn_takes_priority_over_link() {
    let html = r#"<div class="base-card" data-entity-urn="urn:li:jobPosting:3900000010">
        <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/3900000099">Urn wins</a>
    </div>"#;
    let jobs = parse_job_listings(html);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "3900000010");
}

#[test]
fn nested_wrappers_report_a_job_once() {
    // The `li` resolves through its link, the inner card through its URN: same id.
    let html = page(&[card(
        Some("urn:li:jobPosting:3900000030"),
        "https://www.linkedin.com/jobs/view/3900000030",
        "Once",
        "",
    )]);
    let jobs = parse_job_listings(&html);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title, "Once");
}

#[test]
fn card_badges_are_read_from_full_text() {
    let html = page(&[card(
        Some("urn:li:jobPosting:3900000020"),
        "#",
        "Platform Engineer",
        r#"<span class="job-posting-benefits__text">Easy Apply</span>
           <span class="result-benefits__text">Promoted</span>
           <span class="job-search-card__salary-info"> $150K/yr - $180K/yr </span>
           <span>Remote</span>"#,
    )]);

    let jobs = parse_job_listings(&html);
    let job = &jobs[0];
    assert_eq!(job.workplace_type, WorkplaceType::Remote);
    assert!(job.is_easy_apply);
    assert!(job.is_promoted);
    assert_eq!(job.salary.as_deref(), Some("$150K/yr - $180K/yr"));
    assert_eq!(job.company, "Acme");
    assert_eq!(job.location, "Austin, TX");
    assert_eq!(job.posted_time_ago, "1 week ago");
    assert_eq!(job.posted_date, "2024-05-01");
}

#[test]
fn empty_result_page_yields_nothing() {
    assert!(parse_job_listings("<html><body><p>No matching jobs found.</p></body></html>").is_empty());
    assert!(parse_job_listings("").is_empty());
}

#[test]
fn url_precedence_is_first_pattern_wins() {
    assert_eq!(
        job_id_from_url("https://www.linkedin.com/jobs/view/123?jobId=456"),
        Some("123".to_string())
    );
}

const DETAIL_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <section class="top-card-layout">
    <h1 class="top-card-layout__title topcard__title">Staff Software Engineer</h1>
    <h4 class="top-card-layout__second-subline">
      <span class="topcard__flavor">
        <a class="topcard__org-name-link topcard__flavor--black-link"
           href="https://www.linkedin.com/company/initech?trk=public_jobs_topcard-org-name">
          Initech
        </a>
      </span>
      <span class="topcard__flavor topcard__flavor--bullet">Denver, CO</span>
    </h4>
    <span class="posted-time-ago__text">3 days ago</span>
    <span class="num-applicants__caption">Over 200 applicants</span>
    <div class="salary-main-rail">$190,000.00/yr - $230,000.00/yr</div>
    <button class="jobs-apply-button">Easy Apply</button>
  </section>
  <div class="description__text">
    <div class="show-more-less-html__markup">Own the billing platform. This role is hybrid in Denver.</div>
  </div>
  <ul class="description__job-criteria-list">
    <li class="description__job-criteria-item">
      <h3 class="description__job-criteria-subheader">Seniority level</h3>
      <span class="description__job-criteria-text">Mid-Senior level</span>
    </li>
    <li class="description__job-criteria-item">
      <h3 class="description__job-criteria-subheader">Employment type</h3>
      <span class="description__job-criteria-text">Full-time</span>
    </li>
    <li class="description__job-criteria-item">
      <h3 class="description__job-criteria-subheader">Job function</h3>
      <span class="description__job-criteria-text">Engineering and Information Technology</span>
    </li>
    <li class="description__job-criteria-item">
      <h3 class="description__job-criteria-subheader">Industries</h3>
      <span class="description__job-criteria-text">Retail, Banking</span>
    </li>
  </ul>
</body></html>"#;

#[test]
fn detail_page_full_extraction() {
    let detail = parse_job_details(DETAIL_PAGE, "3912345678").unwrap();
    let s = &detail.summary;

    assert_eq!(s.id, "3912345678");
    assert_eq!(s.title, "Staff Software Engineer");
    assert_eq!(s.company, "Initech");
    assert_eq!(s.location, "Denver, CO");
    assert_eq!(s.posted_time_ago, "3 days ago");
    assert_eq!(s.applicants.as_deref(), Some("Over 200 applicants"));
    assert_eq!(s.salary.as_deref(), Some("$190,000.00/yr - $230,000.00/yr"));
    assert!(s.is_easy_apply);
    assert!(!s.is_promoted);
    assert_eq!(s.workplace_type, WorkplaceType::Hybrid);
    assert_eq!(s.job_type, JobType::FullTime);
    assert_eq!(s.experience_level, Some(ExperienceLevel::MidSenior));
    assert_eq!(s.url, "https://www.linkedin.com/jobs/view/3912345678");

    assert_eq!(
        detail.full_description,
        "Own the billing platform. This role is hybrid in Denver."
    );
    assert_eq!(detail.seniority_level.as_deref(), Some("Mid-Senior level"));
    assert_eq!(detail.employment_type.as_deref(), Some("Full-time"));
    assert_eq!(
        detail.industries,
        Some(vec!["Retail".to_string(), "Banking".to_string()])
    );
    assert_eq!(
        detail.job_functions,
        Some(vec!["Engineering and Information Technology".to_string()])
    );
    assert_eq!(
        detail.company_linked_in_url.as_deref(),
        Some("https://www.linkedin.com/company/initech?trk=public_jobs_topcard-org-name")
    );
    assert_eq!(detail.application_url, None);
}

#[test]
fn detail_page_location_falls_back_to_second_flavor() {
    let html = r#"<h1>Analyst</h1>
        <span class="topcard__flavor">Hooli</span>
        <span class="topcard__flavor">Palo Alto, CA</span>"#;
    let detail = parse_job_details(html, "1").unwrap();
    assert_eq!(detail.summary.title, "Analyst");
    assert_eq!(detail.summary.location, "Palo Alto, CA");
    assert_eq!(detail.summary.company, "Unknown Company");
}

#[test]
fn detail_page_without_criteria_leaves_detail_fields_absent() {
    let detail = parse_job_details("<html><body><h1>Bare</h1></body></html>", "2").unwrap();
    assert_eq!(detail.summary.title, "Bare");
    assert_eq!(detail.summary.location, "Unknown Location");
    assert_eq!(detail.summary.posted_time_ago, "Unknown");
    assert_eq!(detail.summary.job_type, JobType::Other);
    assert_eq!(detail.summary.experience_level, None);
    assert_eq!(detail.summary.applicants, None);
    assert_eq!(detail.summary.salary, None);
    assert_eq!(detail.seniority_level, None);
    assert_eq!(detail.employment_type, None);
    assert_eq!(detail.industries, None);
    assert_eq!(detail.job_functions, None);
    assert_eq!(detail.company_linked_in_url, None);
    assert_eq!(detail.full_description, "");
}

#[test]
fn company_search_drops_rows_without_slug() {
    let row = |href: &str, name: &str| {
        format!(
            r#"<li class="reusable-search__result-container">
                 <a class="app-aware-link" href="{href}">
                   <img class="EntityPhoto-square-3" src="https://media.licdn.com/{name}.png">
                 </a>
                 <span class="entity-result__title-text">{name}</span>
                 <div class="entity-result__primary-subtitle">Software Development</div>
               </li>"#
        )
    };
    let html = format!(
        "<ul>{}{}{}{}</ul>",
        row("https://www.linkedin.com/company/acme/", "Acme"),
        row("https://www.linkedin.com/in/not-a-company/", "Person"),
        row("https://www.linkedin.com/company/1441/", "Globex"),
        row("", "Nothing")
    );

    let entries = parse_company_search_results(&html);
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].id, "acme");
    assert_eq!(entries[0].name, "Acme");
    assert_eq!(entries[0].industry.as_deref(), Some("Software Development"));
    assert_eq!(entries[0].logo.as_deref(), Some("https://media.licdn.com/Acme.png"));
    assert_eq!(entries[0].linked_in_url, "https://www.linkedin.com/company/acme");

    assert_eq!(entries[1].id, "1441");
    assert_eq!(entries[1].linked_in_url, "https://www.linkedin.com/company/1441");
}
