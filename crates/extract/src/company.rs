// ABOUTME: Company profile page and company search result parsing.
// ABOUTME: Search rows without a resolvable /company/<slug> link are dropped.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::batch::collect_isolated;
use crate::error::ExtractError;
use crate::ids::{company_slug_from_url, company_url};
use crate::jobs::or_fallback;
use crate::models::{Company, CompanySearchEntry};
use crate::query::{first_attr, first_non_empty_text, optional_text, Query};

static RESULT_ITEM: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li.reusable-search__result-container").unwrap());

const NAME: &[Query] = &[
    Query::css("h1.org-top-card-summary__title"),
    Query::css("h1.top-card-layout__title"),
];
const DESCRIPTION: &[Query] = &[
    Query::css("p.org-top-card-summary__tagline"),
    Query::css(".org-about-company-module__description"),
];
const LOGO: &[Query] = &[Query::css("img.org-top-card-primary-content__logo")];
const INDUSTRY: &[Query] = &[Query::css("div.org-top-card-summary-info-list__info-item")];
const WEBSITE: &[Query] = &[Query::css("a.org-top-card-primary-actions__action")];

const ENTRY_LINK: &[Query] = &[Query::css("a.app-aware-link")];
const ENTRY_NAME: &[Query] = &[Query::css(".entity-result__title-text")];
const ENTRY_INDUSTRY: &[Query] = &[Query::css(".entity-result__primary-subtitle")];
const ENTRY_LOGO: &[Query] = &[Query::css("img.EntityPhoto-square-3")];

fn build_company(doc: &Html, company_id: &str) -> Result<Company, ExtractError> {
    let root = doc.root_element();
    Ok(Company {
        id: company_id.to_string(),
        name: or_fallback(first_non_empty_text(root, NAME)?, "Unknown Company"),
        description: optional_text(root, DESCRIPTION)?,
        logo: first_attr(root, LOGO, "src")?,
        industry: optional_text(root, INDUSTRY)?,
        website: first_attr(root, WEBSITE, "href")?,
        linked_in_url: company_url(company_id),
    })
}

/// Parses a company profile page. Returns `None` when the page cannot be interpreted.
pub fn parse_company(html: &str, company_id: &str) -> Option<Company> {
    let doc = Html::parse_document(html);
    match build_company(&doc, company_id) {
        Ok(company) => Some(company),
        Err(err) => {
            tracing::debug!(company_id, error = %err, "company page not interpretable");
            None
        }
    }
}

fn parse_company_entry(item: ElementRef<'_>) -> Result<Option<CompanySearchEntry>, ExtractError> {
    let Some(id) = first_attr(item, ENTRY_LINK, "href")?
        .as_deref()
        .and_then(company_slug_from_url)
    else {
        return Ok(None);
    };

    Ok(Some(CompanySearchEntry {
        name: first_non_empty_text(item, ENTRY_NAME)?,
        industry: optional_text(item, ENTRY_INDUSTRY)?,
        logo: first_attr(item, ENTRY_LOGO, "src")?,
        linked_in_url: company_url(&id),
        id,
    }))
}

/// Parses a company search result page, keeping only rows with a company slug.
pub fn parse_company_search_results(html: &str) -> Vec<CompanySearchEntry> {
    let doc = Html::parse_document(html);
    collect_isolated(doc.select(&RESULT_ITEM), "company result", parse_company_entry)
}
