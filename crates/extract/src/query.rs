// ABOUTME: Ordered selector-fallback queries over a parsed document or fragment.
// ABOUTME: First element of each selector is inspected; the first non-empty value wins.

//! Document query engine.
//!
//! LinkedIn serves several markup variants for the same logical field. Each
//! field is described by an ordered chain of [`Query`] descriptors:
//! - Queries are tried in order; the first one whose *first* matching element
//!   yields non-empty trimmed text (or attribute value) wins.
//! - Only descendants of the scope element are matched, never the scope itself.
//! - An uncompilable selector aborts the chain with [`ExtractError::Selector`].

use scraper::{ElementRef, Selector};

use crate::error::ExtractError;

/// A location descriptor: a CSS selector plus which match to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub css: &'static str,
    /// Zero-based index among the selector's matches.
    pub nth: usize,
}

impl Query {
    /// Inspect the first element matching `css`.
    pub const fn css(css: &'static str) -> Self {
        Query { css, nth: 0 }
    }

    /// Inspect the `nth` (zero-based) element matching `css`.
    pub const fn nth(css: &'static str, nth: usize) -> Self {
        Query { css, nth }
    }

    fn compile(&self) -> Result<Selector, ExtractError> {
        Selector::parse(self.css).map_err(|e| ExtractError::selector(self.css, e))
    }

    /// Returns the element this query points at within `scope`, if any.
    pub fn find<'a>(&self, scope: ElementRef<'a>) -> Result<Option<ElementRef<'a>>, ExtractError> {
        let selector = self.compile()?;
        Ok(scope.select(&selector).nth(self.nth))
    }
}

/// Concatenated descendant text of `el`, trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Returns the trimmed text of the first query that locates a non-empty element.
///
/// Returns an empty string when every query misses or finds only empty nodes.
pub fn first_non_empty_text(
    scope: ElementRef<'_>,
    queries: &[Query],
) -> Result<String, ExtractError> {
    for query in queries {
        if let Some(el) = query.find(scope)? {
            let text = text_of(el);
            if !text.is_empty() {
                return Ok(text);
            }
        }
    }
    Ok(String::new())
}

/// Returns the trimmed `attr` value of the first query that locates an element carrying it.
pub fn first_attr(
    scope: ElementRef<'_>,
    queries: &[Query],
    attr: &str,
) -> Result<Option<String>, ExtractError> {
    for query in queries {
        if let Some(el) = query.find(scope)? {
            if let Some(value) = el.value().attr(attr) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return Ok(Some(trimmed.to_string()));
                }
            }
        }
    }
    Ok(None)
}

/// Like [`first_non_empty_text`] but maps "nothing found" to `None`.
pub fn optional_text(scope: ElementRef<'_>, queries: &[Query]) -> Result<Option<String>, ExtractError> {
    let text = first_non_empty_text(scope, queries)?;
    Ok(if text.is_empty() { None } else { Some(text) })
}
