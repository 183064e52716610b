// ABOUTME: Per-item failure isolation for list pages (job cards, company rows).
// ABOUTME: Each item runs guarded; errors and panics downgrade to omission of that item only.

use std::panic::{self, AssertUnwindSafe};

use crate::error::ExtractError;

/// Why an item did not make it into a batch result.
#[derive(Debug)]
pub enum Omission {
    /// The item carried no derivable identifier. A filtering outcome, not a failure.
    NoIdentifier,
    /// Querying the item failed.
    Failed(ExtractError),
    /// The per-item parser panicked.
    Panicked,
}

/// Result of parsing one item of a batch.
#[derive(Debug)]
pub enum ItemOutcome<T> {
    Parsed(T),
    Omitted(Omission),
}

impl<T> ItemOutcome<T> {
    /// Runs `parse` on one item, converting every way it can go wrong into an omission.
    pub fn guard<F>(parse: F) -> Self
    where
        F: FnOnce() -> Result<Option<T>, ExtractError>,
    {
        match panic::catch_unwind(AssertUnwindSafe(parse)) {
            Ok(Ok(Some(value))) => ItemOutcome::Parsed(value),
            Ok(Ok(None)) => ItemOutcome::Omitted(Omission::NoIdentifier),
            Ok(Err(e)) => ItemOutcome::Omitted(Omission::Failed(e)),
            Err(_) => ItemOutcome::Omitted(Omission::Panicked),
        }
    }

    pub fn into_parsed(self) -> Option<T> {
        match self {
            ItemOutcome::Parsed(value) => Some(value),
            ItemOutcome::Omitted(_) => None,
        }
    }
}

/// Parses every item independently and keeps the successes in input order.
///
/// `what` names the item kind in log lines.
pub fn collect_isolated<I, T, F>(items: I, what: &str, mut parse: F) -> Vec<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Result<Option<T>, ExtractError>,
{
    let mut parsed = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        match ItemOutcome::guard(|| parse(item)) {
            ItemOutcome::Parsed(value) => parsed.push(value),
            ItemOutcome::Omitted(Omission::NoIdentifier) => {
                tracing::trace!(index, what, "skipping item without identifier");
            }
            ItemOutcome::Omitted(Omission::Failed(err)) => {
                tracing::debug!(index, what, error = %err, "skipping malformed item");
            }
            ItemOutcome::Omitted(Omission::Panicked) => {
                tracing::debug!(index, what, "skipping item whose parser panicked");
            }
        }
    }
    parsed
}
