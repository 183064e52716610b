// ABOUTME: Error type for extraction failures inside a single parse call.
// ABOUTME: Raised by selector evaluation; parsers downgrade it to omission or None.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while querying a parsed document.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A selector in a fallback chain could not be compiled.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

impl ExtractError {
    /// Creates a Selector error from the selector text and the parser's complaint.
    pub fn selector(selector: impl Into<String>, reason: impl fmt::Display) -> Self {
        ExtractError::Selector {
            selector: selector.into(),
            reason: reason.to_string(),
        }
    }
}
