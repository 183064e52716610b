// ABOUTME: Error types for the LinkedIn client including the ErrorCode enum and ClientError struct.
// ABOUTME: Carries the failing URL and operation, with constructors and boolean helpers per category.

use std::fmt;

/// Categories of client failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Fetch,
    /// The server answered with a non-success HTTP status.
    Status(u16),
    Timeout,
    Decode,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidUrl => write!(f, "invalid URL"),
            ErrorCode::Fetch => write!(f, "fetch error"),
            ErrorCode::Status(status) => write!(f, "HTTP status {}", status),
            ErrorCode::Timeout => write!(f, "timeout"),
            ErrorCode::Decode => write!(f, "decode error"),
        }
    }
}

/// The error type for every client operation.
#[derive(Debug, thiserror::Error)]
pub struct ClientError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "linkedin: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ClientError {
    fn with_code(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a Fetch error.
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Fetch, url, op, source)
    }

    /// Create a Status error for a non-success response.
    pub fn status(url: impl Into<String>, op: impl Into<String>, status: u16) -> Self {
        Self::with_code(ErrorCode::Status(status), url, op, None)
    }

    /// Create a Timeout error.
    pub fn timeout(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Timeout, url, op, source)
    }

    /// Create a Decode error.
    pub fn decode(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Decode, url, op, source)
    }

    /// Re-labels the operation, keeping code, URL and source.
    pub fn in_op(mut self, op: impl Into<String>) -> Self {
        self.op = op.into();
        self
    }

    /// The HTTP status, for Status errors.
    pub fn http_status(&self) -> Option<u16> {
        match self.code {
            ErrorCode::Status(status) => Some(status),
            _ => None,
        }
    }

    /// Returns true if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::Status(404)
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    /// Returns true if this is a Decode error.
    pub fn is_decode(&self) -> bool {
        self.code == ErrorCode::Decode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_includes_op_url_and_code() {
        let err = ClientError::status("https://www.linkedin.com/company/x", "GetCompany", 503);
        assert_eq!(
            err.to_string(),
            "linkedin: GetCompany https://www.linkedin.com/company/x: HTTP status 503"
        );

        let err = ClientError::fetch("u", "Fetch", Some(anyhow::anyhow!("connection reset")));
        assert_eq!(err.to_string(), "linkedin: Fetch u: fetch error: connection reset");
    }

    #[test]
    fn test_helpers() {
        let not_found = ClientError::status("u", "Fetch", 404);
        assert!(not_found.is_not_found());
        assert_eq!(not_found.http_status(), Some(404));
        assert!(!not_found.is_fetch());

        let gone = ClientError::status("u", "Fetch", 410);
        assert!(!gone.is_not_found());

        assert!(ClientError::timeout("u", "Fetch", None).is_timeout());
        assert!(ClientError::invalid_url("", "Fetch", None).is_invalid_url());
        assert!(ClientError::decode("u", "Fetch", None).is_decode());
        assert_eq!(ClientError::fetch("u", "Fetch", None).http_status(), None);
    }

    #[test]
    fn test_in_op_relabels() {
        let err = ClientError::status("u", "Fetch", 500).in_op("SearchJobs");
        assert_eq!(err.op, "SearchJobs");
        assert_eq!(err.code, ErrorCode::Status(500));
    }
}
