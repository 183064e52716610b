// ABOUTME: HTTP fetching for LinkedIn guest endpoints.
// ABOUTME: Validates URLs, caps content length, maps status and timeout failures, and decodes charsets.

use std::collections::HashMap;

use bytes::Bytes;

use crate::error::ClientError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Options for fetching a resource.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
    /// Return non-2xx responses instead of failing with `ErrorCode::Status`.
    pub accept_non_success: bool,
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as text, using the content-type charset or detection.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }

    /// Parse the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_slice(&self.body).map_err(|e| {
            ClientError::decode(&self.url, "Fetch", Some(anyhow::anyhow!("invalid JSON: {}", e)))
        })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    lower.split(';').find_map(|part| {
        part.trim()
            .strip_prefix("charset=")
            .map(|cs| cs.trim_matches('"').trim_matches('\'').to_string())
    })
}

fn request_error(url: &str, err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::timeout(url, "Fetch", Some(anyhow::anyhow!("request timed out: {}", err)))
    } else {
        ClientError::fetch(url, "Fetch", Some(anyhow::anyhow!("request failed: {}", err)))
    }
}

/// Fetch a resource from the given URL.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, ClientError> {
    if url.is_empty() {
        return Err(ClientError::invalid_url(url, "Fetch", None));
    }

    let parsed_url = url::Url::parse(url).map_err(|e| {
        ClientError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    let scheme = parsed_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ClientError::invalid_url(
            url,
            "Fetch",
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    tracing::debug!(url, "fetching");

    let mut request = client.get(parsed_url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request.send().await.map_err(|e| request_error(url, e))?;

    let content_length = response.content_length().or_else(|| {
        response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
    });
    if let Some(len) = content_length {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(ClientError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("content too large")),
            ));
        }
    }

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    if !response.status().is_success() && !opts.accept_non_success {
        tracing::debug!(url, status, "non-success response");
        return Err(ClientError::status(url, "Fetch", status));
    }

    let body = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            request_error(url, e)
        } else {
            ClientError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("failed to read body: {}", e)),
            )
        }
    })?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(ClientError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("content too large")),
        ));
    }

    Ok(FetchResult {
        status,
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;

    fn create_test_client() -> reqwest::Client {
        reqwest::Client::builder()
            .user_agent("test-agent")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_ok_utf8() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/jobs/view/1");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<h1>Engineer</h1>");
        });

        let result = fetch(&create_test_client(), &server.url("/jobs/view/1"), &FetchOptions::default())
            .await
            .expect("fetch should succeed");
        mock.assert();

        assert_eq!(result.status, 200);
        assert!(result.is_success());
        assert_eq!(result.content_type.as_deref(), Some("text/html; charset=utf-8"));
        assert_eq!(result.text(), "<h1>Engineer</h1>");
    }

    #[tokio::test]
    async fn test_fetch_sends_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/h")
                .header("accept-language", "en-US,en;q=0.5");
            then.status(200).body("ok");
        });

        let mut opts = FetchOptions::default();
        opts.headers
            .insert("Accept-Language".to_string(), "en-US,en;q=0.5".to_string());
        fetch(&create_test_client(), &server.url("/h"), &opts)
            .await
            .expect("fetch should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_status_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/company/ghost");
            then.status(404).body("not found");
        });

        let err = fetch(&create_test_client(), &server.url("/company/ghost"), &FetchOptions::default())
            .await
            .expect_err("should fail on 404");
        mock.assert();

        assert!(err.is_not_found());
        assert_eq!(err.http_status(), Some(404));
    }

    #[tokio::test]
    async fn test_fetch_non_success_accepted() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/busy");
            then.status(429).body("slow down");
        });

        let opts = FetchOptions {
            accept_non_success: true,
            ..Default::default()
        };
        let result = fetch(&create_test_client(), &server.url("/busy"), &opts)
            .await
            .expect("non-success accepted");
        mock.assert();

        assert_eq!(result.status, 429);
        assert!(!result.is_success());
        assert_eq!(result.text(), "slow down");
    }

    #[tokio::test]
    async fn test_fetch_invalid_urls() {
        let client = create_test_client();
        let opts = FetchOptions::default();

        assert!(fetch(&client, "", &opts).await.unwrap_err().is_invalid_url());
        assert!(fetch(&client, "not a url", &opts).await.unwrap_err().is_invalid_url());
        assert!(fetch(&client, "ftp://www.linkedin.com/jobs", &opts)
            .await
            .unwrap_err()
            .is_invalid_url());
    }

    #[tokio::test]
    async fn test_fetch_decodes_declared_charset() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/latin1");
            then.status(200)
                .header("content-type", "text/html; charset=ISO-8859-1")
                .body(vec![b'M', 0xfc, b'n', b'c', b'h', b'e', b'n']);
        });

        let result = fetch(&create_test_client(), &server.url("/latin1"), &FetchOptions::default())
            .await
            .expect("fetch should succeed");
        assert_eq!(result.text(), "München");
    }

    #[tokio::test]
    async fn test_fetch_json_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"title":"Engineer"}"#);
        });

        let result = fetch(&create_test_client(), &server.url("/api"), &FetchOptions::default())
            .await
            .expect("fetch should succeed");
        let value: serde_json::Value = result.json().expect("valid JSON");
        assert_eq!(value["title"], "Engineer");

        let html = FetchResult {
            body: Bytes::from_static(b"<html></html>"),
            ..result
        };
        assert!(html.json::<serde_json::Value>().unwrap_err().is_decode());
    }

    #[test]
    fn test_extract_charset() {
        assert_eq!(
            extract_charset("text/html; charset=\"UTF-8\""),
            Some("utf-8".to_string())
        );
        assert_eq!(extract_charset("application/json"), None);
    }
}
