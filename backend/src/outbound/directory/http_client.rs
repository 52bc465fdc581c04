//! Reqwest-backed user directory client.
//!
//! This adapter owns transport details only: URL construction, the request
//! timeout, transport error mapping and envelope decoding. It performs
//! exactly one request per lookup.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::EnvelopeDto;
use crate::domain::DirectoryLookup;
use crate::domain::ports::{DirectoryClient, DirectoryClientError, DirectoryResult};

/// Lookup timeout used when none is configured.
pub const DEFAULT_DIRECTORY_TIMEOUT: Duration = Duration::from_secs(2);

/// Directory client issuing `GET {base}/v1/user/...` requests.
pub struct DirectoryHttpClient {
    client: Client,
    base_url: Url,
}

impl DirectoryHttpClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn lookup_url(&self, lookup: &DirectoryLookup) -> Result<Url, DirectoryClientError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                DirectoryClientError::invalid_request(format!(
                    "directory base URL {} cannot carry a path",
                    self.base_url
                ))
            })?;
            segments.pop_if_empty().extend(["v1", "user"]);
            match lookup {
                DirectoryLookup::Email(email) => segments.extend(["email", email.as_str()]),
                DirectoryLookup::Key(key) => segments.push(key.as_str()),
            };
        }
        Ok(url)
    }
}

#[async_trait]
impl DirectoryClient for DirectoryHttpClient {
    async fn resolve(
        &self,
        lookup: &DirectoryLookup,
    ) -> Result<DirectoryResult, DirectoryClientError> {
        let url = self.lookup_url(lookup)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_envelope(status, body.as_ref())
    }
}

/// Decode a response body regardless of status; `fail` and `error` envelopes
/// arrive with non-2xx statuses.
fn parse_envelope(status: StatusCode, body: &[u8]) -> Result<DirectoryResult, DirectoryClientError> {
    let envelope: EnvelopeDto = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(error) if status.is_success() => {
            return Err(DirectoryClientError::decode(format!(
                "invalid directory JSON payload: {error}"
            )));
        }
        Err(_) => return Err(map_status_error(status, body)),
    };
    envelope
        .into_domain(status.as_u16())
        .map_err(DirectoryClientError::decode)
}

fn map_transport_error(error: reqwest::Error) -> DirectoryClientError {
    if error.is_timeout() {
        DirectoryClientError::timeout(error.to_string())
    } else {
        DirectoryClientError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DirectoryClientError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            DirectoryClientError::timeout(message)
        }
        _ => DirectoryClientError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Non-network coverage for URL building and envelope mapping.

    use super::*;
    use crate::domain::{EmailAddress, IdentityKey};
    use rstest::rstest;

    fn client(base: &str) -> DirectoryHttpClient {
        DirectoryHttpClient::new(
            Url::parse(base).expect("base url"),
            DEFAULT_DIRECTORY_TIMEOUT,
        )
        .expect("client builds")
    }

    #[rstest]
    #[case::bare("http://directory.test")]
    #[case::trailing_slash("http://directory.test/")]
    fn builds_email_lookup_url(#[case] base: &str) {
        let email = EmailAddress::parse("diver@example.com").expect("email");
        let url = client(base)
            .lookup_url(&DirectoryLookup::Email(email))
            .expect("url builds");

        assert_eq!(url.as_str(), "http://directory.test/v1/user/email/diver@example.com");
    }

    #[test]
    fn keeps_base_path_prefix() {
        let key = IdentityKey::new("abc_123").expect("key");
        let url = client("http://directory.test/api/")
            .lookup_url(&DirectoryLookup::Key(key))
            .expect("url builds");

        assert_eq!(url.as_str(), "http://directory.test/api/v1/user/abc_123");
    }

    #[test]
    fn cannot_be_a_base_url_is_invalid_request() {
        let email = EmailAddress::parse("diver@example.com").expect("email");
        let error = client("mailto:ops@example.com")
            .lookup_url(&DirectoryLookup::Email(email))
            .expect_err("no path segments");

        assert!(matches!(error, DirectoryClientError::InvalidRequest { .. }));
    }

    #[test]
    fn fail_envelope_on_404_is_not_an_error() {
        let result = parse_envelope(
            StatusCode::NOT_FOUND,
            br#"{"status":"fail","data":{"email":"no account"}}"#,
        )
        .expect("envelope decodes");

        assert!(matches!(result, DirectoryResult::Fail(ref rejection) if rejection.is_not_found()));
    }

    #[rstest]
    #[case::ok_garbage(StatusCode::OK, "Decode")]
    #[case::gateway_html(StatusCode::BAD_GATEWAY, "Transport")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "Timeout")]
    fn undecodable_bodies_map_by_status(#[case] status: StatusCode, #[case] expected: &str) {
        let error = parse_envelope(status, b"<html>upstream</html>").expect_err("not JSON");
        let matched = match expected {
            "Decode" => matches!(error, DirectoryClientError::Decode { .. }),
            "Transport" => matches!(error, DirectoryClientError::Transport { .. }),
            "Timeout" => matches!(error, DirectoryClientError::Timeout { .. }),
            _ => panic!("unsupported test expectation: {expected}"),
        };
        assert!(matched, "{status} should map to {expected}, got {error:?}");
    }

    #[test]
    fn body_preview_truncates_long_bodies() {
        let body = "x ".repeat(200);
        let preview = body_preview(body.as_bytes());

        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }
}
