//! DTOs for the user directory's response envelope.
//!
//! The envelope carries `status` (`success`, `fail` or `error`), an optional
//! `message`, and an optional `data` payload. Decoding happens in two steps:
//! the envelope first, then `data.user` only for `success`.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::{DirectoryRejection, DirectoryResult};
use crate::domain::{DirectoryIdentity, IdentityKey};

const DEFAULT_ERROR_MESSAGE: &str = "user directory reported an error";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum EnvelopeStatusDto {
    Success,
    Fail,
    Error,
}

#[derive(Debug, Deserialize)]
pub(super) struct EnvelopeDto {
    pub(super) status: EnvelopeStatusDto,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelopeDto {
    user: UserDto,
}

#[derive(Debug, Deserialize)]
struct UserDto {
    #[serde(alias = "id")]
    user_id: String,
    name: String,
    #[serde(default)]
    friendly_name: Option<String>,
    #[serde(default)]
    birth_date: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    time_zone: Option<String>,
}

impl EnvelopeDto {
    /// Map the envelope onto the closed result type.
    ///
    /// `status` is the HTTP status the envelope arrived with.
    pub(super) fn into_domain(self, status: u16) -> Result<DirectoryResult, String> {
        match self.status {
            EnvelopeStatusDto::Success => {
                let data = self
                    .data
                    .ok_or_else(|| "success envelope missing data".to_owned())?;
                let envelope: UserEnvelopeDto = serde_json::from_value(data)
                    .map_err(|error| format!("invalid user payload: {error}"))?;
                envelope.user.into_domain().map(DirectoryResult::Success)
            }
            EnvelopeStatusDto::Fail => Ok(DirectoryResult::Fail(DirectoryRejection {
                status,
                data: self.data.unwrap_or(Value::Null),
            })),
            EnvelopeStatusDto::Error => Ok(DirectoryResult::Error {
                status,
                message: self
                    .message
                    .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_owned()),
            }),
        }
    }
}

impl UserDto {
    fn into_domain(self) -> Result<DirectoryIdentity, String> {
        let key = IdentityKey::new(self.user_id)
            .map_err(|error| format!("invalid user_id: {error}"))?;
        let birth_date = self.birth_date.as_deref().map(parse_birth_date).transpose()?;
        Ok(DirectoryIdentity {
            key,
            name: self.name,
            friendly_name: non_empty(self.friendly_name),
            birth_date,
            gender: non_empty(self.gender),
            country_code: non_empty(self.country_code),
            time_zone: non_empty(self.time_zone),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Accept plain dates and RFC 3339 timestamps.
fn parse_birth_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|ts| ts.date_naive()))
        .map_err(|error| format!("invalid birth_date {raw:?}: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn envelope(value: Value) -> EnvelopeDto {
        serde_json::from_value(value).expect("envelope decodes")
    }

    #[rstest]
    fn success_decodes_user() {
        let result = envelope(json!({
            "status": "success",
            "data": {"user": {
                "user_id": "abc-123",
                "name": "Jacques",
                "friendly_name": "",
                "birth_date": "1910-06-11T00:00:00Z",
                "country_code": "FR"
            }}
        }))
        .into_domain(200)
        .expect("maps");

        let DirectoryResult::Success(identity) = result else {
            panic!("expected success, got {result:?}");
        };
        assert_eq!(identity.key.as_str(), "abc-123");
        assert_eq!(identity.friendly_name, None);
        assert_eq!(identity.birth_date, NaiveDate::from_ymd_opt(1910, 6, 11));
        assert_eq!(identity.country_code.as_deref(), Some("FR"));
    }

    #[rstest]
    fn fail_keeps_status_and_data() {
        let result = envelope(json!({"status": "fail", "data": {"email": "not found"}}))
            .into_domain(404)
            .expect("maps");

        assert_eq!(
            result,
            DirectoryResult::Fail(DirectoryRejection {
                status: 404,
                data: json!({"email": "not found"}),
            })
        );
    }

    #[rstest]
    fn error_without_message_gets_default() {
        let result = envelope(json!({"status": "error"}))
            .into_domain(500)
            .expect("maps");

        assert_eq!(
            result,
            DirectoryResult::Error {
                status: 500,
                message: DEFAULT_ERROR_MESSAGE.to_owned(),
            }
        );
    }

    #[rstest]
    #[case::no_data(json!({"status": "success"}))]
    #[case::no_user(json!({"status": "success", "data": {}}))]
    #[case::bad_key(json!({"status": "success", "data": {"user": {"user_id": "", "name": "x"}}}))]
    #[case::bad_birth_date(json!({"status": "success", "data": {"user": {"user_id": "k", "name": "x", "birth_date": "June"}}}))]
    fn malformed_success_is_a_decode_failure(#[case] body: Value) {
        assert!(envelope(body).into_domain(200).is_err());
    }

    #[rstest]
    fn unknown_status_does_not_decode() {
        let decoded = serde_json::from_value::<EnvelopeDto>(json!({"status": "maybe"}));
        assert!(decoded.is_err());
    }
}
