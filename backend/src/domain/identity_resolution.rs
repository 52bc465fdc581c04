//! Shared steps of the identity resolution workflow.
//!
//! Both diver and buddy creation ask the user directory about an email
//! address and branch on its three-state answer. Only the not-found branch
//! differs between them, so it is handed back to the caller; every other
//! outcome is mapped here.

use tracing::{error, warn};

use super::ports::{
    DirectoryClient, DirectoryClientError, DirectoryRejection, DirectoryResult, RecordStoreError,
};
use super::{DirectoryIdentity, DirectoryLookup, EmailAddress, Error, translate_conflict};

/// Outcome of an email lookup that the workflow must branch on.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Resolution {
    /// The directory confirmed an active account.
    Resolved(DirectoryIdentity),
    /// No active account matched.
    NotFound(DirectoryRejection),
}

/// Ask the directory about `email`.
///
/// Non-404 rejections are relayed with the directory's status and payload.
/// Directory-side errors and transport failures become opaque server errors;
/// the upstream detail is logged, never returned.
pub(crate) async fn resolve_email<C>(directory: &C, email: &EmailAddress) -> Result<Resolution, Error>
where
    C: DirectoryClient + ?Sized,
{
    let lookup = DirectoryLookup::Email(email.clone());
    match directory.resolve(&lookup).await {
        Ok(DirectoryResult::Success(identity)) => Ok(Resolution::Resolved(identity)),
        Ok(DirectoryResult::Fail(rejection)) if rejection.is_not_found() => {
            Ok(Resolution::NotFound(rejection))
        }
        Ok(DirectoryResult::Fail(rejection)) => {
            warn!(status = rejection.status, "user directory rejected lookup");
            Err(Error::upstream_rejected(
                rejection.status,
                "the user directory rejected the lookup",
            )
            .with_details(rejection.data))
        }
        Ok(DirectoryResult::Error { status, message }) => {
            error!(status, upstream_message = %message, "user directory reported an error");
            Err(Error::internal(format!("user directory error: {message}")))
        }
        Err(client_error) => Err(map_client_error(&client_error)),
    }
}

fn map_client_error(client_error: &DirectoryClientError) -> Error {
    match client_error {
        DirectoryClientError::Timeout { .. } => {
            error!(error = %client_error, "user directory lookup timed out");
        }
        _ => error!(error = %client_error, "user directory lookup failed"),
    }
    Error::internal(client_error.to_string())
}

/// Map a record store failure, translating known uniqueness conflicts.
pub(crate) fn map_record_store_error(store_error: RecordStoreError) -> Error {
    if let Some(conflict) = translate_conflict(&store_error) {
        return conflict.into_error();
    }
    match store_error {
        RecordStoreError::Connection { message } => {
            Error::service_unavailable(format!("record store unavailable: {message}"))
        }
        other => {
            error!(error = %other, "record store operation failed");
            Error::internal(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockDirectoryClient;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn email() -> EmailAddress {
        EmailAddress::parse("diver@example.com").expect("valid email")
    }

    fn directory_returning(
        result: Result<DirectoryResult, DirectoryClientError>,
    ) -> MockDirectoryClient {
        let mut directory = MockDirectoryClient::new();
        directory
            .expect_resolve()
            .times(1)
            .return_once(move |_| result);
        directory
    }

    #[rstest]
    #[tokio::test]
    async fn not_found_is_handed_back(email: EmailAddress) {
        let rejection = DirectoryRejection {
            status: 404,
            data: json!({"email": "no account"}),
        };
        let directory = directory_returning(Ok(DirectoryResult::Fail(rejection.clone())));

        let resolution = resolve_email(&directory, &email).await.expect("handled");

        assert_eq!(resolution, Resolution::NotFound(rejection));
    }

    #[rstest]
    #[tokio::test]
    async fn other_rejections_are_relayed_verbatim(email: EmailAddress) {
        let directory = directory_returning(Ok(DirectoryResult::Fail(DirectoryRejection {
            status: 403,
            data: json!({"email": "account suspended"}),
        })));

        let error = resolve_email(&directory, &email).await.expect_err("relayed");

        assert_eq!(error.code(), ErrorCode::UpstreamRejected);
        assert_eq!(error.upstream_status(), Some(403));
        assert_eq!(error.details(), Some(&json!({"email": "account suspended"})));
    }

    #[rstest]
    #[case::protocol_error(Ok(DirectoryResult::Error { status: 500, message: "db down".to_owned() }))]
    #[case::timeout(Err(DirectoryClientError::timeout("2s elapsed")))]
    #[case::transport(Err(DirectoryClientError::transport("connection refused")))]
    #[case::decode(Err(DirectoryClientError::decode("not json")))]
    #[tokio::test]
    async fn failures_become_internal_errors(
        email: EmailAddress,
        #[case] result: Result<DirectoryResult, DirectoryClientError>,
    ) {
        let directory = directory_returning(result);

        let error = resolve_email(&directory, &email).await.expect_err("server error");

        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[rstest]
    fn connection_failures_are_unavailable() {
        let error = map_record_store_error(RecordStoreError::connection("pool exhausted"));
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    fn unknown_unique_violations_are_internal() {
        let error = map_record_store_error(RecordStoreError::unique_violation(
            "divers",
            "divers_mystery_key",
            Vec::<String>::new(),
        ));
        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
