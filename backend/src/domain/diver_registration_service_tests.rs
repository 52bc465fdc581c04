//! Tests for the diver registration workflow.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::{
    DirectoryClientError, DirectoryRejection, DirectoryResult, MockDirectoryClient,
    MockDiverRepository, RecordStoreError,
};
use crate::domain::{DirectoryIdentity, DirectoryLookup, Diver, ErrorCode, IdentityKey, NewDiver};

const EMAIL: &str = "diver@example.com";

#[fixture]
fn identity() -> DirectoryIdentity {
    DirectoryIdentity {
        key: IdentityKey::new("resolved-key").expect("valid key"),
        name: "Sylvia Earle".to_owned(),
        friendly_name: Some("Her Deepness".to_owned()),
        birth_date: None,
        gender: None,
        country_code: Some("US".to_owned()),
        time_zone: Some("America/Los_Angeles".to_owned()),
    }
}

fn request() -> DiverRegistrationRequest {
    DiverRegistrationRequest {
        email: Some(EMAIL.to_owned()),
        user_id: Some("caller-supplied".to_owned()),
        dive_number_offset: Some(12),
        ..DiverRegistrationRequest::default()
    }
}

fn stored(row: &NewDiver) -> Diver {
    let now = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).single().expect("valid time");
    Diver {
        user_id: row.user_id.clone(),
        version: 1,
        created_at: now,
        updated_at: now,
        diving_since: row.diving_since,
        dive_number_offset: row.dive_number_offset,
        default_diving_country: row.default_diving_country.clone(),
        default_diving_timezone: row.default_diving_timezone.clone(),
    }
}

fn directory_answering(
    result: Result<DirectoryResult, DirectoryClientError>,
) -> MockDirectoryClient {
    let mut directory = MockDirectoryClient::new();
    directory
        .expect_resolve()
        .withf(|lookup| matches!(lookup, DirectoryLookup::Email(email) if email.as_str() == EMAIL))
        .times(1)
        .return_once(move |_| result);
    directory
}

fn service(
    directory: MockDirectoryClient,
    divers: MockDiverRepository,
) -> DiverRegistrationService<MockDirectoryClient, MockDiverRepository> {
    DiverRegistrationService::new(Arc::new(directory), Arc::new(divers))
}

fn untouched_repository() -> MockDiverRepository {
    let mut divers = MockDiverRepository::new();
    divers.expect_insert().times(0);
    divers
}

#[rstest]
#[tokio::test]
async fn inserts_with_resolved_key_and_merges_identity(identity: DirectoryIdentity) {
    let directory = directory_answering(Ok(DirectoryResult::Success(identity.clone())));
    let mut divers = MockDiverRepository::new();
    divers
        .expect_insert()
        .withf(|row| row.user_id.as_str() == "resolved-key" && row.dive_number_offset == 12)
        .times(1)
        .returning(|row| Ok(stored(row)));

    let profile = service(directory, divers)
        .register(request())
        .await
        .expect("registration succeeds");

    assert_eq!(profile.diver.user_id, identity.key);
    assert_eq!(profile.diver.version, 1);
    assert_eq!(profile.email.as_str(), EMAIL);
    assert_eq!(profile.identity, identity);
}

#[rstest]
#[tokio::test]
async fn missing_account_is_relayed_with_remediation_and_no_insert() {
    let directory = directory_answering(Ok(DirectoryResult::Fail(DirectoryRejection {
        status: 404,
        data: json!({"email": "no matching record found"}),
    })));

    let error = service(directory, untouched_repository())
        .register(request())
        .await
        .expect_err("no account");

    assert_eq!(error.code(), ErrorCode::UpstreamRejected);
    assert_eq!(error.upstream_status(), Some(404));
    let details = error.details().expect("details present");
    assert_eq!(
        details["error"],
        json!(format!(
            "Could not add diver as no active user account could be found for {EMAIL}"
        ))
    );
    assert_eq!(details["action"], json!(NO_ACCOUNT_ACTION));
}

#[rstest]
#[tokio::test]
async fn invalid_input_never_reaches_the_directory() {
    let mut directory = MockDirectoryClient::new();
    directory.expect_resolve().times(0);

    let error = service(directory, untouched_repository())
        .register(DiverRegistrationRequest {
            dive_number_offset: Some(-1),
            ..request()
        })
        .await
        .expect_err("validation failure");

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        error.field_message("dive_number_offset"),
        Some("must not be negative")
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_identity_is_an_email_field_error(identity: DirectoryIdentity) {
    let directory = directory_answering(Ok(DirectoryResult::Success(identity)));
    let mut divers = MockDiverRepository::new();
    divers.expect_insert().times(1).return_once(|_| {
        Err(RecordStoreError::unique_violation(
            "divers",
            "divers_pkey",
            vec!["user_id".to_owned()],
        ))
    });

    let error = service(directory, divers)
        .register(request())
        .await
        .expect_err("duplicate diver");

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        error.field_message("email"),
        Some("a diver with this email address already exists")
    );
}

#[rstest]
#[case::upstream_error(Ok(DirectoryResult::Error { status: 500, message: "db down".to_owned() }))]
#[case::timeout(Err(DirectoryClientError::timeout("operation timed out")))]
#[tokio::test]
async fn directory_failures_abort_without_insert(
    #[case] result: Result<DirectoryResult, DirectoryClientError>,
) {
    let error = service(directory_answering(result), untouched_repository())
        .register(request())
        .await
        .expect_err("server error");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn other_rejections_keep_upstream_status() {
    let directory = directory_answering(Ok(DirectoryResult::Fail(DirectoryRejection {
        status: 422,
        data: json!({"email": "must be a valid email address"}),
    })));

    let error = service(directory, untouched_repository())
        .register(request())
        .await
        .expect_err("relayed rejection");

    assert_eq!(error.upstream_status(), Some(422));
    assert_eq!(
        error.details(),
        Some(&json!({"email": "must be a valid email address"}))
    );
}
