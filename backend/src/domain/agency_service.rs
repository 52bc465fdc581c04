//! Agency catalogue service. No directory involvement.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::identity_resolution::map_record_store_error;
use super::ports::{AgencyCommand, AgencyQuery, AgencyRepository};
use super::{Agency, AgencyRequest, Error};

/// Agency service implementing [`AgencyCommand`] and [`AgencyQuery`].
#[derive(Clone)]
pub struct AgencyService<A> {
    agencies: Arc<A>,
}

impl<A> AgencyService<A> {
    /// Create a service over an agency repository.
    pub fn new(agencies: Arc<A>) -> Self {
        Self { agencies }
    }
}

#[async_trait]
impl<A> AgencyCommand for AgencyService<A>
where
    A: AgencyRepository,
{
    async fn create_agency(&self, request: AgencyRequest) -> Result<Agency, Error> {
        let agency = request.validate()?;
        let stored = self
            .agencies
            .insert(&agency)
            .await
            .map_err(map_record_store_error)?;
        info!(agency_id = stored.id, common_name = %stored.common_name, "agency created");
        Ok(stored)
    }
}

#[async_trait]
impl<A> AgencyQuery for AgencyService<A>
where
    A: AgencyRepository,
{
    async fn list_agencies(&self) -> Result<Vec<Agency>, Error> {
        self.agencies.list().await.map_err(map_record_store_error)
    }

    async fn get_agency(&self, id: i64) -> Result<Agency, Error> {
        self.agencies
            .find_by_id(id)
            .await
            .map_err(map_record_store_error)?
            .ok_or_else(|| Error::not_found(format!("agency {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockAgencyRepository, RecordStoreError};
    use rstest::rstest;

    fn request() -> AgencyRequest {
        AgencyRequest {
            common_name: Some("SSI".to_owned()),
            full_name: Some("Scuba Schools International".to_owned()),
            acronym: None,
            url: None,
        }
    }

    fn service(repo: MockAgencyRepository) -> AgencyService<MockAgencyRepository> {
        AgencyService::new(Arc::new(repo))
    }

    #[rstest]
    #[tokio::test]
    async fn creates_agency() {
        let mut repo = MockAgencyRepository::new();
        repo.expect_insert().times(1).returning(|row| {
            Ok(Agency {
                id: 3,
                common_name: row.common_name.clone(),
                full_name: row.full_name.clone(),
                acronym: row.acronym.clone(),
                url: None,
            })
        });

        let agency = service(repo).create_agency(request()).await.expect("created");

        assert_eq!(agency.id, 3);
        assert_eq!(agency.full_name, "Scuba Schools International");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_name_is_keyed_by_column() {
        let mut repo = MockAgencyRepository::new();
        repo.expect_insert().times(1).return_once(|_| {
            Err(RecordStoreError::unique_violation(
                "agencies",
                "agencies_common_name_key",
                vec!["common_name".to_owned()],
            ))
        });

        let error = service(repo).create_agency(request()).await.expect_err("duplicate");

        assert_eq!(error.code(), ErrorCode::ValidationFailed);
        assert_eq!(
            error.field_message("common_name"),
            Some("a record already exists for this value")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_request_skips_insert() {
        let mut repo = MockAgencyRepository::new();
        repo.expect_insert().times(0);

        let error = service(repo)
            .create_agency(AgencyRequest::default())
            .await
            .expect_err("invalid");

        assert_eq!(error.code(), ErrorCode::ValidationFailed);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_agency_is_not_found() {
        let mut repo = MockAgencyRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let error = service(repo).get_agency(42).await.expect_err("missing");

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "agency 42 not found");
    }
}
