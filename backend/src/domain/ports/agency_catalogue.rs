//! Driving ports for the agency catalogue.

use async_trait::async_trait;

use crate::domain::{Agency, AgencyRequest, Error};

/// Add agencies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgencyCommand: Send + Sync {
    /// Validate and persist an agency.
    async fn create_agency(&self, request: AgencyRequest) -> Result<Agency, Error>;
}

/// Read agencies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgencyQuery: Send + Sync {
    /// Every agency in the catalogue.
    async fn list_agencies(&self) -> Result<Vec<Agency>, Error>;

    /// One agency, or a not-found error.
    async fn get_agency(&self, id: i64) -> Result<Agency, Error>;
}
