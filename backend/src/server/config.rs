//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use diver_service::outbound::directory::DirectoryHttpClient;
use diver_service::outbound::persistence::DbPool;

/// Everything the server needs to wire adapters and bind.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) directory: Arc<DirectoryHttpClient>,
}

impl ServerConfig {
    /// Construct a server configuration from the shared adapters.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, directory: DirectoryHttpClient) -> Self {
        Self {
            bind_addr,
            db_pool,
            directory: Arc::new(directory),
        }
    }
}
