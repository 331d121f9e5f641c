//! Shared application state for the gateway

use std::sync::Arc;

use roster_config::DatabaseConfig;
use roster_database::SqlitePool;
use roster_users::{UserRepository, UserService};

use crate::error::{GatewayError, GatewayResult};

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    /// User service
    pub user_service: Arc<UserService<UserRepository>>,
}

impl GatewayState {
    /// Create a new gateway state over an already migrated pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            user_service: Arc::new(UserService::new(pool)),
        }
    }

    /// Create gateway state from database configuration
    pub async fn from_config(config: &DatabaseConfig) -> GatewayResult<Self> {
        let pool = roster_database::initialize_database(config)
            .await
            .map_err(|e| {
                GatewayError::InternalError(format!("Failed to initialize database: {e}"))
            })?;

        Ok(Self::new(pool))
    }

    /// Get a user service reference
    pub fn user_service(&self) -> &UserService<UserRepository> {
        &self.user_service
    }
}
