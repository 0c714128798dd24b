//! Shared application state.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::auth::{HeaderIdentityProvider, IdentityProvider};
use crate::config::AuthConfig;
use crate::repository::{
    ProblemRepository, SeaOrmProblemRepository, SeaOrmTagRepository, SeaOrmUserRepository,
    TagRepository, UserRepository,
};

/// Everything a request handler needs; cloned per request through `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub problems: Arc<dyn ProblemRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    /// Create unknown signed-in users instead of rejecting them.
    pub provision_users: bool,
}

impl AppState {
    pub fn new(db: DatabaseConnection, auth: &AuthConfig) -> anyhow::Result<Self> {
        let identity = HeaderIdentityProvider::new(&auth.identity_header)?;

        Ok(Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            problems: Arc::new(SeaOrmProblemRepository::new(db.clone())),
            tags: Arc::new(SeaOrmTagRepository::new(db)),
            identity: Arc::new(identity),
            provision_users: auth.provision_users,
        })
    }
}
