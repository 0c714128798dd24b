//! Access guard.
//!
//! Identity comes from an [`IdentityProvider`]; the guard then resolves it
//! to a user row. Problem-scoped checks answer "not found" for problems the
//! caller does not own so that their existence is never confirmed.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use axum::extract::FromRequestParts;
use axum::http::{HeaderName, request::Parts};
use leettrack_core::domain::ProblemId;
use tracing::{info, warn};

use super::error::AppError;
use super::state::AppState;
use crate::repository::{NewUser, UserRecord};

/// Yields the signed-in caller's email from an incoming request.
pub trait IdentityProvider: Send + Sync {
    fn identify(&self, parts: &Parts) -> Option<String>;
}

/// Trusts a header injected by an authenticating reverse proxy.
#[derive(Debug, Clone)]
pub struct HeaderIdentityProvider {
    header: HeaderName,
}

impl HeaderIdentityProvider {
    pub fn new(header: &str) -> anyhow::Result<Self> {
        let header = HeaderName::from_str(header)
            .map_err(|e| anyhow!("invalid identity header name '{header}': {e}"))?;
        Ok(Self { header })
    }
}

impl IdentityProvider for HeaderIdentityProvider {
    fn identify(&self, parts: &Parts) -> Option<String> {
        parts
            .headers
            .get(&self.header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string)
    }
}

/// A request with a session, not yet resolved to a user row.
#[derive(Debug, Clone)]
pub struct SignedIn(pub String);

impl FromRequestParts<Arc<AppState>> for SignedIn {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        state
            .identity
            .identify(parts)
            .map(SignedIn)
            .ok_or(AppError::Unauthenticated)
    }
}

/// The caller's user row.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let SignedIn(email) = SignedIn::from_request_parts(parts, state).await?;
        resolve_user(state, email).await.map(CurrentUser)
    }
}

async fn resolve_user(state: &AppState, email: String) -> Result<UserRecord, AppError> {
    if let Some(user) = state
        .users
        .find_by_email(&email)
        .await
        .context("failed to look up user")?
    {
        return Ok(user);
    }

    if !state.provision_users {
        return Err(AppError::UserNotFound);
    }

    match state
        .users
        .create(NewUser {
            email: email.clone(),
            name: None,
        })
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, "provisioned user on first sign-in");
            Ok(user)
        }
        Err(err) => {
            // A concurrent first request may have inserted the same email.
            warn!(error = %err, "user provisioning failed, retrying lookup");
            state
                .users
                .find_by_email(&email)
                .await
                .context("failed to look up user")?
                .ok_or(AppError::Persistence(err))
        }
    }
}

/// Malformed ids are reported exactly like missing problems.
pub fn parse_problem_id(raw: &str) -> Result<ProblemId, AppError> {
    ProblemId::from_str(raw).map_err(|_| AppError::NotFound)
}

pub async fn ensure_owned(
    state: &AppState,
    user: &UserRecord,
    problem_id: ProblemId,
) -> Result<(), AppError> {
    let owned = state
        .problems
        .is_owned_by(user.id, problem_id)
        .await
        .context("failed to check problem ownership")?;

    if owned { Ok(()) } else { Err(AppError::NotFound) }
}
