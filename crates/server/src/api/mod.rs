//! HTTP routes.

pub mod auth;
pub mod error;
pub mod problems;
pub mod state;
pub mod tags;

use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use leettrack_api_types::HealthCheckResponse;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::CorsConfig;

pub use auth::{CurrentUser, HeaderIdentityProvider, IdentityProvider, SignedIn};
pub use error::AppError;
pub use problems::create_problem_router;
pub use state::AppState;
pub use tags::create_tag_router;

/// Builds the full application router.
pub fn create_app(state: Arc<AppState>, cors: &CorsConfig) -> anyhow::Result<Router> {
    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| anyhow!("invalid CORS origin '{origin}': {e}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let cors_layer = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/health", get(health))
        .merge(create_problem_router())
        .merge(create_tag_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state))
}

async fn health() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::ok())
}
