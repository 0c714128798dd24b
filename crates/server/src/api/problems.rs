//! Problem routes.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use leettrack_api_types::{
    DeleteResponse, ProblemPayload, ProblemResponse, ProblemStatsResponse, TagResponse,
};
use leettrack_core::domain::{Difficulty, DomainError, ProblemDraft, ProblemFilter};
use serde::Deserialize;
use tracing::info;

use super::auth::{CurrentUser, ensure_owned, parse_problem_id};
use super::error::AppError;
use super::state::AppState;
use crate::repository::{ProblemRecord, ProblemWrite, TagRecord};

/// Routes under `/problems`, all behind the session guard.
pub fn create_problem_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/problems", get(list_problems).post(create_problem))
        .route("/problems/stats", get(problem_stats))
        .route(
            "/problems/{id}",
            get(get_problem).put(update_problem).delete(delete_problem),
        )
}

/// Query string of `GET /problems`; `All` in a dropdown field means no filter.
#[derive(Debug, Default, Deserialize)]
struct ListProblemsQuery {
    search: Option<String>,
    difficulty: Option<String>,
    topic: Option<String>,
    language: Option<String>,
}

impl ListProblemsQuery {
    fn into_filter(self) -> Result<ProblemFilter, DomainError> {
        let difficulty = self
            .difficulty
            .filter(|value| !value.is_empty() && value != "All")
            .map(|value| value.parse::<Difficulty>())
            .transpose()?;

        Ok(ProblemFilter {
            search: non_empty(self.search),
            difficulty,
            topic: non_empty(self.topic).filter(|value| value != "All"),
            language: non_empty(self.language).filter(|value| value != "All"),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn problem_write(payload: ProblemPayload) -> Result<ProblemWrite, DomainError> {
    let draft = ProblemDraft::new(
        payload.name,
        payload.difficulty.as_deref(),
        payload.code,
        payload.notes,
        payload.leetcode_link,
    )?;

    Ok(ProblemWrite {
        draft,
        topics: payload.topics.unwrap_or_default(),
        languages: payload.languages.unwrap_or_default(),
    })
}

fn tag_response(tag: TagRecord) -> TagResponse {
    TagResponse {
        id: tag.id,
        name: tag.name,
    }
}

impl From<ProblemRecord> for ProblemResponse {
    fn from(record: ProblemRecord) -> Self {
        ProblemResponse {
            id: record.id.to_string(),
            name: record.name,
            difficulty: record.difficulty.to_string(),
            code: record.code,
            notes: record.notes,
            leetcode_link: record.leetcode_link,
            created_at: record.created_at.and_utc(),
            updated_at: record.updated_at.and_utc(),
            topics: record.topics.into_iter().map(tag_response).collect(),
            languages: record.languages.into_iter().map(tag_response).collect(),
        }
    }
}

/// Lists the caller's problems, newest first.
async fn list_problems(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListProblemsQuery>,
) -> Result<Json<Vec<ProblemResponse>>, AppError> {
    let filter = query.into_filter()?;
    let problems = state
        .problems
        .list_by_owner(user.id, &filter)
        .await
        .context("failed to fetch problems")?;

    Ok(Json(problems.into_iter().map(Into::into).collect()))
}

/// Stores a new problem owned by the caller and returns it hydrated.
async fn create_problem(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProblemPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ProblemResponse>), AppError> {
    let Json(payload) = payload?;
    let write = problem_write(payload)?;

    let problem = state
        .problems
        .create(user.id, write)
        .await
        .context("failed to create problem")?;
    info!(
        problem_id = %problem.id,
        user_id = %user.id,
        topics = problem.topics.len(),
        languages = problem.languages.len(),
        "problem created"
    );

    Ok((StatusCode::CREATED, Json(problem.into())))
}

/// One problem, 404 unless the caller owns it.
async fn get_problem(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProblemResponse>, AppError> {
    let problem_id = parse_problem_id(&id)?;

    let problem = state
        .problems
        .find_owned(user.id, problem_id)
        .await
        .context("failed to fetch problem")?
        .ok_or(AppError::NotFound)?;

    Ok(Json(problem.into()))
}

/// Overwrites every field and replaces both tag sets.
async fn update_problem(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ProblemPayload>, JsonRejection>,
) -> Result<Json<ProblemResponse>, AppError> {
    let problem_id = parse_problem_id(&id)?;
    ensure_owned(&state, &user, problem_id).await?;

    let Json(payload) = payload?;
    let write = problem_write(payload)?;

    let problem = state
        .problems
        .update(user.id, problem_id, write)
        .await
        .context("failed to update problem")?
        .ok_or(AppError::NotFound)?;
    info!(
        problem_id = %problem.id,
        user_id = %user.id,
        topics = problem.topics.len(),
        languages = problem.languages.len(),
        "problem updated"
    );

    Ok(Json(problem.into()))
}

/// Deletes the problem and its tag links; the tags themselves stay.
async fn delete_problem(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let problem_id = parse_problem_id(&id)?;

    let deleted = state
        .problems
        .delete(user.id, problem_id)
        .await
        .context("failed to delete problem")?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    info!(problem_id = %problem_id, user_id = %user.id, "problem deleted");

    Ok(Json(DeleteResponse { success: true }))
}

/// Per-difficulty counts over the caller's problems.
async fn problem_stats(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProblemStatsResponse>, AppError> {
    let stats = state
        .problems
        .stats_by_owner(user.id)
        .await
        .context("failed to compute problem stats")?;

    Ok(Json(ProblemStatsResponse {
        total: stats.total,
        easy: stats.easy,
        medium: stats.medium,
        hard: stats.hard,
    }))
}
