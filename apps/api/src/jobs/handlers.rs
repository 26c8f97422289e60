//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::accounts::extract::CurrentUser;
use crate::errors::AppError;
use crate::jobs::posting::{my_postings, post_job};
use crate::jobs::search::{find_jobs, SearchOutcome};
use crate::models::job::{Job, NewJob, PostingWithMatches};
use crate::routes::pagination::Pagination;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub skill: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub outcome: SearchOutcome,
    pub message: String,
}

/// POST /jobs/
///
/// Returns as soon as the job is stored; matching seekers are notified in the background.
pub async fn handle_create_job(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<NewJob>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = post_job(
        state.store.as_ref(),
        &state.notifications,
        user.actor(),
        request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /jobs/
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Job>>, AppError> {
    let (skip, limit) = page.clamped();
    Ok(Json(state.store.list_jobs(skip, Some(limit)).await?))
}

/// GET /jobs/mine
pub async fn handle_my_postings(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<PostingWithMatches>>, AppError> {
    Ok(Json(my_postings(state.store.as_ref(), user.actor()).await?))
}

/// GET /jobs/search?skill=&location=
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let jobs = state.store.list_jobs(0, None).await?;
    let outcome = find_jobs(&jobs, params.skill.as_deref(), params.location.as_deref())?;
    Ok(Json(SearchResponse {
        message: outcome.render(),
        outcome,
    }))
}
