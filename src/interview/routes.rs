//! REST endpoints for driving interviews over HTTP.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use crate::error::{Error, InterviewError};
use crate::interview::manager::InterviewManager;
use crate::interview::topic::TopicAnswers;

/// Shared state for interview routes.
#[derive(Clone)]
pub struct InterviewRouteState {
    pub manager: Arc<InterviewManager>,
}

fn interview_error(err: InterviewError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match err {
        InterviewError::SessionNotFound { .. } => StatusCode::NOT_FOUND,
        InterviewError::FeatureNotInVocabulary { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        InterviewError::NotFinished { .. } => StatusCode::CONFLICT,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

/// POST /api/interview — create a session.
async fn create_session(State(state): State<InterviewRouteState>) -> impl IntoResponse {
    let id = state.manager.create_session().await;
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": id })),
    )
}

/// GET /api/interview/{id} — session status.
async fn get_status(
    State(state): State<InterviewRouteState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.manager.status(id).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => interview_error(e).into_response(),
    }
}

/// GET /api/interview/{id}/next — what the interview wants next.
async fn get_next(
    State(state): State<InterviewRouteState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.manager.next_step(id).await {
        Ok(step) => Json(step).into_response(),
        Err(e) => interview_error(e).into_response(),
    }
}

/// POST /api/interview/{id}/answers — submit a topic's answers.
async fn post_answers(
    State(state): State<InterviewRouteState>,
    Path(id): Path<Uuid>,
    Json(answers): Json<TopicAnswers>,
) -> impl IntoResponse {
    match state.manager.submit(id, answers).await {
        Ok(step) => Json(step).into_response(),
        Err(e) => interview_error(e).into_response(),
    }
}

/// POST /api/interview/{id}/reset — explicit reset to a fresh interview.
async fn post_reset(
    State(state): State<InterviewRouteState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.manager.reset(id).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => interview_error(e).into_response(),
    }
}

/// GET /api/interview/{id}/result — final prediction plus recommendations.
///
/// A classifier failure is surfaced as a plain message; the session stays in
/// its Done phase so the client can reset.
async fn get_result(
    State(state): State<InterviewRouteState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.manager.outcome(id).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(Error::Interview(e)) => interview_error(e).into_response(),
        Err(e) => {
            tracing::error!(session = %id, error = %e, "final prediction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Prediction failed. Reset the interview and try again."
                })),
            )
                .into_response()
        }
    }
}

/// GET /api/interview/{id}/explain — the decision path taken so far.
async fn get_explain(
    State(state): State<InterviewRouteState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.manager.explain(id).await {
        Ok(text) => Json(serde_json::json!({ "explanation": text })).into_response(),
        Err(e) => interview_error(e).into_response(),
    }
}

/// Build the interview REST routes.
pub fn interview_routes(state: InterviewRouteState) -> Router {
    Router::new()
        .route("/api/interview", post(create_session))
        .route("/api/interview/{id}", get(get_status))
        .route("/api/interview/{id}/next", get(get_next))
        .route("/api/interview/{id}/answers", post(post_answers))
        .route("/api/interview/{id}/reset", post(post_reset))
        .route("/api/interview/{id}/result", get(get_result))
        .route("/api/interview/{id}/explain", get(get_explain))
        .with_state(state)
}
