//! HTTP request handlers.

use axum::{Json, body::Bytes, extract::State};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::bank::PublicQuestion;
use crate::grading::{ReviewItem, SubmittedAnswer, grade};
use crate::session::generate_test_id;

use super::error::{ApiError, ApiResult};
use super::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Questions in the bank.
    pub questions: usize,
    /// Stored tests, expired-but-unswept ones included.
    pub sessions: usize,
}

/// Request to start a test.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StartRequest {
    /// Free-form label, only logged.
    pub user: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub success: bool,
    pub test_id: String,
    /// Questions without their answers.
    pub test: Vec<PublicQuestion>,
}

/// Request to grade a test.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubmitRequest {
    pub test_id: String,
    pub user: Option<String>,
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub score: usize,
    pub total: usize,
    pub results: Vec<ReviewItem>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        questions: state.bank.len(),
        sessions: state.sessions.len().await,
    })
}

/// Hand out a new test.
///
/// POST /start
#[instrument(skip_all)]
pub async fn start_test(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<StartResponse>> {
    let request: StartRequest = decode_json(&body)?;

    let test_id = state
        .sessions
        .insert_unique(state.bank.snapshot(), generate_test_id)
        .await;

    info!(
        test_id = %test_id,
        user = request.user.as_deref().unwrap_or_default(),
        questions = state.bank.len(),
        "test started"
    );

    Ok(Json(StartResponse {
        success: true,
        test_id,
        test: state.bank.public_view(),
    }))
}

/// Grade submitted answers against the stored answer key.
///
/// POST /submit
#[instrument(skip_all)]
pub async fn submit_test(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<SubmitResponse>> {
    let request: SubmitRequest = decode_json(&body)?;

    let Some(questions) = state.sessions.get(&request.test_id).await else {
        debug!(test_id = %request.test_id, "unknown or expired test id");
        return Err(ApiError::invalid_test_id());
    };

    let report = grade(&questions, &request.answers);

    info!(
        test_id = %request.test_id,
        user = request.user.as_deref().unwrap_or_default(),
        score = report.score,
        total = report.total,
        answered = request.answers.len(),
        "test graded"
    );

    Ok(Json(SubmitResponse {
        success: true,
        score: report.score,
        total: report.total,
        results: report.results,
    }))
}

/// Fallback for any method other than the one a route accepts.
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// Decode a JSON body regardless of the declared content type.
fn decode_json<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|err| {
        debug!(error = %err, "rejecting request body");
        ApiError::invalid_json()
    })
}
