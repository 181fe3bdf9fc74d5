use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::CandidateId;
use super::engine::{CriteriaUpdate, MatchPass};
use super::repository::{CandidatePool, MatchSink, MentorFilter};
use super::service::{MatchingService, MatchingServiceError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub mentee_id: CandidateId,
    #[serde(default)]
    pub filter: MentorFilter,
    #[serde(default)]
    pub criteria: Option<CriteriaUpdate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentRequest {
    #[serde(default)]
    pub criteria: Option<CriteriaUpdate>,
}

/// Router builder exposing suggestion and batch assignment endpoints.
pub fn matching_router<P, S>(service: Arc<MatchingService<P, S>>) -> Router
where
    P: CandidatePool + 'static,
    S: MatchSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/matching/suggestions",
            post(suggestion_handler::<P, S>),
        )
        .route(
            "/api/v1/matching/assignments",
            post(assignment_handler::<P, S>),
        )
        .route("/api/v1/matching/criteria", get(criteria_handler::<P, S>))
        .with_state(service)
}

pub(crate) async fn suggestion_handler<P, S>(
    State(service): State<Arc<MatchingService<P, S>>>,
    axum::Json(request): axum::Json<SuggestionRequest>,
) -> Response
where
    P: CandidatePool + 'static,
    S: MatchSink + 'static,
{
    match service.suggest_for(
        &request.mentee_id,
        &request.filter,
        request.criteria.as_ref(),
    ) {
        Ok(suggestion) => {
            let payload = json!({
                "mentee_id": suggestion.mentee_id,
                "relaxed": suggestion.pass == MatchPass::Relaxed,
                "suggestion": suggestion,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assignment_handler<P, S>(
    State(service): State<Arc<MatchingService<P, S>>>,
    axum::Json(request): axum::Json<AssignmentRequest>,
) -> Response
where
    P: CandidatePool + 'static,
    S: MatchSink + 'static,
{
    match service.assign_unmatched(request.criteria.as_ref()) {
        Ok(run) => (StatusCode::OK, axum::Json(run)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn criteria_handler<P, S>(
    State(service): State<Arc<MatchingService<P, S>>>,
) -> Response
where
    P: CandidatePool + 'static,
    S: MatchSink + 'static,
{
    let payload = json!({
        "criteria": service.criteria(),
        "policy": service.policy(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn error_response(error: MatchingServiceError) -> Response {
    let status = match &error {
        MatchingServiceError::MenteeNotFound(_) => StatusCode::NOT_FOUND,
        MatchingServiceError::Matching(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MatchingServiceError::Pool(_) | MatchingServiceError::Sink(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
