use crate::infra::{AppState, InMemoryCandidatePool, InMemoryMatchSink, MatchRecord};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use mentor_match::error::AppError;
use mentor_match::matching::{
    matching_router, CandidatePool, MatchSink, MatchingService, MatchingServiceError, PoolError,
};
use mentor_match::roster::RosterImporter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use tracing::info;

/// Replacement roster snapshots; omitted sides keep their current contents.
#[derive(Debug, Deserialize)]
pub(crate) struct RosterUploadRequest {
    #[serde(default)]
    pub(crate) mentors_csv: Option<String>,
    #[serde(default)]
    pub(crate) mentees_csv: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct RosterUploadResponse {
    pub(crate) mentors: usize,
    pub(crate) mentees: usize,
}

pub(crate) fn with_matching_routes<P, S>(service: Arc<MatchingService<P, S>>) -> axum::Router
where
    P: CandidatePool + 'static,
    S: MatchSink + 'static,
{
    matching_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/roster", axum::routing::put(roster_upload_endpoint))
        .route(
            "/api/v1/matching/history",
            axum::routing::get(history_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn roster_upload_endpoint(
    Extension(pool): Extension<InMemoryCandidatePool>,
    Json(payload): Json<RosterUploadRequest>,
) -> Result<Json<RosterUploadResponse>, AppError> {
    let RosterUploadRequest {
        mentors_csv,
        mentees_csv,
    } = payload;

    if mentors_csv.is_none() && mentees_csv.is_none() {
        return Err(AppError::InvalidInput(
            "provide mentors_csv and/or mentees_csv".to_string(),
        ));
    }

    // Parse both sides before touching the pool so a bad file leaves it unchanged.
    let mentors = mentors_csv
        .map(|csv| RosterImporter::mentors_from_reader(Cursor::new(csv.into_bytes())))
        .transpose()?;
    let mentees = mentees_csv
        .map(|csv| RosterImporter::mentees_from_reader(Cursor::new(csv.into_bytes())))
        .transpose()?;

    let pool_error = |err: PoolError| AppError::from(MatchingServiceError::from(err));
    if let Some(mentors) = mentors {
        pool.replace_mentors(mentors).map_err(pool_error)?;
    }
    if let Some(mentees) = mentees {
        pool.replace_mentees(mentees).map_err(pool_error)?;
    }

    let (mentors, mentees) = pool.counts().map_err(pool_error)?;
    info!(mentors, mentees, "roster replaced");
    Ok(Json(RosterUploadResponse { mentors, mentees }))
}

pub(crate) async fn history_endpoint(
    Extension(sink): Extension<InMemoryMatchSink>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    let history = sink
        .history()
        .map_err(|err| AppError::from(MatchingServiceError::from(err)))?;
    Ok(Json(history))
}
