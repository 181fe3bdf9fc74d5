use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCandidatePool, InMemoryMatchSink};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mentor_match::config::AppConfig;
use mentor_match::error::AppError;
use mentor_match::matching::MatchingService;
use mentor_match::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let pool = InMemoryCandidatePool::from_rosters(args.mentors.as_deref(), args.mentees.as_deref())?;
    if let Ok((mentors, mentees)) = pool.counts() {
        info!(mentors, mentees, "candidate pool seeded");
    }
    let sink = InMemoryMatchSink::new(pool.clone());
    let matching_service = Arc::new(MatchingService::new(
        Arc::new(pool.clone()),
        Arc::new(sink.clone()),
        config.matching.criteria.clone(),
        config.matching.policy.clone(),
    )?);

    let app = with_matching_routes(matching_service)
        .layer(Extension(pool))
        .layer(Extension(sink))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "mentor matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
