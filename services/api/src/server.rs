use crate::cli::ServeArgs;
use crate::infra::{scoring_engine, AppState, InMemorySessionRepository};
use crate::routes::with_game_routes;
use archpath::config::AppConfig;
use archpath::error::AppError;
use archpath::game::GameService;
use archpath::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let engine = scoring_engine(&config);
    for conflict in engine.catalog().conflicts() {
        warn!(
            company = %conflict.company,
            phase = %conflict.phase,
            group = %conflict.group,
            tiers = ?conflict.tiers,
            "service group listed in more than one tier"
        );
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySessionRepository::default());
    let game_service = Arc::new(GameService::new(repository, Arc::new(engine)));

    let app = with_game_routes(game_service, config.game.default_flavor)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        flavor = config.game.default_flavor.id(),
        lean_bonus = ?config.game.lean_bonus,
        "archpath scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
