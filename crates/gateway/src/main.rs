//! Adelante API Gateway
//!
//! The main entry point for all external API requests.
//! Handles:
//! - Sign-up, sign-in, and session verification
//! - Directory panels (resources, scholarships, mentors, transit)
//! - Study-assistant endpoints backed by a text generation provider
//! - Observability (logging, metrics, tracing)

mod handlers;
mod middleware;

use adelante_catalog::Catalog;
use adelante_common::{
    auth::JwtManager,
    config::AppConfig,
    genai::{self, Assistant},
    identity::{self, IdentityProvider},
    metrics,
};
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<Catalog>,
    pub identity: Arc<dyn IdentityProvider>,
    pub assistant: Arc<Assistant>,
    pub jwt: Arc<JwtManager>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;
    let config = Arc::new(config);

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));
    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    info!("Starting Adelante API Gateway v{}", adelante_common::VERSION);

    // Initialize metrics
    metrics::register_metrics();
    if config.observability.metrics_port != 0 {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .set_buckets_for_metric(
                Matcher::Suffix("request_duration_seconds".to_string()),
                metrics::LATENCY_BUCKETS,
            )?
            .set_buckets_for_metric(
                Matcher::Suffix("generation_duration_seconds".to_string()),
                metrics::GENERATION_BUCKETS,
            )?
            .install()?;
        info!("Metrics exporter listening on {}", addr);
    }

    // Wire up the catalog and the external providers
    let catalog = Arc::new(Catalog::seeded());
    let identity = identity::create_provider(&config.identity)?;
    let assistant = Arc::new(Assistant::new(genai::create_generator(&config.genai)?));
    let jwt = Arc::new(JwtManager::new(
        &config.session.secret,
        config.session.ttl_secs,
    ));

    info!(
        resources = catalog.resources.len(),
        scholarships = catalog.scholarships.len(),
        mentors = catalog.mentors.len(),
        transit_routes = catalog.transit_routes.len(),
        "Catalog seeded"
    );

    let state = AppState {
        config: config.clone(),
        catalog,
        identity,
        assistant,
        jwt,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // Study-assistant routes carry their own rate limit
    let mut study_routes = Router::new()
        .route("/study/answer", post(handlers::study::answer))
        .route("/study/translate", post(handlers::study::translate))
        .route("/study/grammar", post(handlers::study::check_grammar))
        .route("/study/flashcards", post(handlers::study::flashcards));

    if state.config.rate_limit.enabled {
        let limiter = middleware::rate_limit::create_rate_limiter(
            state.config.rate_limit.requests_per_second,
            state.config.rate_limit.burst,
        );
        let limit = state.config.rate_limit.requests_per_second;
        study_routes = study_routes.layer(axum::middleware::from_fn(move |request, next| {
            let limiter = limiter.clone();
            async move {
                middleware::rate_limit::rate_limit_middleware(request, next, limiter, limit).await
            }
        }));
    }

    // Everything behind a session
    let protected_routes = Router::new()
        // Session endpoints
        .route("/auth/signout", post(handlers::auth::sign_out))
        .route("/auth/session", get(handlers::auth::session))
        // Directory panels
        .route("/resources", get(handlers::resources::list))
        .route("/resources/categories", get(handlers::resources::categories))
        .route("/scholarships", get(handlers::scholarships::list))
        .route("/mentors", get(handlers::mentors::list))
        .route("/mentors/specialties", get(handlers::mentors::specialties))
        .route("/transit/routes", get(handlers::transit::list))
        .route("/transit/plan", post(handlers::transit::plan))
        .merge(study_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session::session_middleware,
        ));

    let api_routes = Router::new()
        // Health endpoints (no auth)
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // Account endpoints (no auth)
        .route("/auth/signup", post(handlers::auth::sign_up))
        .route("/auth/signin", post(handlers::auth::sign_in))
        .merge(protected_routes);

    // Compose the app
    Router::new()
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
