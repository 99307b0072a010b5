//! APM API Server
//!
//! A credit application processing service: applicant intake, automated
//! approval, agreement signing and paginated listings.
//! Uses hexagonal (ports & adapters) architecture for clean separation of
//! concerns; all cross-request coordination goes through the database's
//! transactional and uniqueness guarantees.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    PostgresAgreementRepository, PostgresApplicantRepository, PostgresApplicationRepository,
};
use app::{
    AgreementLedger, ApplicantRegistry, ApplicationWorkflow, ApprovalEngine, RandomDecision,
    Validator,
};
use config::Config;

type PostgresWorkflow = ApplicationWorkflow<
    PostgresApplicantRepository,
    PostgresApplicationRepository,
    PostgresAgreementRepository,
>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<PostgresWorkflow>,
    pub registry: Arc<ApplicantRegistry<PostgresApplicantRepository>>,
    pub page_size: u64,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,apm_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting APM API...");

    // Load configuration
    let config = Config::from_env();

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connected");

    // Create adapters
    let applicant_repo = Arc::new(PostgresApplicantRepository::new(db.clone()));
    let application_repo = Arc::new(PostgresApplicationRepository::new(db.clone()));
    let agreement_repo = Arc::new(PostgresAgreementRepository::new(db.clone()));

    // Create application services
    let validator = Validator::new();
    let registry = Arc::new(ApplicantRegistry::new(
        applicant_repo.clone(),
        validator.clone(),
    ));
    let ledger = AgreementLedger::new(agreement_repo.clone());
    let engine = ApprovalEngine::new(
        application_repo.clone(),
        ledger.clone(),
        Arc::new(RandomDecision),
    );
    let workflow = Arc::new(ApplicationWorkflow::new(
        validator,
        registry.as_ref().clone(),
        engine,
        ledger,
        application_repo.clone(),
        config.page_size,
        config.evaluation_max_attempts,
    ));

    // Create app state
    let state = AppState {
        workflow,
        registry,
        page_size: config.page_size,
    };

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(health))
        // Credit application lifecycle
        .route("/api/v1/credit-application", post(handlers::submit))
        .route(
            "/api/v1/credit-application/:credit_application_id/signing",
            patch(handlers::sign),
        )
        .route(
            "/api/v1/credit-application/list",
            get(handlers::list_applications),
        )
        .route(
            "/api/v1/credit-application/list-agreement",
            get(handlers::list_agreements),
        )
        // Applicant search
        .route("/api/v1/client/find", post(handlers::find_applicants))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
