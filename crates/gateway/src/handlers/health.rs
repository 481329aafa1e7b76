//! Health check handlers

use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: ReadyChecks,
}

#[derive(Serialize)]
pub struct ReadyChecks {
    pub catalog: CatalogCheck,
    pub identity_provider: String,
    pub generation_model: String,
}

#[derive(Serialize)]
pub struct CatalogCheck {
    pub status: String,
    pub records: usize,
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: adelante_common::VERSION.to_string(),
    })
}

/// Readiness probe - reports the seeded catalog and configured providers
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let records = state.catalog.resources.len()
        + state.catalog.scholarships.len()
        + state.catalog.mentors.len()
        + state.catalog.transit_routes.len();

    let catalog = CatalogCheck {
        status: if records > 0 { "up" } else { "empty" }.to_string(),
        records,
    };

    Json(ReadyResponse {
        status: if catalog.status == "up" { "ready" } else { "not_ready" }.to_string(),
        checks: ReadyChecks {
            catalog,
            identity_provider: state.config.identity.provider.clone(),
            generation_model: state.assistant.model_name().to_string(),
        },
    })
}
