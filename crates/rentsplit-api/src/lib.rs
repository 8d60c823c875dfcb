//! Rentsplit API
//!
//! HTTP front for the rentsplit allocation engine, plus the pieces the
//! `rentsplit` binary is built from: configuration, logging setup, input
//! validation and the scenario file reader.
//!
//! Every request is independent. The engine is a pure function, so the only
//! shared state is the configuration.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use rentsplit_types::BillScenario;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;

pub mod config;
pub mod error;
pub mod service;
pub mod tracing_setup;
pub mod types;
pub mod validation;

use config::RentSplitConfig;
use error::ApiError;
use types::{HealthResponse, SplitQuery, SplitResponse};

/// Shared, read-only application state
#[derive(Debug)]
pub struct AppState {
    pub config: RentSplitConfig,
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: RentSplitConfig) -> Self {
        Self { config, start_time: Utc::now() }
    }

    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.start_time).num_seconds()
    }
}

/// Builds the router with the default configuration.
pub fn create_app() -> Result<Router, ApiError> {
    create_app_with_config(RentSplitConfig::default())
}

pub fn create_app_with_config(config: RentSplitConfig) -> Result<Router, ApiError> {
    if config.limits.max_body_bytes == 0 {
        return Err(ApiError::configuration("limits.max_body_bytes must be greater than zero"));
    }

    info!(
        max_rooms = config.limits.max_rooms,
        max_occupants_per_room = config.limits.max_occupants_per_room,
        max_body_bytes = config.limits.max_body_bytes,
        "Building router"
    );

    let body_limit = config.limits.max_body_bytes;
    let state = Arc::new(AppState::new(config));

    let app = Router::new()
        .route("/health", get(health))
        .route("/v1/split", post(split))
        .route("/v1/split/demo", get(demo))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
        .with_state(state);

    Ok(app)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

async fn split(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SplitQuery>,
    Json(scenario): Json<BillScenario>,
) -> Result<Json<SplitResponse>, ApiError> {
    let response = service::validate_and_split(scenario, &state.config.limits, query.detailed)?;
    Ok(Json(response))
}

async fn demo() -> Json<BillScenario> {
    Json(BillScenario::demo())
}
