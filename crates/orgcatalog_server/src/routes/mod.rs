//! Route table and shared request parameter parsing.

pub mod buildings;
pub mod businesses;
pub mod organizations;
mod params;

use crate::middleware::{require_api_key, trace_requests};
use crate::state::AppState;
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde::Serialize;

pub const SERVICE_NAME: &str = "Organization Catalog Api";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub health: &'static str,
    pub version: &'static str,
}

/// Builds the full router. Every route, health included, sits behind the
/// API key guard; request tracing wraps the guard so rejections are logged.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/organizations/search", get(organizations::search))
        .route("/organizations/nearby", get(organizations::nearby))
        .route("/organizations/building/:id", get(organizations::in_building))
        .route("/organizations/business/:id", get(organizations::by_business))
        .route("/organizations/:id", get(organizations::get_one))
        .route("/buildings/nearby", get(buildings::nearby))
        .route("/businesses/:id/organizations", get(businesses::organizations_in_tree))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .layer(middleware::from_fn(trace_requests))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: SERVICE_NAME,
        health: "OK",
        version: orgcatalog_core::core_version(),
    })
}
