//! Diagnostics HTTP Routes
//!
//! `GET /test` reports store availability and configuration. It always
//! answers 200; store failures become status strings in the body.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use super::state::AppState;
use crate::diagnostics::DiagnosticReport;

/// Create diagnostics routes
pub fn diagnostics_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/test", get(test_database_handler))
        .with_state(state)
}

async fn test_database_handler(State(state): State<Arc<AppState>>) -> Json<DiagnosticReport> {
    Json(DiagnosticReport::build(
        &state.database,
        &state.store_settings,
    ))
}
