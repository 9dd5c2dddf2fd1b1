//! Tour HTTP Routes
//!
//! - `GET /tours?limit=N` - list tours (default 20, `0` for all)
//! - `POST /tours` - create a tour

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::errors::ApiResult;
use super::state::AppState;
use crate::models::Tour;
use crate::storage::{Filter, Stored};

/// Tours returned when no limit is given
pub const DEFAULT_TOUR_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct ListToursQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_TOUR_LIMIT
}

#[derive(Debug, Serialize)]
pub struct ToursResponse {
    pub tours: Vec<Stored<Tour>>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Create tour routes
pub fn tour_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tours", get(list_tours_handler).post(create_tour_handler))
        .with_state(state)
}

async fn list_tours_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListToursQuery>, QueryRejection>,
) -> ApiResult<Json<ToursResponse>> {
    let Query(query) = query?;
    let limit = (query.limit > 0).then_some(query.limit);

    let tours = state
        .database
        .collection::<Tour>()
        .find(&Filter::all(), limit)?;

    Ok(Json(ToursResponse { tours }))
}

async fn create_tour_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Tour>, JsonRejection>,
) -> ApiResult<Json<CreatedResponse>> {
    let Json(tour) = payload?;
    tour.validate()?;

    let id = state.database.collection::<Tour>().insert(&tour)?;
    Ok(Json(CreatedResponse { id }))
}
