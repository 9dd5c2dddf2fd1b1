//! Booking HTTP Routes
//!
//! `POST /bookings` persists a booking as given. The referenced tour is not
//! looked up.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use super::errors::ApiResult;
use super::state::AppState;
use super::tour_routes::CreatedResponse;
use crate::models::Booking;

/// Create booking routes
pub fn booking_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/bookings", post(create_booking_handler))
        .with_state(state)
}

async fn create_booking_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Booking>, JsonRejection>,
) -> ApiResult<Json<CreatedResponse>> {
    let Json(booking) = payload?;

    let id = state.database.collection::<Booking>().insert(&booking)?;
    Ok(Json(CreatedResponse { id }))
}
