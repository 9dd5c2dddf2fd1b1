//! Static Content Routes
//!
//! Greetings and the FAQ list. None of these touch the store.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::models::{faqs, FaqItem};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FaqsResponse {
    pub faqs: &'static [FaqItem],
}

/// Routes served at the root
pub fn root_routes() -> Router {
    Router::new().route("/", get(root_handler))
}

/// Routes nested under `/api`
pub fn content_routes() -> Router {
    Router::new()
        .route("/hello", get(hello_handler))
        .route("/faqs", get(faqs_handler))
}

async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "WeebTours Backend Running",
    })
}

async fn hello_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from WeebTours API",
    })
}

async fn faqs_handler() -> Json<FaqsResponse> {
    Json(FaqsResponse { faqs: faqs() })
}
