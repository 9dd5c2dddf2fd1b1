//! # WeebTours HTTP Server Module
//!
//! JSON API over the document store. Handlers validate input, delegate to
//! [`crate::storage::Database`] and map errors to status codes via
//! [`ApiError`].
//!
//! # Endpoints
//!
//! - `GET /`, `GET /api/hello` - greetings
//! - `GET /test` - store diagnostics, always 200
//! - `GET|POST /api/tours` - list / create tours
//! - `POST /api/bookings` - create a booking
//! - `GET /api/faqs` - static FAQ list

pub mod booking_routes;
pub mod config;
pub mod content_routes;
pub mod diagnostics_routes;
pub mod errors;
pub mod server;
pub mod state;
pub mod tour_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
pub use state::AppState;
