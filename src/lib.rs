//! weebtours - booking and content API for anime-themed tours
//!
//! Tours and bookings are kept in a document store behind a small JSON API.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod http_server;
pub mod models;
pub mod storage;
