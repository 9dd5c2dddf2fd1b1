//! Domain records
//!
//! - [`Tour`] - persisted in the `tour` collection
//! - [`Booking`] - persisted in the `booking` collection
//! - [`FaqItem`] - static, never persisted

mod booking;
mod coerce;
mod faq;
mod tour;

use thiserror::Error;

pub use booking::Booking;
pub use faq::{faqs, FaqItem};
pub use tour::{parse_iso_date, Tour};

/// Field checks beyond what deserialization enforces
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("start_date must be ISO format YYYY-MM-DD")]
    InvalidStartDate,
}
