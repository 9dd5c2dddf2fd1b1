//! Booking records

use serde::{Deserialize, Serialize};

use super::coerce::lax_i64;
use crate::storage::Entity;

/// A booking request for a tour.
///
/// `tour_id` is stored as given; it is not checked against existing tours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub tour_id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_travelers", deserialize_with = "lax_i64")]
    pub travelers: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_travelers() -> i64 {
    1
}

impl Entity for Booking {
    const COLLECTION: &'static str = "booking";
}
