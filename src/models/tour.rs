//! Tour records

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::coerce::{lax_f64, lax_i64};
use super::ValidationError;
use crate::storage::Entity;

/// A tour offered for booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub name: String,
    pub destination: String,
    /// ISO calendar date, `YYYY-MM-DD`
    pub start_date: String,
    #[serde(deserialize_with = "lax_i64")]
    pub duration_days: i64,
    #[serde(deserialize_with = "lax_f64")]
    pub price: f64,
    pub summary: String,
    #[serde(default)]
    pub highlights: Option<Vec<String>>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl Entity for Tour {
    const COLLECTION: &'static str = "tour";
}

impl Tour {
    /// Check the fields serde cannot: `start_date` must be an ISO date.
    pub fn validate(&self) -> Result<NaiveDate, ValidationError> {
        parse_iso_date(&self.start_date).ok_or(ValidationError::InvalidStartDate)
    }
}

/// Parse an ISO 8601 calendar date.
///
/// Accepts the extended `YYYY-MM-DD` and basic `YYYYMMDD` forms, optionally
/// followed by `T` or a space and a time of day (`09`, `0930`, `09:30:00.5`,
/// with an optional `Z` or `±HH[:MM]` offset). Only the date part is kept.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let (date, rest) = split_date(input)?;
    if rest.is_empty() {
        return Some(date);
    }

    let time = rest.strip_prefix('T').or_else(|| rest.strip_prefix(' '))?;
    is_iso_time(time).then_some(date)
}

fn split_date(input: &str) -> Option<(NaiveDate, &str)> {
    let b = input.as_bytes();
    let digits =
        |from: usize, to: usize| b.get(from..to).is_some_and(|s| s.iter().all(u8::is_ascii_digit));

    let (year, month, day, used) = if b.get(4) == Some(&b'-') && b.get(7) == Some(&b'-') {
        if !(digits(0, 4) && digits(5, 7) && digits(8, 10)) {
            return None;
        }
        (&input[0..4], &input[5..7], &input[8..10], 10)
    } else if digits(0, 8) {
        (&input[0..4], &input[4..6], &input[6..8], 8)
    } else {
        return None;
    };

    let date = NaiveDate::from_ymd_opt(
        year.parse().ok()?,
        month.parse().ok()?,
        day.parse().ok()?,
    )?;
    Some((date, &input[used..]))
}

fn is_iso_time(time: &str) -> bool {
    let (clock, offset) = match time.find(|c: char| c == 'Z' || c == '+' || c == '-') {
        Some(i) => time.split_at(i),
        None => (time, ""),
    };
    if !(offset.is_empty() || offset == "Z" || is_offset(&offset[1..])) {
        return false;
    }

    let (clock, fraction) = match clock.split_once(|c: char| c == '.' || c == ',') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (clock, None),
    };
    if let Some(fraction) = fraction {
        let whole_seconds = matches!(clock.len(), 6 | 8);
        if !whole_seconds || fraction.is_empty() || !fraction.bytes().all(|c| c.is_ascii_digit()) {
            return false;
        }
    }

    let fields: Vec<&str> = if clock.contains(':') {
        clock.split(':').collect()
    } else {
        (0..clock.len())
            .step_by(2)
            .filter_map(|i| clock.get(i..i + 2))
            .collect()
    };
    let well_formed = (1..=3).contains(&fields.len())
        && fields.concat().len() == clock.len() - clock.matches(':').count()
        && fields
            .iter()
            .all(|f| f.len() == 2 && f.bytes().all(|c| c.is_ascii_digit()));
    if !well_formed {
        return false;
    }

    let mut hms = fields.iter().filter_map(|f| f.parse::<u32>().ok());
    let (h, m, s) = (
        hms.next().unwrap_or(0),
        hms.next().unwrap_or(0),
        hms.next().unwrap_or(0),
    );
    NaiveTime::from_hms_opt(h, m, s).is_some()
}

fn is_offset(offset: &str) -> bool {
    let compact: String = offset.chars().filter(|&c| c != ':').collect();
    matches!(compact.len(), 2 | 4)
        && compact.bytes().all(|c| c.is_ascii_digit())
        && compact[0..2].parse::<u32>().is_ok_and(|h| h < 24)
        && compact.get(2..4).map_or(true, |m| m.parse::<u32>().is_ok_and(|m| m < 60))
}
