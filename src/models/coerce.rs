//! Lenient numeric fields
//!
//! Request bodies may carry numbers as JSON strings (`"10"`), integers as
//! integral floats (`5.0`), or booleans. These helpers accept those forms and
//! still reject anything that does not denote a number of the target type,
//! such as `2.5` for an integer field.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

/// Deserialize an `i64` from an integer, an integral float, a numeric
/// string or a boolean.
pub fn lax_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LaxI64)
}

/// Deserialize an `f64` from any JSON number, a numeric string or a boolean.
pub fn lax_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LaxF64)
}

struct LaxI64;

impl<'de> Visitor<'de> for LaxI64 {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a valid integer")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<i64, E> {
        Ok(i64::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        // i64::MAX as f64 rounds up to 2^63, hence the strict bound
        if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(v as i64)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        v.trim()
            .parse::<i64>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

struct LaxF64;

impl<'de> Visitor<'de> for LaxF64 {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a valid number")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<f64, E> {
        Ok(if v { 1.0 } else { 0.0 })
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        v.trim()
            .parse::<f64>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "lax_i64")]
        count: i64,
        #[serde(deserialize_with = "lax_f64")]
        amount: f64,
    }

    fn sample(
        count: serde_json::Value,
        amount: serde_json::Value,
    ) -> Result<Sample, serde_json::Error> {
        serde_json::from_value(json!({ "count": count, "amount": amount }))
    }

    #[test]
    fn test_accepted_forms() {
        let s = sample(json!(5.0), json!("10")).unwrap();
        assert_eq!((s.count, s.amount), (5, 10.0));

        let s = sample(json!(" 7 "), json!(3)).unwrap();
        assert_eq!((s.count, s.amount), (7, 3.0));

        let s = sample(json!(true), json!("2.5")).unwrap();
        assert_eq!((s.count, s.amount), (1, 2.5));
    }

    #[test]
    fn test_rejected_forms() {
        assert!(sample(json!(2.5), json!(1)).is_err());
        assert!(sample(json!("2.0x"), json!(1)).is_err());
        assert!(sample(json!(null), json!(1)).is_err());
        assert!(sample(json!(1), json!("ten")).is_err());
        assert!(sample(json!(1), json!([1])).is_err());
        assert!(sample(json!(u64::MAX), json!(1)).is_err());
    }
}
