//! Lenient deserializers for backend payloads
//!
//! The backend is not consistent about scalar encodings: decimals may arrive
//! as strings, flags as `0`/`1`, and dates with or without a time part. These
//! helpers accept every encoding observed on the wire.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, de::Error};

/// Any JSON scalar the backend may use for a value
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Decode a decimal sent either as a JSON number or a numeric string
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(value) => Ok(value as f64),
        Scalar::Float(value) => Ok(value),
        Scalar::Text(value) => value
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid decimal: {value:?}"))),
        Scalar::Bool(_) => Err(D::Error::custom("expected a decimal, got a boolean")),
    }
}

/// Decode a non-negative count sent either as a JSON number or a string
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(value) => u64::try_from(value)
            .map_err(|_| D::Error::custom(format!("negative count: {value}"))),
        Scalar::Text(value) => value
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid count: {value:?}"))),
        Scalar::Float(value) if value >= 0.0 && value.fract() == 0.0 => Ok(value as u64),
        other => Err(D::Error::custom(format!("invalid count: {other:?}"))),
    }
}

/// Decode a flag sent as a boolean, `0`/`1`, or `"true"`/`"false"`
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Scalar::deserialize(deserializer)? {
        Scalar::Bool(value) => Ok(value),
        Scalar::Int(value) => Ok(value != 0),
        Scalar::Float(value) => Ok(value != 0.0),
        Scalar::Text(value) => match value.trim() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            other => Err(D::Error::custom(format!("invalid flag: {other:?}"))),
        },
    }
}

/// Decode a string that may be `null`, mapping `null` to an empty string
pub fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a calendar date
pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw:?}")))
}

/// Decode an optional timestamp, treating `null` as absent
pub fn optional_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw:?}"))),
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or an RFC 3339 timestamp into its date
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|timestamp| timestamp.date())
}

/// Parse any supported date or timestamp encoding
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(timestamp);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
