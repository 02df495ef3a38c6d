pub mod auth;
pub mod member;
pub mod recommendation;
pub mod section;
pub mod training;

pub use auth::{LoginRequest, RegisterRequest};
pub use member::Member;
pub use recommendation::{AdviceStatus, Recommendation};
pub use section::{find_by_name, Section};
pub use training::{NewTraining, SectionRef, TrainingEntry};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Pull `key` out of a response body as a list of `T`.
///
/// A missing key or a non-array value yields an empty list, and items that do
/// not deserialize are skipped.
pub fn collection<T: DeserializeOwned>(body: &Value, key: &str) -> Vec<T> {
    let Some(items) = body.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::debug!("Skipping malformed {} item: {}", key, e);
                None
            }
        })
        .collect()
}

/// Parse the timestamp formats the backend is known to emit
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    // Flask's default JSON date encoding
    if let Ok(dt) = DateTime::parse_from_rfc2822(&raw.replace(" GMT", " +0000")) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Render a backend timestamp with the configured date format, or echo it
/// back unchanged when it cannot be parsed
pub fn format_date(raw: &str, date_format: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(date_format).to_string(),
        None => raw.to_string(),
    }
}

/// Treat an explicit `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
