use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{null_as_default, parse_timestamp, Section};

/// Roster entry as returned by `GET /users/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<Section>,
}

impl Member {
    pub fn joined_on(&self) -> Option<NaiveDate> {
        self.created_at
            .as_deref()
            .and_then(parse_timestamp)
            .map(|dt| dt.date())
    }

    /// Avatar letter for the roster card
    pub fn initial(&self) -> char {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('?')
    }
}
