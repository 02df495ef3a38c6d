use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Coach advice from `GET /ai/recommend`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AdviceStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggested_intensity: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceStatus {
    Beginner,
    Recovery,
    Rest,
    Progress,
    #[default]
    #[serde(other)]
    Other,
}

impl AdviceStatus {
    pub fn icon(self) -> &'static str {
        match self {
            AdviceStatus::Beginner => "🌱",
            AdviceStatus::Recovery => "🔋",
            AdviceStatus::Rest => "🛌",
            AdviceStatus::Progress => "🚀",
            AdviceStatus::Other => "💡",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_status_maps_to_other() {
        let advice: Recommendation = serde_json::from_value(json!({
            "status": "deload",
            "message": "Take it easy",
            "suggested_intensity": 4
        }))
        .unwrap();

        assert_eq!(advice.status, AdviceStatus::Other);
        assert_eq!(advice.status.icon(), "💡");
    }

    #[test]
    fn test_known_status() {
        let advice: Recommendation = serde_json::from_value(json!({
            "status": "rest",
            "message": "Recover today",
            "suggested_intensity": 2
        }))
        .unwrap();

        assert_eq!(advice.status, AdviceStatus::Rest);
        assert_eq!(advice.suggested_intensity, 2);
    }
}
