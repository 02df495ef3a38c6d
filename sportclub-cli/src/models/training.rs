use serde::{Deserialize, Serialize};

use super::{null_as_default, Section};

/// Section reference inside a training entry: the backend sends either the
/// section id or its name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionRef {
    Id(i64),
    Name(String),
}

impl SectionRef {
    /// Human-readable label, resolving ids against the known sections
    pub fn label(&self, sections: &[Section]) -> String {
        match self {
            SectionRef::Name(name) => name.clone(),
            SectionRef::Id(id) => sections
                .iter()
                .find(|s| s.id == *id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| format!("Section #{}", id)),
        }
    }
}

impl Default for SectionRef {
    fn default() -> Self {
        SectionRef::Name(String::new())
    }
}

/// Logged workout as returned by `GET /training/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "section_id", deserialize_with = "null_as_default")]
    pub section: SectionRef,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub intensity: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
}

/// Payload for `POST /training/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTraining {
    pub section_id: i64,
    pub duration: u32,
    pub intensity: u8,
    pub note: String,
}

impl NewTraining {
    /// Local stand-in shown when the backend acknowledges without echoing the entry
    pub fn to_entry(&self) -> TrainingEntry {
        TrainingEntry {
            id: None,
            section: SectionRef::Id(self.section_id),
            date: Some(chrono::Local::now().date_naive().to_string()),
            duration: self.duration,
            intensity: self.intensity,
            note: self.note.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_ref_accepts_id_or_name() {
        let by_name: TrainingEntry = serde_json::from_value(json!({
            "section": "Yoga", "duration": 45, "intensity": 5
        }))
        .unwrap();
        assert_eq!(by_name.section, SectionRef::Name("Yoga".into()));

        let by_id: TrainingEntry = serde_json::from_value(json!({
            "id": 7, "section_id": 2, "duration": 60, "intensity": 8, "note": null
        }))
        .unwrap();
        assert_eq!(by_id.section, SectionRef::Id(2));
        assert_eq!(by_id.note, "");
    }

    #[test]
    fn test_section_label_resolves_ids() {
        let sections = vec![Section {
            id: 2,
            name: "Swimming".into(),
            description: None,
        }];

        assert_eq!(SectionRef::Id(2).label(&sections), "Swimming");
        assert_eq!(SectionRef::Id(9).label(&sections), "Section #9");
    }
}
