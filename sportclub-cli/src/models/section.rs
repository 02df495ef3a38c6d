use serde::{Deserialize, Serialize};

/// Club activity a member can join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Find a section by name, ignoring case and surrounding whitespace
pub fn find_by_name<'a>(sections: &'a [Section], name: &str) -> Option<&'a Section> {
    let wanted = name.trim().to_lowercase();
    sections.iter().find(|s| s.name.to_lowercase() == wanted)
}
