use regex::Regex;

use crate::models::Section;

/// Diary fields recovered from a free-text description
#[derive(Debug, Default, PartialEq)]
pub struct ParsedTraining {
    pub section_id: Option<i64>,
    pub duration: Option<u32>,
    pub intensity: Option<u8>,
}

/// Parse descriptions like "swimming 45 min, intensity 7" or "boxing 1h30m 8/10"
pub struct TrainingParser {
    // Hours and minutes together ("1h30m", "1 h 30 min")
    combined_duration: Regex,
    hours: Regex,
    minutes: Regex,
    intensity_patterns: Vec<Regex>,
}

impl TrainingParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            combined_duration: Regex::new(
                r"(\d+)\s*h(?:ours?|rs?)?\s*(\d+)\s*m(?:in(?:ute)?s?)?\b",
            )?,
            hours: Regex::new(r"(\d+(?:\.\d+)?)\s*(?:h|hr|hrs|hours?)\b")?,
            minutes: Regex::new(r"(\d+)\s*(?:m|min|mins|minutes?)\b")?,
            intensity_patterns: vec![
                Regex::new(r"(\d{1,2})\s*/\s*10\b")?,
                Regex::new(r"intensity\s*(?:of\s*|:\s*|=\s*)?(\d{1,2})\b")?,
                Regex::new(r"\brpe\s*(\d{1,2})\b")?,
            ],
        })
    }

    pub fn parse(&self, description: &str, sections: &[Section]) -> ParsedTraining {
        let description = description.to_lowercase();

        ParsedTraining {
            section_id: Self::detect_section(&description, sections),
            duration: self.extract_duration(&description),
            intensity: self.extract_intensity(&description),
        }
    }

    /// Longest section name mentioned in the text
    fn detect_section(description: &str, sections: &[Section]) -> Option<i64> {
        sections
            .iter()
            .filter(|s| !s.name.trim().is_empty())
            .filter(|s| description.contains(&s.name.trim().to_lowercase()))
            .max_by_key(|s| s.name.chars().count())
            .map(|s| s.id)
    }

    fn extract_duration(&self, description: &str) -> Option<u32> {
        if let Some(captures) = self.combined_duration.captures(description) {
            let hours: u32 = captures.get(1)?.as_str().parse().ok()?;
            let minutes: u32 = captures.get(2)?.as_str().parse().ok()?;
            return hours.checked_mul(60)?.checked_add(minutes);
        }

        if let Some(captures) = self.hours.captures(description) {
            let hours: f64 = captures.get(1)?.as_str().parse().ok()?;
            let minutes = (hours * 60.0).round();
            if !minutes.is_finite() || minutes > f64::from(u32::MAX) {
                return None;
            }
            return Some(minutes as u32);
        }

        self.minutes
            .captures(description)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    fn extract_intensity(&self, description: &str) -> Option<u8> {
        self.intensity_patterns.iter().find_map(|pattern| {
            pattern
                .captures(description)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok())
        })
    }
}
