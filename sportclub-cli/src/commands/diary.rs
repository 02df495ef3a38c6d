use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;

use super::{fail_if, with_spinner, AppContext, TrainingParser};
use crate::models::{find_by_name, Section};
use crate::routes::Route;
use crate::views::{DiaryView, Page};

#[derive(Args)]
pub struct DiaryAddCommand {
    /// Free-text description (e.g., "swimming 45 min, intensity 7")
    description: Option<String>,

    /// Section ID or name
    #[arg(short, long)]
    section: Option<String>,

    /// Duration in minutes
    #[arg(short, long)]
    duration: Option<u32>,

    /// Intensity from 1 to 10
    #[arg(short, long)]
    intensity: Option<u8>,

    /// Free-form note (defaults to the description)
    #[arg(short, long)]
    note: Option<String>,
}

impl DiaryAddCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        if !ctx.enter(Route::Diary) {
            return Ok(());
        }

        let mut view = DiaryView::new();
        with_spinner("Loading diary…", view.load(&ctx.client)).await;

        let parsed = match &self.description {
            Some(description) => {
                let parser = TrainingParser::new()?;
                let parsed = parser.parse(description, view.sections());
                tracing::debug!("Parsed {:?} from {:?}", parsed, description);
                parsed
            }
            None => Default::default(),
        };

        let section_id = match &self.section {
            Some(section) => Some(resolve_section(section, view.sections())?),
            None => parsed.section_id,
        };

        view.form.section_id = section_id;
        if let Some(duration) = self.duration.or(parsed.duration) {
            view.form.duration = duration;
        }
        if let Some(intensity) = self.intensity.or(parsed.intensity) {
            view.form.intensity = intensity;
        }
        view.form.note = self.note.or(self.description).unwrap_or_default();

        with_spinner("Saving training…", view.submit(&ctx.client)).await;
        println!("{}", view.render(&ctx.render_options()));

        let failed = view.flash().map_or(true, |f| f.is_error());
        if failed && view.form.section_id.is_none() && !view.sections().is_empty() {
            let names: Vec<_> = view
                .sections()
                .iter()
                .map(|s| format!("{} (#{})", s.name, s.id))
                .collect();
            println!();
            println!("{} {}", "Sections:".dimmed(), names.join(", "));
        }
        fail_if(failed)
    }
}

/// Accept either a numeric ID or a section name
fn resolve_section(raw: &str, sections: &[Section]) -> Result<i64> {
    if let Ok(id) = raw.trim().parse::<i64>() {
        return Ok(id);
    }

    find_by_name(sections, raw)
        .map(|s| s.id)
        .ok_or_else(|| anyhow!("Unknown section: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<Section> {
        vec![Section {
            id: 3,
            name: "Swimming".to_string(),
            description: None,
        }]
    }

    #[test]
    fn test_resolve_section_by_id_or_name() {
        assert_eq!(resolve_section("7", &sections()).unwrap(), 7);
        assert_eq!(resolve_section(" swimming ", &sections()).unwrap(), 3);
        assert!(resolve_section("chess", &sections()).is_err());
    }
}
