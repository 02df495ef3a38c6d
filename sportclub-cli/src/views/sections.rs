use colored::Colorize;

use super::{
    current_state, flash_line, heading, list_lines, Flash, FormState, ListState, Mount, Page,
    RenderOptions, LOGIN_REQUIRED,
};
use crate::api::{ApiClient, ApiError};
use crate::models::Section;
use crate::routes::Route;
use crate::session::SessionState;

const EMPTY: &str = "No sections are open yet";

/// Section catalogue with a join action per section (`/sections`)
#[derive(Debug, Default)]
pub struct SectionsView {
    sections: ListState<Section>,
    join: FormState,
    pending: Option<i64>,
    mount: Mount,
}

impl SectionsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &ListState<Section> {
        &self.sections
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.join.flash()
    }

    /// Section whose join request is running
    pub fn pending(&self) -> Option<i64> {
        self.pending
    }

    pub fn mount(&self) -> Mount {
        self.mount.clone()
    }

    pub fn begin_load(&mut self, state: &SessionState) -> bool {
        if !state.is_authenticated() {
            self.sections = ListState::Blocked(LOGIN_REQUIRED.to_string());
            return false;
        }
        self.sections = ListState::Loading;
        true
    }

    pub fn apply_sections(&mut self, result: Result<Vec<Section>, ApiError>) {
        if self.mount.accepts("sections") {
            self.sections = ListState::from_result(result, EMPTY);
        }
    }

    pub async fn load(&mut self, client: &ApiClient) {
        if self.begin_load(&current_state(client)) {
            let result = client.sections().await;
            self.apply_sections(result);
        }
    }

    /// Validate a join request and mark it in flight
    pub fn prepare_join(&mut self, section_id: Option<i64>) -> Result<Section, ApiError> {
        let Some(id) = section_id else {
            return Err(self.join.reject(ApiError::validation("Choose a section to join")));
        };

        let Some(section) = self.sections.items().iter().find(|s| s.id == id).cloned() else {
            return Err(self
                .join
                .reject(ApiError::validation(format!("There is no section #{}", id))));
        };

        self.join.begin()?;
        self.pending = Some(id);
        Ok(section)
    }

    pub fn apply_join(&mut self, section: &Section, result: Result<(), ApiError>) {
        if !self.mount.accepts("join") {
            return;
        }

        self.pending = None;
        match result {
            Ok(()) => self
                .join
                .finish(Flash::success(format!("Joined section: {}", section.name))),
            Err(e) => self.join.finish(Flash::from(&e)),
        }
    }

    pub async fn join(&mut self, client: &ApiClient, section_id: Option<i64>) {
        if let Ok(section) = self.prepare_join(section_id) {
            let result = client.join_section(section.id).await;
            self.apply_join(&section, result);
        }
    }
}

impl Page for SectionsView {
    fn route(&self) -> Route {
        Route::Sections
    }

    fn render(&self, _options: &RenderOptions) -> String {
        let mut lines = vec![heading(Route::Sections, "🥊"), String::new()];

        if let Some(flash) = self.join.flash() {
            lines.push(flash_line(flash));
            lines.push(String::new());
        }

        lines.extend(list_lines(&self.sections, |section| {
            let marker = if self.pending == Some(section.id) {
                " (joining…)".dimmed().to_string()
            } else {
                String::new()
            };

            let mut card = vec![format!(
                "{:>4}  {}{}",
                format!("#{}", section.id).dimmed(),
                section.name.bold(),
                marker
            )];
            if let Some(description) = section.description.as_deref().filter(|d| !d.is_empty()) {
                card.push(format!("      {}", description));
            }
            card
        }));

        if !self.sections.items().is_empty() {
            lines.push(String::new());
            lines.push("Join with: sportclub sections join <ID>".dimmed().to_string());
        }

        lines.join("\n")
    }
}
