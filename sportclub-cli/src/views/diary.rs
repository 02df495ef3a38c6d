use colored::Colorize;

use super::{
    current_state, flash_line, heading, list_lines, Flash, FormState, ListState, Mount, Page,
    RenderOptions, LOGIN_REQUIRED,
};
use crate::api::{ApiClient, ApiError};
use crate::models::{format_date, NewTraining, Section, TrainingEntry};
use crate::routes::Route;
use crate::session::SessionState;

const EMPTY: &str = "No trainings logged yet";

/// Uncommitted diary entry
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingForm {
    pub section_id: Option<i64>,
    pub duration: u32,
    pub intensity: u8,
    pub note: String,
}

impl Default for TrainingForm {
    fn default() -> Self {
        Self {
            section_id: None,
            duration: 0,
            intensity: 5,
            note: String::new(),
        }
    }
}

impl TrainingForm {
    /// Required-field check before anything is sent
    pub fn validate(&self) -> Result<NewTraining, ApiError> {
        let section_id = self
            .section_id
            .ok_or_else(|| ApiError::validation("Choose a section for this training"))?;

        if self.duration == 0 {
            return Err(ApiError::validation("Duration must be greater than zero"));
        }

        if !(1..=10).contains(&self.intensity) {
            return Err(ApiError::validation("Intensity must be between 1 and 10"));
        }

        Ok(NewTraining {
            section_id,
            duration: self.duration,
            intensity: self.intensity,
            note: self.note.trim().to_string(),
        })
    }
}

/// Training diary (`/diary`): list of entries plus the entry form
#[derive(Debug, Default)]
pub struct DiaryView {
    pub form: TrainingForm,
    trainings: ListState<TrainingEntry>,
    sections: Vec<Section>,
    submit: FormState,
    mount: Mount,
}

impl DiaryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trainings(&self) -> &ListState<TrainingEntry> {
        &self.trainings
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.submit.flash()
    }

    pub fn in_flight(&self) -> bool {
        self.submit.in_flight()
    }

    pub fn mount(&self) -> Mount {
        self.mount.clone()
    }

    pub fn begin_load(&mut self, state: &SessionState) -> bool {
        if !state.is_authenticated() {
            self.trainings = ListState::Blocked(LOGIN_REQUIRED.to_string());
            return false;
        }
        self.trainings = ListState::Loading;
        true
    }

    pub fn apply_trainings(&mut self, result: Result<Vec<TrainingEntry>, ApiError>) {
        if self.mount.accepts("trainings") {
            self.trainings = ListState::from_result(result, EMPTY);
        }
    }

    /// Sections are only used for labels and the section picker
    pub fn apply_sections(&mut self, result: Result<Vec<Section>, ApiError>) {
        if !self.mount.accepts("sections") {
            return;
        }
        match result {
            Ok(sections) => self.sections = sections,
            Err(e) => tracing::warn!("Section names unavailable: {}", e),
        }
    }

    pub async fn load(&mut self, client: &ApiClient) {
        if self.begin_load(&current_state(client)) {
            let (trainings, sections) = tokio::join!(client.trainings(), client.sections());
            self.apply_sections(sections);
            self.apply_trainings(trainings);
        }
    }

    pub fn prepare_submit(&mut self) -> Result<NewTraining, ApiError> {
        let training = self
            .form
            .validate()
            .map_err(|e| self.submit.reject(e))?;
        self.submit.begin()?;
        Ok(training)
    }

    /// Land the POST result; on success the entry goes to the top of the list
    pub fn apply_submit(
        &mut self,
        training: &NewTraining,
        result: Result<Option<TrainingEntry>, ApiError>,
    ) {
        if !self.mount.accepts("training") {
            return;
        }

        match result {
            Ok(created) => {
                let entry = created.unwrap_or_else(|| training.to_entry());
                self.trainings.prepend(entry);
                self.form = TrainingForm::default();
                self.submit.finish(Flash::success("Training saved"));
            }
            Err(e) => self.submit.finish(Flash::from(&e)),
        }
    }

    pub async fn submit(&mut self, client: &ApiClient) {
        if let Ok(training) = self.prepare_submit() {
            let result = client.create_training(&training).await;
            self.apply_submit(&training, result);
        }
    }
}

impl Page for DiaryView {
    fn route(&self) -> Route {
        Route::Diary
    }

    fn render(&self, options: &RenderOptions) -> String {
        let mut lines = vec![heading(Route::Diary, "📓"), String::new()];

        if let Some(flash) = self.submit.flash() {
            lines.push(flash_line(flash));
            lines.push(String::new());
        }

        lines.extend(list_lines(&self.trainings, |entry| {
            let date = entry
                .date
                .as_deref()
                .map(|raw| format_date(raw, &options.date_format))
                .unwrap_or_else(|| "—".to_string());

            let mut card = vec![format!(
                "{}  {}  {} min  intensity {}/10",
                date.dimmed(),
                entry.section.label(&self.sections).bold(),
                entry.duration,
                entry.intensity
            )];
            if !entry.note.is_empty() {
                card.push(format!("    {}", entry.note));
            }
            card
        }));

        lines.join("\n")
    }
}
