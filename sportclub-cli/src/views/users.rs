use colored::Colorize;

use super::{current_state, heading, list_lines, ListState, Mount, Page, RenderOptions, LOGIN_REQUIRED};
use crate::api::{ApiClient, ApiError};
use crate::models::{format_date, Member};
use crate::routes::Route;
use crate::session::SessionState;

const EMPTY: &str = "No members yet";

/// Member roster (`/users`)
#[derive(Debug, Default)]
pub struct UsersView {
    members: ListState<Member>,
    mount: Mount,
}

impl UsersView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &ListState<Member> {
        &self.members
    }

    pub fn mount(&self) -> Mount {
        self.mount.clone()
    }

    /// Returns false when nothing should be fetched
    pub fn begin_load(&mut self, state: &SessionState) -> bool {
        if !state.is_authenticated() {
            self.members = ListState::Blocked(LOGIN_REQUIRED.to_string());
            return false;
        }
        self.members = ListState::Loading;
        true
    }

    pub fn apply_members(&mut self, result: Result<Vec<Member>, ApiError>) {
        if self.mount.accepts("members") {
            self.members = ListState::from_result(result, EMPTY);
        }
    }

    pub async fn load(&mut self, client: &ApiClient) {
        if self.begin_load(&current_state(client)) {
            let result = client.members().await;
            self.apply_members(result);
        }
    }
}

impl Page for UsersView {
    fn route(&self) -> Route {
        Route::Users
    }

    fn render(&self, options: &RenderOptions) -> String {
        let mut lines = vec![heading(Route::Users, "👥"), String::new()];

        lines.extend(list_lines(&self.members, |member| {
            let since = member
                .created_at
                .as_deref()
                .map(|raw| format!("member since {}", format_date(raw, &options.date_format)))
                .unwrap_or_else(|| "member".to_string());

            let sections = if member.sections.is_empty() {
                "Not in any section yet".dimmed().to_string()
            } else {
                member
                    .sections
                    .iter()
                    .map(|s| format!("[{}]", s.name).cyan().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            };

            vec![
                format!(
                    "({}) {}  {}",
                    member.initial(),
                    member.username.bold(),
                    since.dimmed()
                ),
                format!("    {}", sections),
            ]
        }));

        lines.join("\n")
    }
}
