use colored::Colorize;

use super::{current_state, heading, Mount, Page, RenderOptions};
use crate::api::{ApiClient, ApiError};
use crate::models::Recommendation;
use crate::routes::{nav_links, Route};
use crate::session::SessionState;

/// Coach advice panel. Failures keep it hidden.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AdviceState {
    #[default]
    Hidden,
    Loading,
    Ready(Recommendation),
}

/// Landing page (`/`): menu cards plus coach advice
#[derive(Debug, Default)]
pub struct HomeView {
    advice: AdviceState,
    links: Vec<Route>,
    mount: Mount,
}

impl HomeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advice(&self) -> &AdviceState {
        &self.advice
    }

    pub fn links(&self) -> &[Route] {
        &self.links
    }

    pub fn mount(&self) -> Mount {
        self.mount.clone()
    }

    pub fn begin_load(&mut self, state: &SessionState) -> bool {
        self.links = nav_links(state);
        if !state.is_authenticated() {
            self.advice = AdviceState::Hidden;
            return false;
        }
        self.advice = AdviceState::Loading;
        true
    }

    pub fn apply_advice(&mut self, result: Result<Recommendation, ApiError>) {
        if !self.mount.accepts("recommendation") {
            return;
        }
        self.advice = match result {
            Ok(advice) => AdviceState::Ready(advice),
            Err(e) => {
                tracing::warn!("Coach advice unavailable: {}", e);
                AdviceState::Hidden
            }
        };
    }

    pub async fn load(&mut self, client: &ApiClient) {
        if self.begin_load(&current_state(client)) {
            let result = client.recommendation().await;
            self.apply_advice(result);
        }
    }
}

/// Icon and blurb for a menu card
pub(crate) fn card(route: Route) -> (&'static str, &'static str) {
    match route {
        Route::Sections => ("🥊", "Sign up for boxing, swimming and other activities."),
        Route::Diary => ("📅", "Log your workouts and keep an eye on the load."),
        Route::Users => ("👥", "See who else trains at the club."),
        Route::About => ("ℹ️", "About the club and this client."),
        Route::Login => ("🔑", "Log in to your account."),
        Route::Register => ("📝", "Create an account."),
        Route::Home => ("⚡", "Overview."),
    }
}

impl Page for HomeView {
    fn route(&self) -> Route {
        Route::Home
    }

    fn render(&self, _options: &RenderOptions) -> String {
        let mut lines = vec![
            heading(Route::Home, "⚡"),
            "Welcome to SportCenter".dimmed().to_string(),
            String::new(),
        ];

        for route in self.links.iter().filter(|r| **r != Route::Home) {
            let (icon, blurb) = card(*route);
            lines.push(format!(
                "{} {:<10} {}  {}",
                icon,
                route.title().bold(),
                blurb,
                route.path().dimmed()
            ));
        }

        match &self.advice {
            AdviceState::Hidden => {}
            AdviceState::Loading => {
                lines.push(String::new());
                lines.push("Asking the coach…".dimmed().to_string());
            }
            AdviceState::Ready(advice) => {
                lines.push(String::new());
                lines.push(format!("{} {}", advice.status.icon(), "Coach's advice".bold()));
                lines.push(format!("   {}", advice.message));
                lines.push(format!(
                    "   Suggested intensity: {}/10",
                    advice.suggested_intensity.to_string().cyan()
                ));
            }
        }

        lines.join("\n")
    }
}
