use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::ApiClient;
use crate::config::Config;
use crate::routes::{GuardDecision, Route, RouteGuard};
use crate::session::{self, FileCredentialStore, Session, SessionState, SharedSession};
use crate::views::{Page, RenderOptions};

/// Everything a command needs: config, the one session, the client and the guard
pub struct AppContext {
    pub config: Config,
    pub session: SharedSession,
    pub client: ApiClient,
    pub guard: RouteGuard,
}

impl AppContext {
    /// Load config (explicit path wins) and restore the session from disk
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(&PathBuf::from(path))?,
            None => Config::load()?,
        };

        let store = FileCredentialStore::open_default()?;
        tracing::debug!("Credential store at {}", store.path().display());

        Self::with_session(config, Session::open(Box::new(store)).shared())
    }

    pub fn with_session(config: Config, session: SharedSession) -> Result<Self> {
        let client = ApiClient::new(&config.api, session.clone())?
            .with_logout_on_reject(config.auth.logout_on_reject);
        let guard = RouteGuard::new(config.routes.fallback);

        Ok(Self {
            config,
            session,
            client,
            guard,
        })
    }

    pub fn state(&self) -> SessionState {
        session::lock(&self.session).state().clone()
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            date_format: self.config.ui.date_format.clone(),
        }
    }

    /// Run the guard for `route`. Prints the login hint and returns false
    /// when the page must not be shown.
    pub fn enter(&self, route: Route) -> bool {
        match self.guard.check(&self.state(), route.path()) {
            GuardDecision::Allow(_) => true,
            GuardDecision::RedirectTo(target) => {
                tracing::debug!("{} redirected to {}", route.path(), target.path());
                println!("🔒 {} requires login.", route.title());
                println!("Use 'sportclub login' to authenticate.");
                false
            }
        }
    }

    pub fn print(&self, page: &dyn Page) {
        println!("{}", page.render(&self.render_options()));
    }
}

/// Show a spinner while `work` runs
pub async fn with_spinner<F: Future>(message: &str, work: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let output = work.await;

    spinner.finish_and_clear();
    output
}
