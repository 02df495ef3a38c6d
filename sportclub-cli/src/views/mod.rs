// Page view state: what each screen shows and how results land in it.
//
// Views never talk to the terminal directly. Commands and the dashboard
// drive them and print `render()`.

mod about;
mod diary;
mod home;
mod login;
mod register;
mod sections;
mod users;

pub use about::AboutView;
pub use diary::{DiaryView, TrainingForm};
pub use home::{AdviceState, HomeView};
pub use login::LoginView;
pub use register::RegisterView;
pub use sections::SectionsView;
pub use users::UsersView;

use colored::Colorize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::routes::Route;
use crate::session::{self, SessionState};

/// Shown instead of a protected list when nobody is logged in
pub const LOGIN_REQUIRED: &str = "Log in to see this page (sportclub login)";

/// Transient feedback after a submission. A new one replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Flash::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Flash::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Flash::Success(m) | Flash::Error(m) => m,
        }
    }
}

impl From<&ApiError> for Flash {
    fn from(error: &ApiError) -> Self {
        Flash::Error(error.to_string())
    }
}

impl fmt::Display for Flash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flash::Success(m) => write!(f, "✅ {}", m),
            Flash::Error(m) => write!(f, "❌ {}", m),
        }
    }
}

/// Display state of a fetched collection
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    Idle,
    Blocked(String),
    Loading,
    Empty(String),
    Ready(Vec<T>),
    Failed(String),
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState::Idle
    }
}

impl<T> ListState<T> {
    pub fn from_result(result: Result<Vec<T>, ApiError>, empty_message: &str) -> Self {
        match result {
            Ok(items) if items.is_empty() => ListState::Empty(empty_message.to_string()),
            Ok(items) => ListState::Ready(items),
            Err(ApiError::Unauthenticated) => ListState::Blocked(LOGIN_REQUIRED.to_string()),
            Err(e) => ListState::Failed(e.to_string()),
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            ListState::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ListState::Failed(_) | ListState::Blocked(_))
    }

    /// Put a freshly created item at the top
    pub fn prepend(&mut self, item: T) {
        match self {
            ListState::Ready(items) => items.insert(0, item),
            _ => *self = ListState::Ready(vec![item]),
        }
    }
}

/// Submission bookkeeping shared by every form
#[derive(Debug, Default)]
pub struct FormState {
    in_flight: bool,
    flash: Option<Flash>,
}

impl FormState {
    /// Mark a submission as started. Refused while one is already running.
    pub fn begin(&mut self) -> Result<(), ApiError> {
        if self.in_flight {
            return Err(ApiError::validation("A request is already in progress"));
        }
        self.in_flight = true;
        Ok(())
    }

    /// Local validation failed; nothing is sent
    pub fn reject(&mut self, error: ApiError) -> ApiError {
        self.flash = Some(Flash::from(&error));
        error
    }

    pub fn finish(&mut self, flash: Flash) {
        self.in_flight = false;
        self.flash = Some(flash);
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }
}

/// Liveness of a view. Clones share the flag. The CLI and dashboard await
/// each request before moving on and never unmount; the handle is for drivers
/// that run `begin_load`/`apply_*` themselves and may leave a view while its
/// request is still running.
#[derive(Debug, Clone)]
pub struct Mount {
    active: Arc<AtomicBool>,
}

impl Default for Mount {
    fn default() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl Mount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// True when a response may still be applied; logs the drop otherwise
    pub(crate) fn accepts(&self, what: &str) -> bool {
        let active = self.is_active();
        if !active {
            tracing::warn!("Discarding {} response for an unmounted view", what);
        }
        active
    }
}

/// Settings a view needs to render
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub date_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            date_format: crate::config::UiConfig::default().date_format,
        }
    }
}

/// A screen reachable through a route
pub trait Page {
    fn route(&self) -> Route;
    fn render(&self, options: &RenderOptions) -> String;
}

pub(crate) fn current_state(client: &ApiClient) -> SessionState {
    session::lock(client.session()).state().clone()
}

pub(crate) fn heading(route: Route, icon: &str) -> String {
    format!("{} {}", icon, route.title()).bold().to_string()
}

pub(crate) fn flash_line(flash: &Flash) -> String {
    match flash {
        Flash::Success(_) => flash.to_string().green().to_string(),
        Flash::Error(_) => flash.to_string().red().to_string(),
    }
}

/// Render a list state, delegating ready items to `item`
pub(crate) fn list_lines<T>(
    state: &ListState<T>,
    mut item: impl FnMut(&T) -> Vec<String>,
) -> Vec<String> {
    match state {
        ListState::Idle => Vec::new(),
        ListState::Blocked(m) => vec![format!("🔒 {}", m).yellow().to_string()],
        ListState::Loading => vec!["Loading…".dimmed().to_string()],
        ListState::Empty(m) => vec![m.dimmed().to_string()],
        ListState::Failed(m) => vec![format!("❌ {}", m).red().to_string()],
        ListState::Ready(items) => items.iter().flat_map(|i| item(i)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_display() {
        assert_eq!(Flash::success("Saved").to_string(), "✅ Saved");
        assert_eq!(Flash::error("already joined").to_string(), "❌ already joined");
    }

    #[test]
    fn test_list_state_from_result() {
        let empty: ListState<i32> = ListState::from_result(Ok(vec![]), "Nothing here");
        assert_eq!(empty, ListState::Empty("Nothing here".into()));

        let blocked: ListState<i32> = ListState::from_result(Err(ApiError::Unauthenticated), "");
        assert_eq!(blocked, ListState::Blocked(LOGIN_REQUIRED.into()));

        let failed: ListState<i32> =
            ListState::from_result(Err(ApiError::Network("refused".into())), "");
        assert_eq!(
            failed,
            ListState::Failed("Connection to the server failed".into())
        );
    }

    #[test]
    fn test_prepend_turns_empty_into_ready() {
        let mut state: ListState<i32> = ListState::Empty("none".into());
        state.prepend(1);
        state.prepend(2);
        assert_eq!(state.items(), &[2, 1]);
    }

    #[test]
    fn test_form_state_refuses_double_submit() {
        let mut form = FormState::default();
        assert!(form.begin().is_ok());
        assert!(form.begin().is_err());
        form.finish(Flash::success("done"));
        assert!(!form.in_flight());
        assert!(form.begin().is_ok());
    }

    #[test]
    fn test_mount_clones_share_flag() {
        let mount = Mount::new();
        let handle = mount.clone();
        assert!(mount.is_active());
        handle.unmount();
        assert!(!mount.is_active());
    }
}
