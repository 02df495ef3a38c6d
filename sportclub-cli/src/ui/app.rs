use crossterm::event::KeyCode;

use crate::api::ApiClient;
use crate::routes::{nav_links, Route};
use crate::session::SessionState;
use crate::views::{current_state, DiaryView, Flash, HomeView, SectionsView};

/// Application state for the TUI dashboard
pub struct App {
    /// Should the application quit?
    pub should_quit: bool,
    /// Currently selected panel
    pub selected_panel: Panel,
    /// Selected index in the current panel
    pub selected_index: usize,
    /// Show help overlay
    pub show_help: bool,
    pub state: SessionState,
    pub home: HomeView,
    pub sections: SectionsView,
    pub diary: DiaryView,
    /// Last message for the status bar
    pub status: Option<Flash>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Advice,
    Trainings,
    Sections,
    Menu,
}

/// Work a key press asks the event loop to do against the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reload,
    Join(i64),
}

impl App {
    pub fn new(state: SessionState) -> Self {
        Self {
            should_quit: false,
            selected_panel: Panel::Advice,
            selected_index: 0,
            show_help: false,
            state,
            home: HomeView::new(),
            sections: SectionsView::new(),
            diary: DiaryView::new(),
            status: None,
        }
    }

    /// Fetch every panel; the session may have changed since the last pass
    pub async fn reload(&mut self, client: &ApiClient) {
        self.state = current_state(client);

        tokio::join!(
            self.home.load(client),
            self.sections.load(client),
            self.diary.load(client),
        );

        self.selected_index = 0;
        if !self.state.is_authenticated() {
            self.status = Some(Flash::error("Not logged in. Run 'sportclub login' first."));
        }
    }

    pub async fn perform(&mut self, action: Action, client: &ApiClient) {
        match action {
            Action::Reload => self.reload(client).await,
            Action::Join(id) => {
                self.sections.join(client, Some(id)).await;
                self.status = self.sections.flash().cloned();
            }
        }
    }

    pub fn menu(&self) -> Vec<Route> {
        nav_links(&self.state)
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) -> Option<Action> {
        // Help overlay takes precedence
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return None;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') | KeyCode::Char('R') => return Some(Action::Reload),
            KeyCode::Tab | KeyCode::Right => self.next_panel(),
            KeyCode::BackTab | KeyCode::Left => self.prev_panel(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
            KeyCode::Enter => return self.activate(),
            _ => {}
        }

        None
    }

    fn activate(&mut self) -> Option<Action> {
        match self.selected_panel {
            Panel::Sections => {
                let section = self.sections.sections().items().get(self.selected_index)?;
                if self.sections.pending().is_some() {
                    return None;
                }
                Some(Action::Join(section.id))
            }
            Panel::Menu => {
                let route = *self.menu().get(self.selected_index)?;
                self.open(route);
                None
            }
            _ => None,
        }
    }

    /// Jump to the panel showing `route`, or point at the matching command
    fn open(&mut self, route: Route) {
        let panel = match route {
            Route::Home => Some(Panel::Advice),
            Route::Sections => Some(Panel::Sections),
            Route::Diary => Some(Panel::Trainings),
            _ => None,
        };

        match panel {
            Some(panel) => {
                self.selected_panel = panel;
                self.selected_index = 0;
            }
            None => {
                self.status = Some(Flash::success(format!(
                    "Quit and run 'sportclub {}'",
                    route.path().trim_start_matches('/')
                )));
            }
        }
    }

    /// Move to next panel
    fn next_panel(&mut self) {
        self.selected_panel = match self.selected_panel {
            Panel::Advice => Panel::Trainings,
            Panel::Trainings => Panel::Sections,
            Panel::Sections => Panel::Menu,
            Panel::Menu => Panel::Advice,
        };
        self.selected_index = 0;
    }

    /// Move to previous panel
    fn prev_panel(&mut self) {
        self.selected_panel = match self.selected_panel {
            Panel::Advice => Panel::Menu,
            Panel::Trainings => Panel::Advice,
            Panel::Sections => Panel::Trainings,
            Panel::Menu => Panel::Sections,
        };
        self.selected_index = 0;
    }

    fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn move_selection_down(&mut self) {
        let len = match self.selected_panel {
            Panel::Trainings => self.diary.trainings().items().len(),
            Panel::Sections => self.sections.sections().items().len(),
            Panel::Menu => self.menu().len(),
            Panel::Advice => 0,
        };

        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;
    use crate::session::Credential;

    fn signed_in() -> App {
        App::new(SessionState::Authenticated(Credential::new("abc")))
    }

    fn with_sections(app: &mut App) {
        app.sections.begin_load(&app.state.clone());
        app.sections.apply_sections(Ok(vec![
            Section {
                id: 1,
                name: "Boxing".to_string(),
                description: None,
            },
            Section {
                id: 2,
                name: "Swimming".to_string(),
                description: None,
            },
        ]));
    }

    #[test]
    fn test_tab_cycles_panels() {
        let mut app = signed_in();
        for expected in [Panel::Trainings, Panel::Sections, Panel::Menu, Panel::Advice] {
            app.handle_key(KeyCode::Tab);
            assert_eq!(app.selected_panel, expected);
        }
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.selected_panel, Panel::Menu);
    }

    #[test]
    fn test_enter_on_section_requests_join() {
        let mut app = signed_in();
        with_sections(&mut app);
        app.selected_panel = Panel::Sections;

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.handle_key(KeyCode::Enter), Some(Action::Join(2)));
    }

    #[test]
    fn test_enter_on_empty_sections_does_nothing() {
        let mut app = signed_in();
        app.selected_panel = Panel::Sections;
        assert_eq!(app.handle_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_menu_opens_panel() {
        let mut app = signed_in();
        app.selected_panel = Panel::Menu;
        // Home, Sections, Diary, Users, About
        app.selected_index = 2;
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.selected_panel, Panel::Trainings);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = signed_in();
        app.handle_key(KeyCode::Char('?'));
        assert!(app.show_help);
        assert_eq!(app.handle_key(KeyCode::Char('r')), None);
        assert!(!app.should_quit);
        app.handle_key(KeyCode::Esc);
        assert!(!app.show_help);
        assert_eq!(app.handle_key(KeyCode::Char('r')), Some(Action::Reload));
    }
}
