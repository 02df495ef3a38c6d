use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use super::app::{App, Panel};
use super::widgets;
use crate::api::ApiClient;
use crate::session::SessionState;

/// Dashboard manages the TUI lifecycle
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    date_format: String,
}

impl Dashboard {
    pub fn new(state: SessionState, date_format: impl Into<String>) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self {
            terminal,
            app: App::new(state),
            date_format: date_format.into(),
        })
    }

    /// Run the dashboard event loop until the user quits
    pub async fn run(&mut self, client: &ApiClient) -> Result<()> {
        self.draw()?;
        self.app.reload(client).await;

        loop {
            self.draw()?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        if let Some(action) = self.app.handle_key(key.code) {
                            tracing::debug!("Dashboard action {:?}", action);
                            self.draw()?;
                            self.app.perform(action, client).await;
                        }
                    }
                }
            }

            if self.app.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let app = &self.app;
        let date_format = self.date_format.as_str();
        self.terminal.draw(|f| ui(f, app, date_format))?;
        Ok(())
    }

    /// Cleanup terminal on exit
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;

        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn ui(f: &mut Frame, app: &App, date_format: &str) {
    let size = f.area();

    // Panels + status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[0]);

    let left_panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(columns[0]);

    let right_panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[1]);

    widgets::render_advice(
        left_panels[0],
        f.buffer_mut(),
        app.home.advice(),
        app.selected_panel == Panel::Advice,
    );

    widgets::render_trainings(
        left_panels[1],
        f.buffer_mut(),
        app.diary.trainings(),
        app.diary.sections(),
        date_format,
        app.selected_index,
        app.selected_panel == Panel::Trainings,
    );

    widgets::render_sections(
        right_panels[0],
        f.buffer_mut(),
        app.sections.sections(),
        app.sections.pending(),
        app.selected_index,
        app.selected_panel == Panel::Sections,
    );

    widgets::render_menu(
        right_panels[1],
        f.buffer_mut(),
        &app.menu(),
        app.selected_index,
        app.selected_panel == Panel::Menu,
    );

    widgets::render_status_bar(
        main_chunks[1],
        f.buffer_mut(),
        &app.state,
        app.status.as_ref(),
    );

    if app.show_help {
        let help_area = centered_rect(60, 70, size);
        widgets::render_help_overlay(help_area, f.buffer_mut());
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
