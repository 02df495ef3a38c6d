// Interactive dashboard built on ratatui

mod app;
mod dashboard;
mod widgets;

pub use app::{Action, App, Panel};
pub use dashboard::Dashboard;
