use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

use crate::models::{format_date, AdviceStatus, Section, TrainingEntry};
use crate::routes::Route;
use crate::session::SessionState;
use crate::views::{AdviceState, Flash, ListState};

fn panel(title: &str, is_selected: bool) -> Block<'_> {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

fn highlight(is_selected: bool, idx: usize, selected_index: usize) -> Style {
    if is_selected && idx == selected_index {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Placeholder text for a list that has nothing to show
fn placeholder<T>(state: &ListState<T>) -> Option<Paragraph<'static>> {
    let (text, color) = match state {
        ListState::Idle | ListState::Ready(_) => return None,
        ListState::Loading => ("Loading…".to_string(), Color::Gray),
        ListState::Empty(m) => (m.clone(), Color::Gray),
        ListState::Blocked(m) => (format!("🔒 {}", m), Color::Yellow),
        ListState::Failed(m) => (format!("❌ {}", m), Color::Red),
    };

    Some(
        Paragraph::new(text)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true }),
    )
}

/// Render the coach's advice
pub fn render_advice(area: Rect, buf: &mut Buffer, advice: &AdviceState, is_selected: bool) {
    let block = panel(" 🧠 Coach ", is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    let lines = match advice {
        AdviceState::Hidden => vec![Line::from(Span::styled(
            "No advice right now",
            Style::default().fg(Color::Gray),
        ))],
        AdviceState::Loading => vec![Line::from(Span::styled(
            "Asking the coach…",
            Style::default().fg(Color::Gray),
        ))],
        AdviceState::Ready(advice) => {
            let color = match advice.status {
                AdviceStatus::Rest | AdviceStatus::Recovery => Color::Yellow,
                AdviceStatus::Progress => Color::Green,
                _ => Color::Cyan,
            };

            vec![
                Line::from(Span::styled(
                    format!("{} {}", advice.status.icon(), advice.message),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Suggested intensity: ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        format!("{}/10", advice.suggested_intensity),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
            ]
        }
    };

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

/// Render recent trainings list
pub fn render_trainings(
    area: Rect,
    buf: &mut Buffer,
    trainings: &ListState<TrainingEntry>,
    sections: &[Section],
    date_format: &str,
    selected_index: usize,
    is_selected: bool,
) {
    let block = panel(" 📅 Recent Trainings ", is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    if let Some(text) = placeholder(trainings) {
        text.render(inner, buf);
        return;
    }

    let items: Vec<ListItem> = trainings
        .items()
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let date = entry
                .date
                .as_deref()
                .map(|raw| format_date(raw, date_format))
                .unwrap_or_else(|| "—".to_string());

            let content = format!(
                "{:<10} {:<14} {:>4}min {:>2}/10",
                date,
                entry.section.label(sections),
                entry.duration,
                entry.intensity
            );

            ListItem::new(Line::from(Span::styled(
                content,
                highlight(is_selected, idx, selected_index),
            )))
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render sections; Enter joins the highlighted one
pub fn render_sections(
    area: Rect,
    buf: &mut Buffer,
    sections: &ListState<Section>,
    pending: Option<i64>,
    selected_index: usize,
    is_selected: bool,
) {
    let block = panel(" 🥊 Sections ", is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    if let Some(text) = placeholder(sections) {
        text.render(inner, buf);
        return;
    }

    let items: Vec<ListItem> = sections
        .items()
        .iter()
        .enumerate()
        .map(|(idx, section)| {
            let marker = if pending == Some(section.id) {
                " (joining…)"
            } else {
                ""
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("#{:<3} ", section.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{}{}", section.name, marker),
                    highlight(is_selected, idx, selected_index),
                ),
            ]))
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render the navigation menu for the current session
pub fn render_menu(
    area: Rect,
    buf: &mut Buffer,
    routes: &[Route],
    selected_index: usize,
    is_selected: bool,
) {
    let block = panel(" ⚡ Menu ", is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    let items: Vec<ListItem> = routes
        .iter()
        .enumerate()
        .map(|(idx, route)| {
            let line_style = if is_selected && idx == selected_index {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Cyan)
            };

            ListItem::new(Line::from(Span::styled(
                format!("  {:<10} {}", route.title(), route.path()),
                line_style,
            )))
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render help overlay
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ❓ Help ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    block.render(area, buf);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Navigation:",
            Style::default().fg(Color::Cyan),
        )),
        Line::from("  ↑/k       - Move up"),
        Line::from("  ↓/j       - Move down"),
        Line::from("  ←/→       - Previous / next panel"),
        Line::from("  Tab       - Next panel"),
        Line::from("  Shift+Tab - Previous panel"),
        Line::from(""),
        Line::from(Span::styled("Actions:", Style::default().fg(Color::Cyan))),
        Line::from("  Enter     - Join section / open menu entry"),
        Line::from("  r         - Reload from server"),
        Line::from(""),
        Line::from(Span::styled("Other:", Style::default().fg(Color::Cyan))),
        Line::from("  ?         - Toggle this help"),
        Line::from("  q         - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or ESC to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    Paragraph::new(help_text).render(inner, buf);
}

/// Render status bar at bottom
pub fn render_status_bar(area: Rect, buf: &mut Buffer, state: &SessionState, flash: Option<&Flash>) {
    let session = if state.is_authenticated() {
        Span::styled(
            " ● Logged in ",
            Style::default().fg(Color::Green).bg(Color::DarkGray),
        )
    } else {
        Span::styled(
            " ○ Anonymous ",
            Style::default().fg(Color::Yellow).bg(Color::DarkGray),
        )
    };

    let mut spans = vec![session];

    if let Some(flash) = flash {
        let color = if flash.is_error() {
            Color::Red
        } else {
            Color::Green
        };
        spans.push(Span::styled(
            format!(" {} ", flash),
            Style::default().fg(color).bg(Color::DarkGray),
        ));
    }

    spans.push(Span::styled(
        " Press ? for help ",
        Style::default().fg(Color::Gray).bg(Color::DarkGray),
    ));

    Paragraph::new(Line::from(spans)).render(area, buf);
}
