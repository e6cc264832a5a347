pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;

use components::hints::{KeyHint, hint_separator, hints_to_spans};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Info bar, table, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    screens::debts::render(frame, layout[1], state, &theme);
    render_bottom_bar(frame, layout[2], state, &theme);

    if state.editor.is_open() {
        components::debt_form::render(frame, area, state, &theme);
    }
    components::toast::render(frame, area, state.toasts.current(), &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let status = if state.loading {
        Span::styled("loading", Style::default().fg(theme.dim))
    } else if state.store.is_loaded() {
        Span::styled("OK", Style::default().fg(theme.positive))
    } else {
        Span::styled("ERR", Style::default().fg(theme.error))
    };

    let line = Line::from(vec![
        Span::styled("Source", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.source_label)),
        Span::styled("Rows", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.store.total_row_count())),
        Span::styled("Removed", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.store.removed_count())),
        status,
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints = if state.editor.is_open() {
        vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("Enter", "save"),
            KeyHint::new("Esc", "cancel"),
        ]
    } else {
        vec![
            KeyHint::new("↑↓", "move"),
            KeyHint::new("Space", "select"),
            KeyHint::new("A", "all"),
            KeyHint::new("a", "add debt"),
            KeyHint::new("d", "remove"),
        ]
    };

    let mut parts = hints_to_spans(&hints, theme);
    parts.push(hint_separator(theme));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
