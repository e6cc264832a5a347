use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use engine::DraftField;

use crate::{app::AppState, ui::theme::Theme};

const FORM_WIDTH: u16 = 48;

/// The "Add Debt" modal: one line per draft field, focused field marked.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let height = DraftField::ALL.len() as u16 + 4;
    let rect = centered(area, FORM_WIDTH, height);

    let mut lines = DraftField::ALL
        .iter()
        .map(|field| field_line(state, *field, theme))
        .collect::<Vec<_>>();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Min Pay% is a whole percent (2.35 = 2.35%).",
        Style::default().fg(theme.dim),
    )));

    let block = Block::default()
        .title(Span::styled(
            " Add Debt ",
            Style::default().fg(theme.accent),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn field_line(state: &AppState, field: DraftField, theme: &Theme) -> Line<'static> {
    let focused = state.focus == field;
    let marker = if focused { "» " } else { "  " };
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    let text = state.editor.field_text(field).to_string();
    let cursor = if focused { "_" } else { "" };

    let mut spans = vec![
        Span::raw(marker),
        Span::styled(format!("{:<11}", field.label()), label_style),
        Span::raw(format!("{text}{cursor}")),
    ];
    if !numeric_ok(state, field) {
        spans.push(Span::styled("  not a number", Style::default().fg(theme.error)));
    }
    Line::from(spans)
}

fn numeric_ok(state: &AppState, field: DraftField) -> bool {
    let draft = state.editor.draft();
    let input = match field {
        DraftField::MinPayPercent => &draft.min_pay_percent,
        DraftField::Balance => &draft.balance,
        _ => return true,
    };
    input.is_empty() || input.value().is_some()
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
