use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState},
};

use engine::{Column, Highlight, format_currency};

use crate::{app::AppState, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    if state.loading {
        render_message(frame, layout[0], "Loading debts…", theme);
    } else if state.store.is_empty() {
        render_message(frame, layout[0], "No debts to show.", theme);
    } else {
        render_table(frame, layout[0], state, theme);
    }
    render_summary(frame, layout[1], state, theme);
}

fn render_message(frame: &mut Frame<'_>, area: Rect, message: &str, theme: &Theme) {
    let block = Block::default()
        .title("Debts")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(theme.dim),
        )))
        .block(block)
        .alignment(Alignment::Center),
        area,
    );
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let rows = state.store.rows();

    let header_cells = std::iter::once(Cell::from("")).chain(Column::ALL.iter().map(|column| {
        Cell::from(aligned(column.label().to_string(), column.is_numeric()))
    }));
    let header = TableRow::new(header_cells).style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let body = rows
        .iter()
        .map(|row| {
            let checkbox = if state.selection.contains(row.id) {
                "[x]"
            } else {
                "[ ]"
            };
            let cells = std::iter::once(Cell::from(checkbox)).chain(Column::ALL.iter().map(
                |column| {
                    Cell::from(aligned(
                        column.cell(row, &state.currency_symbol),
                        column.is_numeric(),
                    ))
                },
            ));
            let style = match state.store.highlight(row.id) {
                Some(Highlight::Added) => Style::default().fg(theme.text).bg(theme.added),
                None => Style::default().fg(theme.text),
            };
            TableRow::new(cells).style(style)
        })
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(3),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Length(16),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(
            Block::default()
                .title("Debts")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state = TableState::default().with_selected(Some(state.cursor));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let summary = state.selection.summary();
    let total = format_currency(summary.rounded_total(), &state.currency_symbol);

    let line = Line::from(vec![
        Span::styled("Selected", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", summary.checked_count)),
        Span::styled("Total Balance", Style::default().fg(theme.dim)),
        Span::raw(": "),
        Span::styled(
            total,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn aligned(text: String, right: bool) -> Line<'static> {
    let line = Line::from(text);
    if right { line.right_aligned() } else { line }
}
