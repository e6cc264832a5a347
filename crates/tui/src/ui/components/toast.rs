use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use engine::NoticeKind;

use crate::{app::ToastState, ui::theme::Theme};

/// Draws the current notice in the bottom-right corner, above the hint bar.
pub fn render(frame: &mut Frame<'_>, area: Rect, toast: Option<&ToastState>, theme: &Theme) {
    let Some(toast) = toast else {
        return;
    };
    let text_width = toast.title.chars().count().max(toast.message.chars().count());
    let width = (text_width + 4).min(area.width as usize) as u16;
    let height = 4u16;
    let x = area.x + area.width.saturating_sub(width);
    let y = area
        .y
        .saturating_add(area.height.saturating_sub(height + 1));
    let rect = Rect { x, y, width, height }.intersection(area);

    let style = match toast.kind {
        NoticeKind::Success => Style::default().fg(theme.positive),
        NoticeKind::Error => Style::default().fg(theme.error),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style);
    let content = Paragraph::new(vec![
        Line::from(Span::styled(
            toast.title.as_str(),
            style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(toast.message.as_str(), Style::default().fg(theme.text))),
    ]);
    frame.render_widget(Clear, rect);
    frame.render_widget(content.block(block), rect);
}
