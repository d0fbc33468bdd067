//! Proxy port entry dialog.

use crate::constants;
use crate::theme;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the port dialog with the typed text and any validation error
pub fn render(frame: &mut Frame, input: &str, error: Option<&str>, current: Option<u16>) {
    let area = centered_rect(44, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_FOCUSED))
        .title(constants::TITLE_PORT_INPUT)
        .title_bottom(Line::from(constants::TITLE_PORT_FOOTER).centered());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let current = current.map_or_else(|| constants::MSG_NO_DATA.to_string(), |p| p.to_string());

    let feedback = match error {
        Some(e) => Line::from(Span::styled(e, Style::default().fg(theme::ERROR))),
        None => Line::from(""),
    };

    let text = vec![
        Line::from(Span::styled(
            constants::MSG_PORT_PROMPT,
            Style::default().fg(theme::TEXT_PRIMARY),
        )),
        Line::from(vec![
            Span::styled("Current: ", Style::default().fg(theme::TEXT_SECONDARY)),
            Span::styled(current, Style::default().fg(theme::ACCENT_SECONDARY)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" > ", Style::default().fg(theme::TEXT_SECONDARY)),
            Span::styled(input, Style::default().fg(theme::TEXT_PRIMARY)),
            Span::styled(
                "█",
                Style::default()
                    .fg(theme::ACCENT_SECONDARY)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
        ]),
        Line::from(""),
        feedback,
    ];

    frame.render_widget(Paragraph::new(text), inner);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
