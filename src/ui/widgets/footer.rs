//! Footer widget with context-aware keybinding hints

use crate::app::{App, Screen};
use crate::theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render dashboard footer with shortcuts for the current screen
pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    render_hints(frame, area, &hints_for(app));
}

fn hints_for(app: &App) -> Vec<(&'static str, &'static str)> {
    // Port entry takes every key except these
    if matches!(app.stack.top().screen, Screen::PortInput { .. }) {
        return vec![("0-9", "Type"), ("Enter", "Apply"), ("Esc", "Cancel")];
    }

    let mut hints = vec![("↑↓", "Move"), ("Enter", "Select")];

    if app.stack.top().screen == Screen::MainMenu {
        hints.extend_from_slice(&[("c", "Connect"), ("d", "Disconnect"), ("s", "Settings")]);
    }

    if app.stack.depth() > 1 {
        hints.push(("Esc", "Back"));
    }

    hints.push(("q", "Quit"));
    hints
}

fn render_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let chunks = Layout::horizontal([
        Constraint::Min(0),     // Hints (left)
        Constraint::Length(16), // Branding (right)
    ])
    .split(area);

    // 1. Render hints on the left
    let mut hint_spans = Vec::new();
    let mut current_width = 0;
    let max_width = chunks[0].width as usize;

    hint_spans.push(Span::raw(" "));
    current_width += 1;

    for (i, (key, action)) in hints.iter().enumerate() {
        // "key" + " " + "action", plus " │ " before every item but the first
        let sep_width = if i > 0 { 3 } else { 0 };
        let item_width = key.chars().count() + 1 + action.len() + sep_width;

        if current_width + item_width > max_width {
            break;
        }

        if i > 0 {
            hint_spans.push(Span::styled(
                " │ ",
                Style::default().fg(theme::BORDER_DEFAULT),
            ));
        }
        hint_spans.push(Span::styled(
            *key,
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));
        hint_spans.push(Span::raw(" "));
        hint_spans.push(Span::styled(*action, Style::default().fg(theme::TEXT_SECONDARY)));

        current_width += item_width;
    }
    frame.render_widget(Paragraph::new(Line::from(hint_spans)), chunks[0]);

    // 2. Render branding on the right
    let branding = Line::from(vec![Span::styled(
        format!(
            "{} v{} ",
            crate::constants::APP_NAME,
            crate::constants::APP_VERSION
        ),
        Style::default().fg(theme::TEXT_SECONDARY),
    )]);
    frame.render_widget(
        Paragraph::new(branding).alignment(Alignment::Right),
        chunks[1],
    );
}
