//! Selectable menu list for the current screen.
//!
//! Each row shows the shortcut key, the label and a marker on the active
//! choice (the current mode on Mode Settings).

use crate::message::MenuItem;
use crate::theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Width reserved for the shortcut column, e.g. ` Esc `.
const KEY_COLUMN: usize = 5;

/// Render a menu into `area`
pub fn render(
    frame: &mut Frame,
    area: Rect,
    items: &[MenuItem],
    list_state: &mut ListState,
    title: &str,
    focused: bool,
) {
    let border = if focused {
        theme::BORDER_FOCUSED
    } else {
        theme::BORDER_DEFAULT
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {title} "));

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let key = item.key.unwrap_or("");
            let label_style = if item.active {
                Style::default()
                    .fg(theme::SUCCESS)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::TEXT_PRIMARY)
            };
            let mut spans = vec![
                Span::styled(
                    format!("{key:^KEY_COLUMN$}"),
                    Style::default()
                        .fg(theme::ACCENT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(item.label.clone(), label_style),
            ];
            if item.active {
                spans.push(Span::styled(" ●", Style::default().fg(theme::SUCCESS)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(list_items).block(block).highlight_style(
        Style::default()
            .bg(theme::ROW_SELECTED_BG)
            .fg(theme::ROW_SELECTED_FG)
            .add_modifier(Modifier::BOLD),
    );
    let list = if focused {
        list.highlight_symbol("▶ ")
    } else {
        list.highlight_symbol("  ")
    };

    frame.render_stateful_widget(list, area, list_state);
}
