//! Main view: status header, the active menu, the status panel and the
//! activity log.

use crate::app::{App, Screen};
use crate::state::{ConnectionState, WarpState};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::widgets;
use crate::constants;
use crate::logger;
use crate::message;
use crate::theme;
use crate::utils;

/// Below this height the activity log is dropped to keep the menu usable.
const MIN_HEIGHT_FOR_LOG: u16 = 20;

/// Render the dashboard view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // 1. Header (1 row)
    // 2. Main Content (Flexible)
    // 3. Footer (1 row)
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, &app.warp, header);
    widgets::footer::render_dashboard(frame, app, footer);

    // Left: menu | Right: status (top) + activity log (bottom)
    let [menu_area, right] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body);

    render_menu(frame, app, menu_area);

    if app.terminal_size.1 >= MIN_HEIGHT_FOR_LOG {
        let [status_area, log_area] =
            Layout::vertical([Constraint::Length(9), Constraint::Min(0)]).areas(right);
        render_status_panel(frame, &app.warp, app.is_polling_settings(), status_area);
        render_activity_log(frame, log_area);
    } else {
        render_status_panel(frame, &app.warp, app.is_polling_settings(), right);
    }
}

/// Badge color for a connection state.
fn state_color(state: &ConnectionState) -> Color {
    match state {
        ConnectionState::Connected => theme::SUCCESS,
        ConnectionState::Connecting => theme::WARNING,
        ConnectionState::Disconnected => theme::INACTIVE,
        ConnectionState::Timeout | ConnectionState::Error(_) => theme::ERROR,
        ConnectionState::Unknown | ConnectionState::Other(_) => theme::TEXT_SECONDARY,
    }
}

fn render_header(frame: &mut Frame, warp: &WarpState, area: Rect) {
    let state = &warp.status.state;
    let color = state_color(state);

    let mut spans = vec![
        Span::styled(
            format!(" {} ", constants::APP_NAME),
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(theme::BORDER_DEFAULT)),
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(
            utils::truncate(&state.to_string(), 40),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(reason) = &warp.status.reason {
        spans.push(Span::styled(
            format!(" ({})", utils::truncate(reason, 40)),
            Style::default().fg(theme::TEXT_SECONDARY),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_menu(frame: &mut Frame, app: &App, area: Rect) {
    // Port entry is drawn as an overlay; keep its parent menu underneath.
    let (menu_frame, focused) = match &app.stack.top().screen {
        Screen::PortInput { .. } => (app.stack.parent().unwrap_or(app.stack.top()), false),
        _ => (app.stack.top(), true),
    };

    let items = message::menu_items(&menu_frame.screen, &app.warp);
    let mut list_state = menu_frame.list_state.clone();
    widgets::menu::render(
        frame,
        area,
        &items,
        &mut list_state,
        menu_frame.screen.title(),
        focused,
    );
}

fn label(text: &str) -> Span<'_> {
    Span::styled(
        format!("{text:<13}"),
        Style::default().fg(theme::TEXT_SECONDARY),
    )
}

fn value_or_none(value: Option<String>) -> Span<'static> {
    match value {
        Some(v) => Span::styled(v, Style::default().fg(theme::TEXT_PRIMARY)),
        None => Span::styled(
            constants::MSG_NO_DATA,
            Style::default().fg(theme::TEXT_SECONDARY),
        ),
    }
}

/// `settings_live` marks mode and port as being refreshed right now; outside
/// the settings screens they are the last values seen.
fn render_status_panel(frame: &mut Frame, warp: &WarpState, settings_live: bool, area: Rect) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(constants::TITLE_STATUS);
    if settings_live {
        block = block.title(
            Line::from(Span::styled(
                constants::TITLE_SETTINGS_LIVE,
                Style::default().fg(theme::SUCCESS),
            ))
            .right_aligned(),
        );
    }

    let state = &warp.status.state;
    let mode = warp.settings.mode.map_or_else(
        || warp.settings.raw_mode.clone(),
        |m| Some(format!("{} ({m})", m.display_name())),
    );

    let mut lines = vec![
        Line::from(vec![
            label("State"),
            Span::styled(
                state.to_string(),
                Style::default()
                    .fg(state_color(state))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![label("Reason"), value_or_none(warp.status.reason.clone())]),
        Line::from(vec![label("Mode"), value_or_none(mode)]),
        Line::from(vec![
            label("Proxy port"),
            value_or_none(warp.settings.port.map(|p| p.to_string())),
        ]),
        Line::from(vec![label("Last action"), value_or_none(warp.last_action.clone())]),
    ];

    if let Some(e) = &warp.last_error {
        lines.push(Line::from(vec![
            label("Last error"),
            Span::styled(e.clone(), Style::default().fg(theme::ERROR)),
        ]));
    }
    if let Some(e) = &warp.settings_error {
        lines.push(Line::from(vec![
            label("Settings"),
            Span::styled(e.clone(), Style::default().fg(theme::WARNING)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_activity_log(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(constants::TITLE_LOG);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Newest entries that fit, oldest first (auto-scroll)
    let entries = logger::get_recent_logs(inner.height as usize);

    if entries.is_empty() {
        frame.render_widget(
            Paragraph::new("No activity yet").alignment(Alignment::Center),
            inner,
        );
        return;
    }

    // "[HH:MM:SS] LEVEL CAT   " prefix
    let max_msg_len = (inner.width as usize).saturating_sub(24);

    let lines: Vec<Line> = entries
        .iter()
        .map(|entry| {
            let time_str = utils::format_system_time_local(entry.timestamp);
            let level_style = Style::default().fg(entry.level.color());
            let msg_style = match entry.level {
                logger::LogLevel::Error | logger::LogLevel::Warning => level_style,
                logger::LogLevel::Info => Style::default().fg(theme::TEXT_PRIMARY),
                logger::LogLevel::Debug => Style::default().fg(theme::TEXT_SECONDARY),
            };

            Line::from(vec![
                Span::styled(
                    format!("[{time_str}] "),
                    Style::default().fg(theme::TEXT_SECONDARY),
                ),
                Span::styled(format!("{} ", entry.level.prefix()), level_style),
                Span::styled(
                    format!("{:<5} ", entry.category),
                    Style::default().fg(theme::BORDER_DEFAULT),
                ),
                Span::styled(utils::truncate(&entry.message, max_msg_len), msg_style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
