//! UI rendering module

mod dashboard;
mod overlays;
mod widgets;

use crate::app::{App, Screen};
use ratatui::Frame;

/// Main render function - draws the dashboard, then any overlay on top
pub fn render(frame: &mut Frame, app: &App) {
    // Base view
    dashboard::render(frame, app);

    // Port entry is a dialog over the screen that opened it
    if let Screen::PortInput { input, error } = &app.stack.top().screen {
        overlays::port_input::render(frame, input, error.as_deref(), app.warp.settings.port);
    }

    // Render toast notification if present
    if app.toast.is_some() {
        overlays::toast::render(frame, app);
    }
}
