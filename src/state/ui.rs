//! UI state types: screens, the navigation stack and toasts.

use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

/// Duration for toast notifications to remain visible.
pub const DISMISS_DURATION: Duration = Duration::from_secs(4);

/// A view that can sit on the navigation stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Root menu: connect/disconnect, settings, exit.
    MainMenu,
    /// Settings submenu.
    Settings,
    /// Mode picker (polls `settings list` while open).
    ModeSettings,
    /// Proxy port overview (polls `settings list` while open).
    ProxySettings,
    /// Port entry dialog.
    PortInput {
        /// Text typed so far.
        input: String,
        /// Validation error from the last submit.
        error: Option<String>,
    },
}

impl Screen {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::MainMenu => "Main Menu",
            Self::Settings => "Settings",
            Self::ModeSettings => "Mode Settings",
            Self::ProxySettings => "Proxy Settings",
            Self::PortInput { .. } => "Proxy Port",
        }
    }

    /// Whether this screen needs the settings poller.
    #[must_use]
    pub const fn polls_settings(&self) -> bool {
        matches!(self, Self::ModeSettings | Self::ProxySettings)
    }
}

/// A screen plus its own list selection.
#[derive(Debug)]
pub struct ScreenFrame {
    pub screen: Screen,
    pub list_state: ListState,
}

impl ScreenFrame {
    fn new(screen: Screen) -> Self {
        Self {
            screen,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }
}

/// Last-in-first-out navigation history. The root frame is never popped.
#[derive(Debug)]
pub struct ScreenStack {
    frames: Vec<ScreenFrame>,
}

impl ScreenStack {
    #[must_use]
    pub fn new(root: Screen) -> Self {
        Self {
            frames: vec![ScreenFrame::new(root)],
        }
    }

    pub fn push(&mut self, screen: Screen) {
        self.frames.push(ScreenFrame::new(screen));
    }

    /// Pop the top screen. Returns `None` when only the root is left.
    pub fn pop(&mut self) -> Option<Screen> {
        if self.frames.len() > 1 {
            self.frames.pop().map(|frame| frame.screen)
        } else {
            None
        }
    }

    #[must_use]
    pub fn top(&self) -> &ScreenFrame {
        // Invariant: the root frame is never removed.
        &self.frames[self.frames.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut ScreenFrame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// The frame directly below the top one, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&ScreenFrame> {
        self.frames.len().checked_sub(2).map(|i| &self.frames[i])
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn contains(&self, pred: impl Fn(&Screen) -> bool) -> bool {
        self.frames.iter().any(|frame| pred(&frame.screen))
    }
}

/// Types of toast notifications for color coding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToastType {
    /// Informational message (Blue)
    #[default]
    Info,
    /// Success message (Green)
    Success,
    /// Warning message (Yellow)
    Warning,
    /// Error message (Red)
    Error,
}

/// Toast notification for temporary messages.
#[derive(Clone, Debug)]
pub struct Toast {
    /// Message to display.
    pub message: String,
    /// Type of toast for styling.
    #[allow(clippy::struct_field_names)]
    pub toast_type: ToastType,
    /// When the toast should disappear.
    pub expires: Instant,
}

impl Toast {
    #[must_use]
    pub fn new(message: String, toast_type: ToastType) -> Self {
        Self {
            message,
            toast_type,
            expires: Instant::now() + DISMISS_DURATION,
        }
    }

    /// Check if the toast notification has expired
    pub fn is_expired(&self) -> bool {
        Instant::now() > self.expires
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_never_popped() {
        let mut stack = ScreenStack::new(Screen::MainMenu);
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top().screen, Screen::MainMenu);
    }

    #[test]
    fn test_push_pop_order() {
        let mut stack = ScreenStack::new(Screen::MainMenu);
        stack.push(Screen::Settings);
        stack.push(Screen::ProxySettings);

        assert_eq!(stack.parent().map(|f| &f.screen), Some(&Screen::Settings));
        assert_eq!(stack.pop(), Some(Screen::ProxySettings));
        assert_eq!(stack.pop(), Some(Screen::Settings));
        assert_eq!(stack.pop(), None);
        assert!(stack.parent().is_none());
    }

    #[test]
    fn test_each_frame_keeps_its_selection() {
        let mut stack = ScreenStack::new(Screen::MainMenu);
        stack.top_mut().list_state.select(Some(2));
        stack.push(Screen::Settings);
        assert_eq!(stack.top().list_state.selected(), Some(0));
        stack.pop();
        assert_eq!(stack.top().list_state.selected(), Some(2));
    }

    #[test]
    fn test_contains() {
        let mut stack = ScreenStack::new(Screen::MainMenu);
        assert!(!stack.contains(Screen::polls_settings));
        stack.push(Screen::Settings);
        stack.push(Screen::ModeSettings);
        assert!(stack.contains(Screen::polls_settings));
    }

    #[test]
    fn test_toast_expiry() {
        let toast = Toast::new("hi".into(), ToastType::Info);
        assert!(!toast.is_expired());
        let old = Toast {
            expires: Instant::now().checked_sub(Duration::from_secs(1)).unwrap(),
            ..toast
        };
        assert!(old.is_expired());
    }
}
