//! Message system for the warp-tui application.
//!
//! All state mutations flow through this centralized Message enum,
//! following the Elm Architecture (TEA) pattern. Key presses, poll results
//! and mutation outcomes all become messages handled by
//! [`crate::app::App::handle_message`].

use crate::core::PollUpdate;
use crate::state::{Mode, Screen, ToastType, WarpState};
use crate::warp::Mutation;

/// Direction for list selection movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMove {
    Next,
    Prev,
    First,
    Last,
}

/// All messages that can modify application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === Navigation ===
    /// Push a screen onto the stack
    Open(Screen),
    /// Pop the current screen (no-op on the main menu)
    Back,
    /// Move selection in the current menu
    MenuMove(SelectionMove),
    /// Activate the selected menu item
    Select,

    // === Port input ===
    /// Append a character to the port field
    PortInput(char),
    /// Delete the last character of the port field
    PortBackspace,
    /// Validate and submit the port field
    PortSubmit,

    // === WARP ===
    /// Issue a mutation in the background
    Mutate(Mutation),
    /// A background mutation finished
    MutationFinished {
        /// What was requested
        mutation: Mutation,
        /// Error message if the command failed or timed out
        error: Option<String>,
    },
    /// Result of a poll cycle
    Poll(PollUpdate),

    // === System ===
    /// Show toast notification
    Toast(String, ToastType),
    /// Periodic heartbeat tick
    Tick,
    /// Terminal resize event
    Resize(u16, u16),
    /// Quit the application
    Quit,
}

/// A selectable line in a menu, mapping a label to a message.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    /// Text shown in the list
    pub label: String,
    /// Shortcut shown next to the label, if any
    pub key: Option<&'static str>,
    /// Marks the currently active choice (e.g. the active mode)
    pub active: bool,
    /// The message to dispatch on Enter
    pub message: Message,
}

impl MenuItem {
    fn new(label: impl Into<String>, message: Message) -> Self {
        Self {
            label: label.into(),
            key: None,
            active: false,
            message,
        }
    }

    fn with_key(mut self, key: &'static str) -> Self {
        self.key = Some(key);
        self
    }

    fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

/// Menu entries for `screen`, derived from the current WARP state.
#[must_use]
pub fn menu_items(screen: &Screen, warp: &WarpState) -> Vec<MenuItem> {
    match screen {
        Screen::MainMenu => {
            let toggle = if warp.status.state.is_connected() {
                MenuItem::new("Disconnect", Message::Mutate(Mutation::Disconnect)).with_key("d")
            } else {
                MenuItem::new("Connect", Message::Mutate(Mutation::Connect)).with_key("c")
            };
            vec![
                toggle,
                MenuItem::new("Settings", Message::Open(Screen::Settings)).with_key("s"),
                MenuItem::new("Exit", Message::Quit).with_key("q"),
            ]
        }
        Screen::Settings => vec![
            MenuItem::new("Mode Settings", Message::Open(Screen::ModeSettings)).with_key("m"),
            MenuItem::new("Proxy Settings", Message::Open(Screen::ProxySettings)).with_key("p"),
            MenuItem::new("Back", Message::Back).with_key("Esc"),
        ],
        Screen::ModeSettings => {
            let mut items: Vec<MenuItem> = Mode::ALL
                .into_iter()
                .map(|mode| {
                    MenuItem::new(
                        format!("{:<12}{}", mode.cli_name(), mode.display_name()),
                        Message::Mutate(Mutation::SetMode(mode)),
                    )
                    .active(warp.settings.mode == Some(mode))
                })
                .collect();
            items.push(MenuItem::new("Back", Message::Back).with_key("Esc"));
            items
        }
        Screen::ProxySettings => vec![
            MenuItem::new(
                "Change Port",
                Message::Open(Screen::PortInput {
                    input: String::new(),
                    error: None,
                }),
            )
            .with_key("p"),
            MenuItem::new("Back", Message::Back).with_key("Esc"),
        ],
        Screen::PortInput { .. } => Vec::new(),
    }
}
