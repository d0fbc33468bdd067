//! Core application state and logic.
//!
//! This module contains the main [`App`] struct. It owns the screen stack,
//! the last known `warp-cli` state and the background pollers, and it is
//! the only place that state changes (see [`App::handle_message`]).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::mpsc;
use std::time::Duration;

use crate::constants;
use crate::core::{poller, spawn_mutation, PollConfig, PollTarget, PollUpdate, PollerHandle};
use crate::message::{self, Message, SelectionMove};
use crate::warp::{validate_port, Mutation, WarpClient};

// Re-export state types for convenient access
pub use crate::state::{ConnectionState, Screen, ScreenStack, Toast, ToastType, WarpState};

/// Longest port number, in digits.
const PORT_MAX_DIGITS: usize = 5;

/// Main application state container.
pub struct App {
    /// Flag indicating the application should exit.
    pub should_quit: bool,

    // === WARP State ===
    /// Projection of the last `status` / `settings list` results.
    pub warp: WarpState,

    // === UI State ===
    pub stack: ScreenStack,
    pub toast: Option<Toast>,
    pub terminal_size: (u16, u16),

    // === Background Work ===
    client: WarpClient,
    poll_config: PollConfig,
    status_poller: Option<PollerHandle>,
    settings_poller: Option<PollerHandle>,
    cmd_tx: mpsc::Sender<Message>,
    cmd_rx: mpsc::Receiver<Message>,
}

impl App {
    /// Create the app and start polling `warp-cli status`.
    pub fn new(client: WarpClient, poll_interval: Duration) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let poll_config = PollConfig {
            interval: poll_interval,
            timeout: client.query_timeout(),
        };
        let status_poller = Some(poller::spawn(
            PollTarget::Status,
            client.runner(),
            poll_config,
        ));

        crate::log_info!("APP", "{} v{} started", constants::APP_NAME, constants::APP_VERSION);

        Self {
            should_quit: false,
            warp: WarpState::default(),
            stack: ScreenStack::new(Screen::MainMenu),
            toast: None,
            terminal_size: (0, 0),
            client,
            poll_config,
            status_poller,
            settings_poller: None,
            cmd_tx,
            cmd_rx,
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        // 1. Global: Ctrl-C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_message(Message::Quit);
            return;
        }

        // 2. Dismiss toast on Esc
        if key.code == KeyCode::Esc && self.toast.is_some() {
            self.toast = None;
            return;
        }

        // 3. Port entry captures every other key
        if matches!(self.stack.top().screen, Screen::PortInput { .. }) {
            self.handle_port_keys(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.handle_message(Message::Quit),
            KeyCode::Esc | KeyCode::Backspace => self.handle_message(Message::Back),
            KeyCode::Down | KeyCode::Char('j') => {
                self.handle_message(Message::MenuMove(SelectionMove::Next));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.handle_message(Message::MenuMove(SelectionMove::Prev));
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.handle_message(Message::MenuMove(SelectionMove::First));
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.handle_message(Message::MenuMove(SelectionMove::Last));
            }
            KeyCode::Enter => self.handle_message(Message::Select),
            KeyCode::Char(c) => self.handle_shortcut(c),
            _ => {}
        }
    }

    fn handle_port_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.handle_message(Message::Back),
            KeyCode::Enter => self.handle_message(Message::PortSubmit),
            KeyCode::Backspace => self.handle_message(Message::PortBackspace),
            KeyCode::Char(c) if c.is_ascii_digit() => self.handle_message(Message::PortInput(c)),
            _ => {}
        }
    }

    /// Single-letter shortcuts shown next to menu items.
    fn handle_shortcut(&mut self, c: char) {
        // c/d work on the main menu whichever of the two is listed
        if self.stack.top().screen == Screen::MainMenu && matches!(c, 'c' | 'd') {
            let mutation = if c == 'c' {
                Mutation::Connect
            } else {
                Mutation::Disconnect
            };
            self.handle_message(Message::Mutate(mutation));
            return;
        }

        let mut buf = [0; 4];
        let key: &str = c.encode_utf8(&mut buf);
        let target = message::menu_items(&self.stack.top().screen, &self.warp)
            .into_iter()
            .find(|item| item.key == Some(key));
        if let Some(item) = target {
            self.handle_message(item.message);
        }
    }

    /// Central message handler (TEA update function).
    pub fn handle_message(&mut self, msg: Message) {
        match msg {
            // === Navigation ===
            Message::Open(screen) => {
                crate::log_debug!("UI", "Open {}", screen.title());
                let restart = screen.polls_settings();
                self.stack.push(screen);
                self.sync_settings_poller(restart);
            }
            Message::Back => {
                if let Some(screen) = self.stack.pop() {
                    crate::log_debug!("UI", "Close {}", screen.title());
                    self.sync_settings_poller(false);
                }
            }
            Message::MenuMove(movement) => self.move_selection(movement),
            Message::Select => {
                let frame = self.stack.top();
                let chosen = frame.list_state.selected().and_then(|idx| {
                    message::menu_items(&frame.screen, &self.warp)
                        .into_iter()
                        .nth(idx)
                });
                if let Some(item) = chosen {
                    self.handle_message(item.message);
                }
            }

            // === Port input ===
            Message::PortInput(c) => {
                if let Screen::PortInput { input, error } = &mut self.stack.top_mut().screen {
                    if input.len() < PORT_MAX_DIGITS {
                        input.push(c);
                    }
                    *error = None;
                }
            }
            Message::PortBackspace => {
                if let Screen::PortInput { input, error } = &mut self.stack.top_mut().screen {
                    input.pop();
                    *error = None;
                }
            }
            Message::PortSubmit => self.submit_port(),

            // === WARP ===
            Message::Mutate(mutation) => {
                match mutation {
                    Mutation::Connect => {
                        self.warp.last_action = Some(constants::MSG_CONNECT_REQUESTED.to_string());
                    }
                    Mutation::Disconnect => {
                        self.warp.last_action =
                            Some(constants::MSG_DISCONNECT_REQUESTED.to_string());
                    }
                    Mutation::SetMode(_) | Mutation::SetPort(_) => {}
                }
                spawn_mutation(&self.client, mutation, self.cmd_tx.clone());
            }
            Message::MutationFinished { mutation, error } => {
                self.finish_mutation(mutation, error);
            }
            Message::Poll(update) => self.apply_poll(update),

            // === System ===
            Message::Toast(message, toast_type) => self.show_toast(message, toast_type),
            Message::Tick => {
                if self.toast.as_ref().is_some_and(Toast::is_expired) {
                    self.toast = None;
                }
            }
            Message::Resize(width, height) => {
                self.terminal_size = (width, height);
            }
            Message::Quit => {
                crate::log_info!("APP", "Exiting");
                self.should_quit = true;
            }
        }
    }

    fn move_selection(&mut self, movement: SelectionMove) {
        let len = message::menu_items(&self.stack.top().screen, &self.warp).len();
        if len == 0 {
            return;
        }
        let state = &mut self.stack.top_mut().list_state;
        let current = state.selected().unwrap_or(0).min(len - 1);
        let next = match movement {
            SelectionMove::Next => (current + 1) % len,
            SelectionMove::Prev => (current + len - 1) % len,
            SelectionMove::First => 0,
            SelectionMove::Last => len - 1,
        };
        state.select(Some(next));
    }

    /// Validate the port field. Only a valid port ever reaches `warp-cli`.
    fn submit_port(&mut self) {
        let Screen::PortInput { input, error } = &mut self.stack.top_mut().screen else {
            return;
        };
        match validate_port(input) {
            Ok(port) => {
                self.handle_message(Message::Back);
                self.handle_message(Message::Mutate(Mutation::SetPort(port)));
            }
            Err(e) => {
                crate::log_debug!("UI", "Rejected port {input:?}: {e}");
                *error = Some(e);
            }
        }
    }

    /// Connect/disconnect failures are shown; settings failures are recorded.
    fn finish_mutation(&mut self, mutation: Mutation, error: Option<String>) {
        match error {
            Some(e) if mutation.is_connection_change() => {
                self.warp.last_action = Some(e.clone());
                self.handle_message(Message::Toast(e, ToastType::Error));
            }
            Some(e) => self.warp.last_error = Some(e),
            None if !mutation.is_connection_change() => self.warp.last_error = None,
            None => {}
        }
    }

    fn apply_poll(&mut self, update: PollUpdate) {
        match update {
            PollUpdate::Status(snapshot) => {
                if let Some((message, toast_type)) =
                    transition_toast(&self.warp.status.state, &snapshot.state)
                {
                    self.handle_message(Message::Toast(message, toast_type));
                }
                self.warp.status = snapshot;
            }
            PollUpdate::Settings(snapshot) => {
                self.warp.settings = snapshot;
                self.warp.settings_error = None;
            }
            PollUpdate::SettingsFailed(e) => self.warp.settings_error = Some(e),
        }
    }

    /// Keep exactly one settings poller while a settings screen is on the
    /// stack, and none otherwise.
    fn sync_settings_poller(&mut self, restart: bool) {
        if !self.stack.contains(Screen::polls_settings) {
            self.settings_poller = None;
            return;
        }
        if restart || self.settings_poller.is_none() {
            // Assigning drops (and cancels) the previous poller.
            self.settings_poller = Some(poller::spawn(
                PollTarget::Settings,
                self.client.runner(),
                self.poll_config,
            ));
        }
    }

    /// Whether the settings poller is currently alive.
    pub const fn is_polling_settings(&self) -> bool {
        self.settings_poller.is_some()
    }

    /// Show a toast notification
    fn show_toast(&mut self, message: String, toast_type: ToastType) {
        self.toast = Some(Toast::new(message, toast_type));
    }

    /// Periodic tick from the event loop.
    pub fn on_tick(&mut self) {
        self.handle_message(Message::Tick);
    }

    /// Process all pending external events (poll results and finished
    /// mutations). Called by the main loop before every draw.
    pub fn process_external(&mut self) {
        // 1. Poll results, collected first to avoid borrowing the handles
        let updates: Vec<PollUpdate> = [&self.status_poller, &self.settings_poller]
            .into_iter()
            .flatten()
            .flat_map(PollerHandle::drain)
            .collect();
        for update in updates {
            self.handle_message(Message::Poll(update));
        }

        // 2. Mutation feedback
        while let Ok(msg) = self.cmd_rx.try_recv() {
            self.handle_message(msg);
        }
    }

    /// Handle terminal resize.
    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.handle_message(Message::Resize(width, height));
    }
}

/// Toast for a status change worth interrupting the user for.
fn transition_toast(old: &ConnectionState, new: &ConnectionState) -> Option<(String, ToastType)> {
    if old == new {
        return None;
    }
    match new {
        ConnectionState::Connected => {
            Some((constants::MSG_CONNECTED.to_string(), ToastType::Success))
        }
        ConnectionState::Disconnected if old.is_connected() => {
            Some((constants::MSG_DISCONNECTED.to_string(), ToastType::Info))
        }
        ConnectionState::Timeout | ConnectionState::Error(_) if !old.is_failure() => Some((
            format!("{}{new}", constants::MSG_STATUS_FAILED),
            ToastType::Warning,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Mode, StatusSnapshot};
    use crate::warp::runner::MockCommandRunner;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    type Calls = Arc<Mutex<Vec<Vec<String>>>>;

    /// An `App` whose runner records every invocation and prints nothing.
    fn test_app() -> (App, Calls) {
        let calls: Calls = Arc::default();
        let recorded = Arc::clone(&calls);
        let mut mock = MockCommandRunner::new();
        mock.expect_run().returning(move |args, _| {
            recorded.lock().unwrap().push(args);
            Ok(String::new())
        });
        let client = WarpClient::new(
            Arc::new(mock),
            Duration::from_secs(1),
            Duration::from_secs(1),
        );
        (App::new(client, Duration::from_millis(20)), calls)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn wait_for_mutation(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(3);
        while Instant::now() < deadline {
            if let Ok(msg) = app.cmd_rx.recv_timeout(Duration::from_millis(50)) {
                app.handle_message(msg);
                return;
            }
        }
        panic!("mutation did not finish");
    }

    fn was_called(calls: &Calls, args: &[&str]) -> bool {
        calls
            .lock()
            .unwrap()
            .iter()
            .any(|call| call.iter().map(String::as_str).eq(args.iter().copied()))
    }

    fn open_port_input(app: &mut App, input: &str) {
        app.handle_message(Message::Open(Screen::Settings));
        app.handle_message(Message::Open(Screen::ProxySettings));
        app.handle_message(Message::Open(Screen::PortInput {
            input: input.to_string(),
            error: None,
        }));
    }

    #[test]
    fn test_back_on_main_menu_is_noop() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.stack.depth(), 1);
        assert_eq!(app.stack.top().screen, Screen::MainMenu);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_back_returns_to_parent() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.stack.top().screen, Screen::Settings);
        app.handle_key(key(KeyCode::Char('m')));
        assert_eq!(app.stack.top().screen, Screen::ModeSettings);

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.stack.top().screen, Screen::Settings);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.stack.top().screen, Screen::MainMenu);
    }

    #[test]
    fn test_settings_poller_follows_screens() {
        let (mut app, _) = test_app();
        assert!(!app.is_polling_settings());

        app.handle_message(Message::Open(Screen::Settings));
        assert!(!app.is_polling_settings());

        app.handle_message(Message::Open(Screen::ProxySettings));
        assert!(app.is_polling_settings());

        // Port entry sits on top of Proxy Settings, which is still open.
        app.handle_message(Message::Open(Screen::PortInput {
            input: String::new(),
            error: None,
        }));
        assert!(app.is_polling_settings());
        app.handle_message(Message::Back);
        assert!(app.is_polling_settings());

        app.handle_message(Message::Back);
        assert!(!app.is_polling_settings());
    }

    #[test]
    fn test_invalid_port_never_reaches_runner() {
        for bad in ["", "0", "65536"] {
            let (mut app, calls) = test_app();
            open_port_input(&mut app, bad);
            app.handle_key(key(KeyCode::Enter));

            match &app.stack.top().screen {
                Screen::PortInput { error, .. } => assert!(error.is_some(), "{bad:?} accepted"),
                other => panic!("left port input on {bad:?}: {other:?}"),
            }
            std::thread::sleep(Duration::from_millis(50));
            assert!(!calls.lock().unwrap().iter().any(|c| c[0] == "proxy"));
        }
    }

    #[test]
    fn test_valid_port_is_applied_and_closes_input() {
        let (mut app, calls) = test_app();
        open_port_input(&mut app, "");
        for c in "40000".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.stack.top().screen, Screen::ProxySettings);
        wait_for_mutation(&mut app);
        assert!(was_called(&calls, &["proxy", "port", "40000"]));
        assert_eq!(app.warp.last_error, None);
    }

    #[test]
    fn test_port_input_only_accepts_digits() {
        let (mut app, _) = test_app();
        open_port_input(&mut app, "");
        for code in [
            KeyCode::Char('8'),
            KeyCode::Char('q'),
            KeyCode::Char('x'),
            KeyCode::Char('0'),
        ] {
            app.handle_key(key(code));
        }
        app.handle_key(key(KeyCode::Backspace));

        assert!(!app.should_quit);
        assert_eq!(
            app.stack.top().screen,
            Screen::PortInput {
                input: "8".into(),
                error: None
            }
        );
    }

    #[test]
    fn test_connect_shortcut_sets_requested_message() {
        let (mut app, calls) = test_app();
        app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(
            app.warp.last_action.as_deref(),
            Some(constants::MSG_CONNECT_REQUESTED)
        );
        // The state is only ever taken from the poller.
        assert_eq!(app.warp.status.state, ConnectionState::Unknown);

        wait_for_mutation(&mut app);
        assert!(was_called(&calls, &["connect"]));
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_connection_failure_is_shown() {
        let (mut app, _) = test_app();
        app.handle_message(Message::MutationFinished {
            mutation: Mutation::Disconnect,
            error: Some("Failed to disconnect: timed out".into()),
        });
        assert_eq!(
            app.warp.last_action.as_deref(),
            Some("Failed to disconnect: timed out")
        );
        assert_eq!(
            app.toast.as_ref().map(|t| t.toast_type),
            Some(ToastType::Error)
        );
        assert_eq!(app.warp.last_error, None);
    }

    #[test]
    fn test_settings_failure_is_only_recorded() {
        let (mut app, _) = test_app();
        app.handle_message(Message::MutationFinished {
            mutation: Mutation::SetMode(Mode::Doh),
            error: Some("Failed to set mode to doh: timed out".into()),
        });
        assert!(app.toast.is_none());
        assert_eq!(
            app.warp.last_error.as_deref(),
            Some("Failed to set mode to doh: timed out")
        );

        app.handle_message(Message::MutationFinished {
            mutation: Mutation::SetMode(Mode::Doh),
            error: None,
        });
        assert_eq!(app.warp.last_error, None);
    }

    #[test]
    fn test_poll_updates_drive_main_menu() {
        let (mut app, _) = test_app();
        app.handle_message(Message::Poll(PollUpdate::Status(StatusSnapshot {
            state: ConnectionState::Connected,
            reason: None,
        })));

        let items = message::menu_items(&app.stack.top().screen, &app.warp);
        assert_eq!(items[0].label, "Disconnect");

        // Enter on the first item disconnects.
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            app.warp.last_action.as_deref(),
            Some(constants::MSG_DISCONNECT_REQUESTED)
        );
    }

    #[test]
    fn test_status_transitions_raise_toasts() {
        let (mut app, _) = test_app();
        let poll = |state| {
            Message::Poll(PollUpdate::Status(StatusSnapshot {
                state,
                reason: None,
            }))
        };

        app.handle_message(poll(ConnectionState::Connected));
        assert_eq!(
            app.toast.as_ref().map(|t| t.toast_type),
            Some(ToastType::Success)
        );

        app.toast = None;
        app.handle_message(poll(ConnectionState::Timeout));
        assert_eq!(
            app.toast.as_ref().map(|t| t.toast_type),
            Some(ToastType::Warning)
        );

        // Failure to failure is not news.
        app.toast = None;
        app.handle_message(poll(ConnectionState::Error("gone".into())));
        assert!(app.toast.is_none());

        // Disconnected only toasts when leaving Connected.
        app.handle_message(poll(ConnectionState::Disconnected));
        assert!(app.toast.is_none());
        assert_eq!(app.warp.status.state, ConnectionState::Disconnected);
    }

    #[test]
    fn test_settings_failure_keeps_last_good_values() {
        let (mut app, _) = test_app();
        app.handle_message(Message::Poll(PollUpdate::Settings(
            crate::warp::parse_settings("Mode: WarpProxy on port 40000"),
        )));
        app.handle_message(Message::Poll(PollUpdate::SettingsFailed("timed out".into())));

        assert_eq!(app.warp.settings.mode, Some(Mode::Proxy));
        assert_eq!(app.warp.settings.port, Some(40000));
        assert_eq!(app.warp.settings_error.as_deref(), Some("timed out"));
    }

    #[test]
    fn test_menu_selection_wraps() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.stack.top().list_state.selected(), Some(2));
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.stack.top().list_state.selected(), Some(0));
        app.handle_key(key(KeyCode::End));
        assert_eq!(app.stack.top().list_state.selected(), Some(2));

        // Exit
        app.handle_key(key(KeyCode::Enter));
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let (mut app, _) = test_app();
        open_port_input(&mut app, "");
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_toast_expires_on_tick() {
        let (mut app, _) = test_app();
        app.handle_message(Message::Toast("hello".into(), ToastType::Info));
        app.on_tick();
        assert!(app.toast.is_some());

        if let Some(toast) = app.toast.as_mut() {
            toast.expires = Instant::now().checked_sub(Duration::from_secs(1)).unwrap();
        }
        app.on_tick();
        assert!(app.toast.is_none());
    }
}
