//! Domain state types for the warp-tui application.
//!
//! This module contains all core state types separated by domain:
//! - `connection`: WARP connection state and status snapshots
//! - `settings`: operating modes and settings snapshots
//! - `ui`: screens, navigation stack and toasts

mod connection;
mod settings;
mod ui;

// Re-export all types for easy access
pub use connection::{ConnectionState, StatusSnapshot};
pub use settings::{Mode, SettingsSnapshot};
pub use ui::{Screen, ScreenStack, Toast, ToastType};

/// Everything the UI knows about `warp-cli`.
///
/// `status` and `settings` are only ever written from poll results, never
/// from a mutation's intended effect.
#[derive(Clone, Debug, Default)]
pub struct WarpState {
    /// Last status poll result.
    pub status: StatusSnapshot,
    /// Last successful settings poll result.
    pub settings: SettingsSnapshot,
    /// Failure of the most recent settings query, cleared on success.
    pub settings_error: Option<String>,
    /// Transient outcome of the last connect/disconnect request.
    pub last_action: Option<String>,
    /// Most recent mutation failure.
    pub last_error: Option<String>,
}
