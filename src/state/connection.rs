//! WARP connection state types.

use serde::Serialize;
use std::fmt;

/// Connection state as last reported by `warp-cli status`.
///
/// The poller is the only producer. `Timeout` and `Error` are set by the
/// poller itself when a query fails; every other variant mirrors the
/// tool's `Status update:` line.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "detail")]
pub enum ConnectionState {
    /// Tunnel is up.
    Connected,
    /// Tunnel is being established.
    Connecting,
    /// Tunnel is down.
    Disconnected,
    /// No status line was reported.
    #[default]
    Unknown,
    /// The status query exceeded its timeout.
    Timeout,
    /// The status query could not be executed.
    Error(String),
    /// Any other status text, kept verbatim.
    Other(String),
}

impl ConnectionState {
    /// Map the text after `Status update:` to a state.
    #[must_use]
    pub fn from_status_text(text: &str) -> Self {
        match text.trim() {
            "" | "Unknown" => Self::Unknown,
            "Connected" => Self::Connected,
            "Connecting" => Self::Connecting,
            "Disconnected" => Self::Disconnected,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Whether this state came from a failed query rather than the tool.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Timeout | Self::Error(_))
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected => write!(f, "Connected"),
            Self::Connecting => write!(f, "Connecting"),
            Self::Disconnected => write!(f, "Disconnected"),
            Self::Unknown => write!(f, "Unknown"),
            Self::Timeout => write!(f, "Timeout"),
            Self::Error(msg) => write!(f, "Error: {msg}"),
            Self::Other(text) => write!(f, "{text}"),
        }
    }
}

/// One parsed `warp-cli status` result.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct StatusSnapshot {
    /// Current connection state.
    pub state: ConnectionState,
    /// Optional explanation, e.g. why a disconnect happened.
    pub reason: Option<String>,
}

impl StatusSnapshot {
    /// Snapshot for a failed query; the reason is always cleared.
    #[must_use]
    pub const fn failed(state: ConnectionState) -> Self {
        Self {
            state,
            reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_states() {
        assert_eq!(
            ConnectionState::from_status_text("Connected"),
            ConnectionState::Connected
        );
        assert_eq!(
            ConnectionState::from_status_text("  Disconnected "),
            ConnectionState::Disconnected
        );
        assert_eq!(
            ConnectionState::from_status_text("Connecting"),
            ConnectionState::Connecting
        );
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(ConnectionState::from_status_text(""), ConnectionState::Unknown);
        assert_eq!(ConnectionState::from_status_text("   "), ConnectionState::Unknown);
    }

    #[test]
    fn test_other_text_is_kept() {
        let state = ConnectionState::from_status_text("Registration Missing");
        assert_eq!(state, ConnectionState::Other("Registration Missing".into()));
        assert_eq!(state.to_string(), "Registration Missing");
    }

    #[test]
    fn test_failure_states() {
        assert!(ConnectionState::Timeout.is_failure());
        assert!(ConnectionState::Error("boom".into()).is_failure());
        assert!(!ConnectionState::Unknown.is_failure());
        assert_eq!(ConnectionState::Error("boom".into()).to_string(), "Error: boom");
    }
}
