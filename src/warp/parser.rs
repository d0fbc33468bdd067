//! Parsers for `warp-cli` text output.
//!
//! Both parsers are total: missing lines are a valid outcome, not an error.

use crate::state::{ConnectionState, Mode, SettingsSnapshot, StatusSnapshot};

const STATUS_PREFIX: &str = "Status update:";
const REASON_PREFIX: &str = "Reason:";
const MODE_MARKER: &str = "Mode:";
const PORT_TOKEN: &str = "port";

/// Parse `warp-cli status` output.
///
/// Lines may come in any order. Without a `Status update:` line the result
/// is `Unknown` with no reason.
#[must_use]
pub fn parse_status(output: &str) -> StatusSnapshot {
    let mut state = None;
    let mut reason = None;

    for line in output.lines() {
        let line = line.trim_start();
        if let Some(value) = line.strip_prefix(STATUS_PREFIX) {
            if state.is_none() {
                state = Some(ConnectionState::from_status_text(value));
            }
        } else if let Some(value) = line.strip_prefix(REASON_PREFIX) {
            let value = value.trim();
            if reason.is_none() && !value.is_empty() {
                reason = Some(value.to_string());
            }
        }
    }

    match state {
        Some(state) => StatusSnapshot { state, reason },
        None => StatusSnapshot::default(),
    }
}

/// Parse `warp-cli settings list` output.
#[must_use]
pub fn parse_settings(output: &str) -> SettingsSnapshot {
    let Some(raw) = output
        .lines()
        .find_map(|line| line.split_once(MODE_MARKER).map(|(_, rest)| rest.trim()))
    else {
        return SettingsSnapshot::default();
    };

    let mode = Mode::from_settings_label(raw);
    let port = if mode == Some(Mode::Proxy) {
        parse_proxy_port(raw)
    } else {
        None
    };

    SettingsSnapshot {
        mode,
        raw_mode: Some(raw.to_string()),
        port,
    }
}

/// Extract the port that follows the `port` token on a proxy mode line.
fn parse_proxy_port(value: &str) -> Option<u16> {
    let (_, after) = value.split_once(PORT_TOKEN)?;
    let digits: String = after
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse::<u16>().ok().filter(|port| *port != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_connected() {
        let snap = parse_status("Status update: Connected\n");
        assert_eq!(snap.state, ConnectionState::Connected);
        assert_eq!(snap.reason, None);
    }

    #[test]
    fn test_status_value_is_trimmed() {
        let snap = parse_status("   Status update:    Disconnected   \r\n");
        assert_eq!(snap.state, ConnectionState::Disconnected);
    }

    #[test]
    fn test_status_missing_is_unknown() {
        let snap = parse_status("Success\nSome other line\n");
        assert_eq!(snap, StatusSnapshot::default());
        assert_eq!(snap.state, ConnectionState::Unknown);
        assert_eq!(snap.reason, None);

        assert_eq!(parse_status(""), StatusSnapshot::default());
    }

    #[test]
    fn test_reason_without_status_is_dropped() {
        let snap = parse_status("Reason: Manual Disconnection\n");
        assert_eq!(snap.state, ConnectionState::Unknown);
        assert_eq!(snap.reason, None);
    }

    #[test]
    fn test_status_and_reason_any_order() {
        let forward = parse_status("Status update: Disconnected\nReason: Manual Disconnection\n");
        let reverse = parse_status("Reason: Manual Disconnection\nStatus update: Disconnected\n");

        for snap in [forward, reverse] {
            assert_eq!(snap.state, ConnectionState::Disconnected);
            assert_eq!(snap.reason.as_deref(), Some("Manual Disconnection"));
        }
    }

    #[test]
    fn test_status_keeps_unrecognised_text() {
        let snap = parse_status("Status update: Unable\nReason: No Network\n");
        assert_eq!(snap.state, ConnectionState::Other("Unable".into()));
        assert_eq!(snap.reason.as_deref(), Some("No Network"));
    }

    #[test]
    fn test_settings_simple_modes() {
        let cases = [
            ("Warp", Mode::Warp),
            ("DnsOverHttps", Mode::Doh),
            ("WarpWithDnsOverHttps", Mode::WarpDoh),
            ("DnsOverTls", Mode::Dot),
            ("WarpWithDnsOverTls", Mode::WarpDot),
            ("TunnelOnly", Mode::TunnelOnly),
        ];
        for (label, expected) in cases {
            let output = format!("Always On: true\n(user set)\tMode: {label}\nDisabled for Wifi: false\n");
            let snap = parse_settings(&output);
            assert_eq!(snap.mode, Some(expected), "label {label}");
            assert_eq!(snap.port, None);
            assert_eq!(snap.raw_mode.as_deref(), Some(label));
        }
    }

    #[test]
    fn test_settings_proxy_with_port() {
        let snap = parse_settings("(user set)\tMode: WarpProxy on port 40000\n");
        assert_eq!(snap.mode, Some(Mode::Proxy));
        assert_eq!(snap.port, Some(40000));
    }

    #[test]
    fn test_settings_proxy_without_port() {
        let snap = parse_settings("Mode: WarpProxy\n");
        assert_eq!(snap.mode, Some(Mode::Proxy));
        assert_eq!(snap.port, None);

        let snap = parse_settings("Mode: WarpProxy on port abc\n");
        assert_eq!(snap.port, None);
    }

    #[test]
    fn test_settings_port_ignored_outside_proxy_mode() {
        let snap = parse_settings("Mode: Warp port 40000\n");
        assert_eq!(snap.mode, None);
        assert_eq!(snap.port, None);
    }

    #[test]
    fn test_settings_unknown_mode_keeps_raw() {
        let snap = parse_settings("Mode: SomethingNew\n");
        assert_eq!(snap.mode, None);
        assert_eq!(snap.raw_mode.as_deref(), Some("SomethingNew"));
    }

    #[test]
    fn test_settings_missing_mode_line() {
        assert_eq!(parse_settings("Always On: true\n"), SettingsSnapshot::default());
    }

    #[test]
    fn test_same_output_parses_the_same() {
        let output = "Mode: WarpWithDnsOverTls\n";
        assert_eq!(parse_settings(output), parse_settings(output));
    }
}
