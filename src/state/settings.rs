//! WARP operating modes and the settings snapshot.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One of the seven operating modes `warp-cli` knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Warp,
    Doh,
    #[serde(rename = "warp+doh")]
    WarpDoh,
    Dot,
    #[serde(rename = "warp+dot")]
    WarpDot,
    Proxy,
    TunnelOnly,
}

impl Mode {
    /// All modes, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Warp,
        Self::Doh,
        Self::WarpDoh,
        Self::Dot,
        Self::WarpDot,
        Self::Proxy,
        Self::TunnelOnly,
    ];

    /// Name accepted by `warp-cli mode <name>`.
    #[must_use]
    pub const fn cli_name(self) -> &'static str {
        match self {
            Self::Warp => "warp",
            Self::Doh => "doh",
            Self::WarpDoh => "warp+doh",
            Self::Dot => "dot",
            Self::WarpDot => "warp+dot",
            Self::Proxy => "proxy",
            Self::TunnelOnly => "tunnel_only",
        }
    }

    /// Label printed by `warp-cli settings list` after `Mode:`.
    #[must_use]
    pub const fn settings_label(self) -> &'static str {
        match self {
            Self::Warp => "Warp",
            Self::Doh => "DnsOverHttps",
            Self::WarpDoh => "WarpWithDnsOverHttps",
            Self::Dot => "DnsOverTls",
            Self::WarpDot => "WarpWithDnsOverTls",
            Self::Proxy => "WarpProxy",
            Self::TunnelOnly => "TunnelOnly",
        }
    }

    /// Human-readable name for menus.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Warp => "WARP",
            Self::Doh => "DNS over HTTPS",
            Self::WarpDoh => "WARP + DNS over HTTPS",
            Self::Dot => "DNS over TLS",
            Self::WarpDot => "WARP + DNS over TLS",
            Self::Proxy => "Local proxy",
            Self::TunnelOnly => "Tunnel only",
        }
    }

    /// Map a `Mode:` value to a mode.
    ///
    /// The proxy line carries trailing detail (`WarpProxy on port 40000`),
    /// so it is matched by prefix; every other label must match exactly.
    #[must_use]
    pub fn from_settings_label(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with(Self::Proxy.settings_label()) {
            return Some(Self::Proxy);
        }
        Self::ALL
            .into_iter()
            .find(|mode| *mode != Self::Proxy && mode.settings_label() == value)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.cli_name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|m| m.cli_name()).collect();
                format!("unknown mode '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// One parsed `warp-cli settings list` result.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct SettingsSnapshot {
    /// Recognised mode, if the `Mode:` value matched one.
    pub mode: Option<Mode>,
    /// Raw `Mode:` value as printed by the tool.
    pub raw_mode: Option<String>,
    /// Local proxy port, only reported in proxy mode.
    pub port: Option<u16>,
}
