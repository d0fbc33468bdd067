//! Popups drawn over the dashboard.

pub mod port_input;
pub mod toast;
