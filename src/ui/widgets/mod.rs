//! Reusable dashboard pieces.

pub mod footer;
pub mod menu;
