//! TUI module for the factory dashboard.
//!
//! Provides a terminal user interface built on ratatui and crossterm with
//! two screens: the dashboard grid and the widget settings editor.

pub mod app;
pub mod event;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
