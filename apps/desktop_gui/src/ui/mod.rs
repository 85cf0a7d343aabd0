//! UI layer for the desktop window: app shell, per-state views, and theme.

pub mod app;
pub mod theme;
pub mod widgets;

pub use app::OracleApp;
