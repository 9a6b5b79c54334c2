//! UI layer for the login window: app shell, view model, and theme.

pub mod app;
pub mod theme;
pub mod view;

pub use app::LoginFormApp;
