//! Application layer
//!
//! Event handlers for the password form and the window lifecycle a
//! desktop host drives.

pub mod form;
pub mod lifecycle;

pub use form::PasswordForm;
pub use lifecycle::{AppLifecycle, LifecycleAction, LifecycleEvent, WindowState};
