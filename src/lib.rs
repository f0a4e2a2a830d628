//! # opgen
//!
//! Password generator with an optional "save to 1Password" action.
//!
//! ## Features
//!
//! - Passwords from uppercase, lowercase, digit and symbol classes, with one
//!   character of every enabled class guaranteed and a uniform shuffle
//! - Login item creation through the `op` command-line tool, invoked with
//!   an argument vector (no shell)
//! - Form handlers for generate / copy / save
//! - TOML configuration
//!
//! ## Example
//!
//! ```no_run
//! use opgen::{generate_password, CredentialRecord, Exporter, ExporterConfig, GenerationConfig};
//!
//! # async fn run() -> opgen::Result<()> {
//! let password = generate_password(&GenerationConfig::default())?;
//!
//! let exporter = Exporter::new(ExporterConfig::default());
//! let record = CredentialRecord::new("Gmail", password).with_username("me@example.com");
//! let result = exporter.export(&record).await;
//! println!("{:?}", result);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod exporter;
pub mod generator;

// Re-export main types
pub use app::{AppLifecycle, PasswordForm};
pub use clipboard::{ClipboardSink, SystemClipboard};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use exporter::{CredentialRecord, ExportResult, Exporter, ExporterConfig, ItemSummary};
pub use generator::{generate_password, CharacterClass, GenerationConfig};

/// Default password length
pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

/// Minimum password length
pub const PASSWORD_MIN_LENGTH: usize = 1;

/// Maximum password length accepted by the generator
pub const PASSWORD_MAX_LENGTH: usize = 256;

/// Upper bound of the length slider in graphical front ends
pub const UI_MAX_LENGTH: usize = 25;
