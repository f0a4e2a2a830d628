//! Generate / copy / save handlers behind the password form

use tracing::debug;

use crate::clipboard::{copy_text, ClipboardSink};
use crate::error::{Error, Result};
use crate::exporter::{CredentialRecord, ExportResult, Exporter, ProcessRunner};
use crate::generator::{generate_password, GenerationConfig};
use crate::{PASSWORD_MIN_LENGTH, UI_MAX_LENGTH};

/// State of the password form
#[derive(Debug, Clone, Default)]
pub struct PasswordForm {
    /// Generation options bound to the length slider and class checkboxes
    pub options: GenerationConfig,
    pub title: String,
    pub username: String,
    pub website: String,
    password: String,
    save_error: Option<String>,
}

impl PasswordForm {
    /// Empty form using `options` for generation
    pub fn new(options: GenerationConfig) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Form with a freshly generated password
    pub fn with_password(options: GenerationConfig) -> Result<Self> {
        let mut form = Self::new(options);
        form.generate()?;
        Ok(form)
    }

    /// Currently displayed password
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Message from the last failed save
    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    /// Replace the password with a new one. On error the old password stays.
    pub fn generate(&mut self) -> Result<&str> {
        self.password = generate_password(&self.options)?;
        Ok(self.password.as_str())
    }

    /// Set the length as the slider would, within `1..=UI_MAX_LENGTH`
    pub fn set_length(&mut self, length: usize) {
        self.options.length = length.clamp(PASSWORD_MIN_LENGTH, UI_MAX_LENGTH);
    }

    /// Copy the displayed password
    pub fn copy<S: ClipboardSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        copy_text(sink, &self.password)
    }

    /// Whether the title and password are filled in
    pub fn has_required_fields(&self) -> bool {
        !self.title.trim().is_empty() && !self.password.is_empty()
    }

    /// Whether the save trigger should be enabled: required fields are
    /// present and `exporter` has no export running.
    pub fn can_save<R: ProcessRunner>(&self, exporter: &Exporter<R>) -> bool {
        self.has_required_fields() && !exporter.is_busy()
    }

    /// Record built from the current field values
    pub fn record(&self) -> CredentialRecord {
        CredentialRecord {
            title: self.title.clone(),
            username: Some(self.username.clone()),
            password: self.password.clone(),
            website: Some(self.website.clone()),
        }
    }

    /// Save the current password.
    ///
    /// On success the title, username and website are cleared and a new
    /// password is generated; on failure the message is kept in
    /// [`save_error`](Self::save_error).
    pub async fn save<R: ProcessRunner>(&mut self, exporter: &Exporter<R>) -> ExportResult {
        self.save_error = None;

        let result = if self.has_required_fields() {
            exporter.export(&self.record()).await
        } else {
            Err::<String, _>(Error::InvalidRecord(
                "a title and a password are required".to_string(),
            ))
            .into()
        };

        match &result {
            ExportResult::Success { .. } => {
                self.title.clear();
                self.username.clear();
                self.website.clear();
                if let Err(e) = self.generate() {
                    debug!(error = %e, "could not regenerate after save");
                    self.save_error = Some(e.to_string());
                }
            }
            ExportResult::Failure { message } => {
                self.save_error = Some(message.clone());
            }
        }

        result
    }
}
