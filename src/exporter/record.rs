//! Export request and result models

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A login record to create in the external credential store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Item title, must not be blank
    pub title: String,
    pub username: Option<String>,
    pub password: String,
    /// Website URL, omitted from the item when blank
    pub website: Option<String>,
}

impl CredentialRecord {
    /// Create a record with only a title and password
    pub fn new(title: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            username: None,
            password: password.into(),
            website: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// Username to store, if one was given
    pub fn username_value(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// Trimmed website, if non-empty
    pub fn website_url(&self) -> Option<&str> {
        self.website.as_deref().map(str::trim).filter(|w| !w.is_empty())
    }

    /// Reject records the tool cannot store
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidRecord("title must not be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(Error::InvalidRecord("password must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Outcome of a single export call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExportResult {
    /// The tool created the item; `raw_output` is its stdout
    Success { raw_output: String },
    /// Export failed; `message` is meant for the user
    Failure { message: String },
}

impl ExportResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExportResult::Success { .. })
    }

    /// Tool output on success
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            ExportResult::Success { raw_output } => Some(raw_output.as_str()),
            ExportResult::Failure { .. } => None,
        }
    }

    /// Failure message
    pub fn message(&self) -> Option<&str> {
        match self {
            ExportResult::Success { .. } => None,
            ExportResult::Failure { message } => Some(message.as_str()),
        }
    }
}

impl From<Result<String>> for ExportResult {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(raw_output) => ExportResult::Success { raw_output },
            Err(e) => ExportResult::Failure { message: e.to_string() },
        }
    }
}

/// Vault reference inside the tool's JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Identity of a created item, parsed from JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub vault: Option<VaultRef>,
}

impl ItemSummary {
    /// Parse `item create --format=json` output; `None` for human-readable output
    pub fn parse(raw_output: &str) -> Option<Self> {
        serde_json::from_str(raw_output.trim()).ok()
    }
}
