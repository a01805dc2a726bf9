//! Search result model representing one archived email

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Display format the archive server uses for `datetime_received`
const RECEIVED_FORMAT: &str = "%m/%d/%Y %I:%M %p";

/// Opaque identifier used to fetch an email's content and attachments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailPath(pub String);

impl EmailPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EmailPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EmailPath {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for EmailPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single entry returned by the search or recent-emails endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Identifier for `/view/` and `/list-attachments/`
    pub path: EmailPath,
    /// Subject line; search hits only carry the file name
    #[serde(default = "default_subject", alias = "name")]
    pub subject: String,
    /// Sender as rendered by the server
    #[serde(default = "default_sender")]
    pub sender: String,
    /// Received timestamp in the server's display format
    #[serde(default)]
    pub datetime_received: Option<String>,
    /// Body excerpt around the first match
    #[serde(default)]
    pub snippet: String,
}

fn default_subject() -> String {
    "No Subject".to_string()
}

fn default_sender() -> String {
    "Unknown Sender".to_string()
}

impl SearchResultItem {
    /// Create a result with only a path and subject
    pub fn new(path: impl Into<EmailPath>, subject: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            subject: subject.into(),
            sender: default_sender(),
            datetime_received: None,
            snippet: String::new(),
        }
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    pub fn with_received(mut self, received: impl Into<String>) -> Self {
        self.datetime_received = Some(received.into());
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Parse `datetime_received` into a timestamp.
    ///
    /// Returns `None` when the field is absent or the server sent "Unknown".
    pub fn received_at(&self) -> Option<NaiveDateTime> {
        let raw = self.datetime_received.as_deref()?;
        NaiveDateTime::parse_from_str(raw.trim(), RECEIVED_FORMAT).ok()
    }
}
