//! Attachment descriptors returned by the attachment-list endpoint

use serde::{Deserialize, Serialize};

/// A downloadable attachment belonging to an email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    /// Original filename, used as the link label
    pub filename: String,
    /// Server path (or absolute URL) the attachment downloads from
    pub path: String,
    /// Size in bytes, when the server reports it
    #[serde(default)]
    pub size: Option<u64>,
}

impl AttachmentDescriptor {
    pub fn new(filename: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
            size: None,
        }
    }

    /// Filename safe to create on the local filesystem
    pub fn file_name(&self) -> String {
        let cleaned: String = self
            .filename
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ' ') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let cleaned = cleaned.trim().trim_start_matches('.');
        if cleaned.is_empty() {
            "attachment".to_string()
        } else {
            cleaned.to_string()
        }
    }
}
