//! Archive server HTTP integration
//!
//! This module provides:
//! - The `ArchiveApi` seam the controllers' requests execute against
//! - An HTTP client for the search, view, attachment-list, recent-emails and
//!   mail-check endpoints
//! - An in-memory archive for tests and offline use

mod client;
mod error;
mod memory;

pub use client::ArchiveClient;
pub use error::ApiError;
pub use memory::{ApiCall, Endpoint, InMemoryArchive};

use crate::models::{AttachmentDescriptor, EmailPath, Query, SearchResultItem};

/// Operations the client needs from the archive server
///
/// Implementations block until the response is complete; hosts that need
/// to stay responsive run them off the UI thread.
pub trait ArchiveApi: Send + Sync {
    /// Run a search, preserving server order
    fn search(&self, query: &Query) -> Result<Vec<SearchResultItem>, ApiError>;

    /// Fetch the rendered HTML fragment for an email
    fn view(&self, path: &EmailPath) -> Result<String, ApiError>;

    /// List the attachments of an email
    fn list_attachments(&self, path: &EmailPath) -> Result<Vec<AttachmentDescriptor>, ApiError>;

    /// Up to `limit` of the most recently received emails
    fn recent(&self, limit: usize) -> Result<Vec<SearchResultItem>, ApiError>;

    /// Ask the server to pull new mail into the archive
    ///
    /// Returns the server's status message.
    fn check_emails(&self) -> Result<String, ApiError>;
}

/// Archive server response types
pub mod wire {
    use serde::{Deserialize, Serialize};

    use crate::models::{AttachmentDescriptor, SearchResultItem};

    /// Response from `/search`
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SearchResponse {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub results: Option<Vec<SearchResultItem>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub error: Option<String>,
    }

    /// Response from `/list-attachments/{path}`
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AttachmentListResponse {
        #[serde(default)]
        pub attachments: Vec<AttachmentDescriptor>,
    }

    /// Response from `/recent`
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct RecentResponse {
        #[serde(default)]
        pub emails: Vec<SearchResultItem>,
    }

    /// Response from `POST /check-emails`
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CheckEmailsResponse {
        pub success: bool,
        #[serde(default)]
        pub message: String,
    }

    /// Body the server sends alongside a non-2xx status
    #[derive(Debug, Default, Deserialize)]
    pub struct ErrorBody {
        pub error: Option<String>,
        pub message: Option<String>,
    }

    impl ErrorBody {
        /// The most specific non-empty message in the body
        pub fn into_message(self) -> Option<String> {
            self.error
                .into_iter()
                .chain(self.message)
                .map(|m| m.trim().to_string())
                .find(|m| !m.is_empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::wire::*;

    #[test]
    fn test_search_response_results() {
        let json = r#"{"results": [{"path": "e1.html", "subject": "Invoice #9"}]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let results = response.results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].subject, "Invoice #9");
        assert!(response.error.is_none());
    }

    #[test]
    fn test_search_response_error() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"error": "index offline"}"#).unwrap();
        assert!(response.results.is_none());
        assert_eq!(response.error.as_deref(), Some("index offline"));
    }

    #[test]
    fn test_attachment_list_missing_field_is_empty() {
        let response: AttachmentListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.attachments.is_empty());
    }

    #[test]
    fn test_recent_response() {
        let json = r#"{"emails": [{"path": "2024/e2.html", "subject": "Lunch",
            "sender": "ops@example.com", "datetime_received": "03/14/2024 12:01 PM"}]}"#;
        let response: RecentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.emails.len(), 1);
        assert_eq!(response.emails[0].sender, "ops@example.com");
    }

    #[test]
    fn test_check_emails_response() {
        let response: CheckEmailsResponse =
            serde_json::from_str(r#"{"success": true, "message": "Emails checked successfully"}"#)
                .unwrap();
        assert!(response.success);
        assert_eq!(response.message, "Emails checked successfully");
    }

    #[test]
    fn test_error_body_prefers_error_over_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "bad query", "message": "ignored"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("bad query"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"success": false, "message": "Email not found"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Email not found"));

        let body: ErrorBody = serde_json::from_str(r#"{"error": "  "}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
