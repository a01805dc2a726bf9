//! In-memory archive implementation
//!
//! Serves canned results and records every call, for tests and for running
//! the client without a server.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use super::{ApiError, ArchiveApi};
use crate::models::{AttachmentDescriptor, EmailPath, Query, SearchResultItem};

/// The archive endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Search,
    View,
    Attachments,
    Recent,
    CheckEmails,
}

/// One recorded request against an [`InMemoryArchive`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Search(String),
    View(EmailPath),
    Attachments(EmailPath),
    Recent(usize),
    CheckEmails,
}

impl ApiCall {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Search(_) => Endpoint::Search,
            Self::View(_) => Endpoint::View,
            Self::Attachments(_) => Endpoint::Attachments,
            Self::Recent(_) => Endpoint::Recent,
            Self::CheckEmails => Endpoint::CheckEmails,
        }
    }
}

/// Message returned by a successful mail check
pub const CHECK_OK: &str = "Emails checked successfully";

type Incoming = (SearchResultItem, String, Vec<AttachmentDescriptor>);

/// Archive backed by hash maps
///
/// Searches match case-insensitively against subject, sender and snippet,
/// unless a fixed result list was registered for the exact query. Emails
/// queued with [`queue_incoming`](Self::queue_incoming) join the archive on
/// the next mail check.
#[derive(Default)]
pub struct InMemoryArchive {
    emails: RwLock<Vec<SearchResultItem>>,
    bodies: RwLock<HashMap<EmailPath, String>>,
    attachments: RwLock<HashMap<EmailPath, Vec<AttachmentDescriptor>>>,
    fixed_results: RwLock<HashMap<String, Vec<SearchResultItem>>>,
    server_errors: RwLock<HashMap<String, String>>,
    incoming: RwLock<Vec<Incoming>>,
    failing: RwLock<HashSet<Endpoint>>,
    calls: RwLock<Vec<ApiCall>>,
}

impl InMemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an email with its rendered body and attachments
    pub fn insert_email(
        &self,
        item: SearchResultItem,
        html: impl Into<String>,
        attachments: Vec<AttachmentDescriptor>,
    ) {
        let path = item.path.clone();
        self.bodies.write().unwrap().insert(path.clone(), html.into());
        self.attachments.write().unwrap().insert(path, attachments);
        self.emails.write().unwrap().push(item);
    }

    /// Hold an email back until the next [`check_emails`](ArchiveApi::check_emails)
    pub fn queue_incoming(
        &self,
        item: SearchResultItem,
        html: impl Into<String>,
        attachments: Vec<AttachmentDescriptor>,
    ) {
        self.incoming
            .write()
            .unwrap()
            .push((item, html.into(), attachments));
    }

    /// Return exactly `results` for `query`, bypassing matching
    pub fn set_results(&self, query: &str, results: Vec<SearchResultItem>) {
        self.fixed_results
            .write()
            .unwrap()
            .insert(query.to_string(), results);
    }

    /// Answer `query` with an `{error}` payload
    pub fn set_server_error(&self, query: &str, message: impl Into<String>) {
        self.server_errors
            .write()
            .unwrap()
            .insert(query.to_string(), message.into());
    }

    /// Make every call to `endpoint` fail with a 500
    pub fn fail(&self, endpoint: Endpoint) {
        self.failing.write().unwrap().insert(endpoint);
    }

    /// Undo [`fail`](Self::fail)
    pub fn recover(&self, endpoint: Endpoint) {
        self.failing.write().unwrap().remove(&endpoint);
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of calls made to `endpoint`
    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.endpoint() == endpoint)
            .count()
    }

    fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        let endpoint = call.endpoint();
        self.calls.write().unwrap().push(call);

        if self.failing.read().unwrap().contains(&endpoint) {
            return Err(ApiError::from_status(500, "Internal Server Error", None));
        }
        Ok(())
    }

    fn not_found(path: &EmailPath) -> ApiError {
        ApiError::from_status(404, "Not Found", Some(format!("Email not found: {}", path)))
    }
}

impl ArchiveApi for InMemoryArchive {
    fn search(&self, query: &Query) -> Result<Vec<SearchResultItem>, ApiError> {
        self.record(ApiCall::Search(query.as_str().to_string()))?;

        if let Some(message) = self.server_errors.read().unwrap().get(query.as_str()) {
            return Err(ApiError::ServerReported(message.clone()));
        }

        if let Some(results) = self.fixed_results.read().unwrap().get(query.as_str()) {
            return Ok(results.clone());
        }

        let needle = query.as_str().to_lowercase();
        let results = self
            .emails
            .read()
            .unwrap()
            .iter()
            .filter(|item| {
                item.subject.to_lowercase().contains(&needle)
                    || item.sender.to_lowercase().contains(&needle)
                    || item.snippet.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        Ok(results)
    }

    fn view(&self, path: &EmailPath) -> Result<String, ApiError> {
        self.record(ApiCall::View(path.clone()))?;

        self.bodies
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found(path))
    }

    fn list_attachments(&self, path: &EmailPath) -> Result<Vec<AttachmentDescriptor>, ApiError> {
        self.record(ApiCall::Attachments(path.clone()))?;

        self.attachments
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found(path))
    }

    fn recent(&self, limit: usize) -> Result<Vec<SearchResultItem>, ApiError> {
        self.record(ApiCall::Recent(limit))?;

        let mut emails = self.emails.read().unwrap().clone();
        // Newest first; undated emails sink to the bottom
        emails.sort_by_key(|item| std::cmp::Reverse(item.received_at()));
        emails.truncate(limit);
        Ok(emails)
    }

    fn check_emails(&self) -> Result<String, ApiError> {
        self.record(ApiCall::CheckEmails)?;

        let incoming = std::mem::take(&mut *self.incoming.write().unwrap());
        for (item, html, attachments) in incoming {
            self.insert_email(item, html, attachments);
        }
        Ok(CHECK_OK.to_string())
    }
}
