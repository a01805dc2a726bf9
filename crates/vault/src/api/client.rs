//! Archive server HTTP client
//!
//! Provides methods for the search, view, attachment, recent-emails and
//! mail-check endpoints.
//! Uses synchronous HTTP (ureq) to be executor-agnostic.

use log::debug;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use ureq::http::Response;
use ureq::{Agent, Body};
use url::Url;

use super::wire::{
    AttachmentListResponse, CheckEmailsResponse, ErrorBody, RecentResponse, SearchResponse,
};
use super::{ApiError, ArchiveApi};
use crate::models::{AttachmentDescriptor, EmailPath, Query, SearchResultItem};
use crate::settings::ClientSettings;

/// Give up finding a free download name after this many numbered variants
const MAX_NAME_ATTEMPTS: usize = 1000;

/// HTTP client for an archive server
pub struct ArchiveClient {
    agent: Agent,
    base_url: Url,
}

impl ArchiveClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();

        Self {
            agent: Agent::new_with_config(config),
            base_url,
        }
    }

    /// Create a client from loaded settings
    pub fn from_settings(settings: &ClientSettings) -> anyhow::Result<Self> {
        Ok(Self::new(settings.base_url()?, settings.timeout()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for an endpoint path such as `/search`
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// URL for an endpoint taking the email path as one encoded segment
    fn email_endpoint(&self, prefix: &str, path: &EmailPath) -> String {
        self.endpoint(&format!("{}/{}", prefix, urlencoding::encode(path.as_str())))
    }

    /// URL an attachment downloads from
    ///
    /// Absolute URLs are used as-is, anything else is relative to the server.
    fn attachment_url(&self, attachment: &AttachmentDescriptor) -> String {
        if let Ok(url) = Url::parse(&attachment.path)
            && matches!(url.scheme(), "http" | "https")
        {
            return url.into();
        }

        if attachment.path.starts_with('/') {
            self.endpoint(&attachment.path)
        } else {
            self.endpoint(&format!("/{}", attachment.path))
        }
    }

    /// Issue a GET and turn non-2xx statuses into errors
    fn get(&self, url: &str, query: Option<(&str, &str)>) -> Result<Response<Body>, ApiError> {
        debug!("GET {}", url);

        let mut request = self.agent.get(url);
        if let Some((key, value)) = query {
            request = request.query(key, value);
        }

        let response = request.call()?;
        check_status(response)
    }

    /// Issue a body-less POST and turn non-2xx statuses into errors
    fn post(&self, url: &str) -> Result<Response<Body>, ApiError> {
        debug!("POST {}", url);

        let response = self.agent.post(url).send_empty()?;
        check_status(response)
    }

    /// Download an attachment into `dir`, returning the written file
    ///
    /// The body is streamed into a temporary file that only takes its final
    /// name once complete. An existing file is never replaced; the name gets
    /// a ` (n)` suffix instead.
    pub fn download(
        &self,
        attachment: &AttachmentDescriptor,
        dir: &Path,
    ) -> Result<PathBuf, ApiError> {
        let url = self.attachment_url(attachment);
        let mut response = self.get(&url, None)?;

        std::fs::create_dir_all(dir)?;
        let mut partial = tempfile::Builder::new()
            .prefix(".vault-")
            .suffix(".part")
            .tempfile_in(dir)?;
        io::copy(&mut response.body_mut().as_reader(), partial.as_file_mut())?;

        let name = attachment.file_name();
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let target = dir.join(numbered_name(&name, attempt));
            match partial.persist_noclobber(&target) {
                Ok(_) => {
                    debug!("Saved {} to {}", attachment.filename, target.display());
                    return Ok(target);
                }
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => partial = e.file,
                Err(e) => return Err(e.error.into()),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free file name for {} in {}", name, dir.display()),
        )
        .into())
    }
}

/// `report.csv` for attempt 0, then `report (1).csv`, `report (2).csv`...
fn numbered_name(name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return name.to_string();
    }

    let path = Path::new(name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    match path.extension() {
        Some(ext) => format!("{} ({}).{}", stem, attempt, ext.to_string_lossy()),
        None => format!("{} ({})", stem, attempt),
    }
}

impl ArchiveApi for ArchiveClient {
    fn search(&self, query: &Query) -> Result<Vec<SearchResultItem>, ApiError> {
        let url = self.endpoint("/search");
        let mut response = self.get(&url, Some(("query", query.as_str())))?;

        let body: SearchResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(ApiError::ServerReported(error));
        }

        Ok(body.results.unwrap_or_default())
    }

    fn view(&self, path: &EmailPath) -> Result<String, ApiError> {
        let url = self.email_endpoint("/view", path);
        let mut response = self.get(&url, None)?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn list_attachments(&self, path: &EmailPath) -> Result<Vec<AttachmentDescriptor>, ApiError> {
        let url = self.email_endpoint("/list-attachments", path);
        let mut response = self.get(&url, None)?;

        let body: AttachmentListResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(body.attachments)
    }

    fn recent(&self, limit: usize) -> Result<Vec<SearchResultItem>, ApiError> {
        let url = self.endpoint("/recent");
        let limit = limit.to_string();
        let mut response = self.get(&url, Some(("limit", limit.as_str())))?;

        let body: RecentResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(body.emails)
    }

    fn check_emails(&self) -> Result<String, ApiError> {
        let url = self.endpoint("/check-emails");
        let mut response = self.post(&url)?;

        let body: CheckEmailsResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if !body.success {
            return Err(ApiError::ServerReported(body.message));
        }
        Ok(body.message)
    }
}

/// Pass 2xx responses through; read the body of anything else for a message
fn check_status(mut response: Response<Body>) -> Result<Response<Body>, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .body_mut()
        .read_to_string()
        .ok()
        .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
        .and_then(ErrorBody::into_message);

    Err(ApiError::from_status(
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error"),
        message,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ArchiveClient {
        ArchiveClient::new(Url::parse(base).unwrap(), Duration::from_secs(5))
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let c = client("http://localhost:5000");
        assert_eq!(c.endpoint("/search"), "http://localhost:5000/search");

        let c = client("http://archive.example.com/mail/");
        assert_eq!(c.endpoint("/search"), "http://archive.example.com/mail/search");
    }

    #[test]
    fn test_email_path_is_one_encoded_segment() {
        let c = client("http://localhost:5000");
        let url = c.email_endpoint("/view", &EmailPath::new("a/b c.html"));
        assert_eq!(url, "http://localhost:5000/view/a%2Fb%20c.html");

        let url = c.email_endpoint("/list-attachments", &EmailPath::new("e1.html"));
        assert_eq!(url, "http://localhost:5000/list-attachments/e1.html");
    }

    #[test]
    fn test_attachment_url_relative_and_absolute() {
        let c = client("http://localhost:5000");

        let att = AttachmentDescriptor::new("a.pdf", "/attachments/7/download");
        assert_eq!(c.attachment_url(&att), "http://localhost:5000/attachments/7/download");

        let att = AttachmentDescriptor::new("a.pdf", "files/a.pdf");
        assert_eq!(c.attachment_url(&att), "http://localhost:5000/files/a.pdf");

        let att = AttachmentDescriptor::new("a.pdf", "https://cdn.example.com/a.pdf");
        assert_eq!(c.attachment_url(&att), "https://cdn.example.com/a.pdf");
    }

    #[test]
    fn test_numbered_name() {
        assert_eq!(numbered_name("q3_report.csv", 0), "q3_report.csv");
        assert_eq!(numbered_name("q3_report.csv", 2), "q3_report (2).csv");
        assert_eq!(numbered_name("README", 1), "README (1)");
        assert_eq!(numbered_name("archive.tar.gz", 1), "archive.tar (1).gz");
    }
}
