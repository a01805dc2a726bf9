//! Errors surfaced by archive requests

/// Failure of a single archive request
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered 2xx but reported an error in the payload
    #[error("{0}")]
    ServerReported(String),

    /// Non-2xx status with a message in the body
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Non-2xx status with nothing useful in the body
    #[error("{status} {reason}")]
    Status { status: u16, reason: String },

    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(#[from] ureq::Error),

    /// A success response whose body could not be parsed
    #[error("invalid response: {0}")]
    Decode(String),

    /// Writing a downloaded attachment failed
    #[error("could not save attachment: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Build the error for a non-2xx response
    pub fn from_status(status: u16, reason: &str, message: Option<String>) -> Self {
        match message {
            Some(message) => Self::Rejected { status, message },
            None => Self::Status {
                status,
                reason: reason.to_string(),
            },
        }
    }

    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_reported_is_verbatim() {
        let err = ApiError::ServerReported("No search query provided.".to_string());
        assert_eq!(err.to_string(), "No search query provided.");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_from_status_with_message() {
        let err = ApiError::from_status(404, "Not Found", Some("Email not found".to_string()));
        assert_eq!(err.to_string(), "Email not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_from_status_without_message() {
        let err = ApiError::from_status(502, "Bad Gateway", None);
        assert_eq!(err.to_string(), "502 Bad Gateway");
        assert_eq!(err.status(), Some(502));
    }
}
