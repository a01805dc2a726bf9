//! Validated search query

use serde::{Deserialize, Serialize};

/// Rejection of user input before any request is issued
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a search query.")]
    EmptyQuery,
}

/// Trimmed, non-empty search text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query(String);

impl Query {
    /// Trim `raw` and reject it if nothing is left
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let query = Query::parse("  invoice  ").unwrap();
        assert_eq!(query.as_str(), "invoice");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(Query::parse(""), Err(ValidationError::EmptyQuery));
        assert_eq!(Query::parse(" \t\n "), Err(ValidationError::EmptyQuery));
    }

    #[test]
    fn test_inner_whitespace_preserved() {
        let query = Query::parse(" quarterly  report ").unwrap();
        assert_eq!(query.as_str(), "quarterly  report");
    }

    #[test]
    fn test_validation_message() {
        assert_eq!(
            ValidationError::EmptyQuery.to_string(),
            "Please enter a search query."
        );
    }
}
