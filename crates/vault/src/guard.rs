//! Duplicate-submission suppression for search queries

use crate::models::Query;

/// Remembers the last accepted query and rejects an immediate repeat.
///
/// Only one value is kept: A, B, A runs all three.
#[derive(Debug, Default)]
pub struct QueryGuard {
    last: String,
}

impl QueryGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and records `query` if it differs from the last one.
    pub fn should_run(&mut self, query: &Query) -> bool {
        if self.last == query.as_str() {
            return false;
        }
        self.last = query.as_str().to_string();
        true
    }

    /// Last accepted query text (empty before the first search)
    pub fn last(&self) -> &str {
        &self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> Query {
        Query::parse(s).unwrap()
    }

    #[test]
    fn test_first_query_runs() {
        let mut guard = QueryGuard::new();
        assert_eq!(guard.last(), "");
        assert!(guard.should_run(&q("invoice")));
        assert_eq!(guard.last(), "invoice");
    }

    #[test]
    fn test_immediate_repeat_suppressed() {
        let mut guard = QueryGuard::new();
        assert!(guard.should_run(&q("invoice")));
        assert!(!guard.should_run(&q("invoice")));
        assert!(!guard.should_run(&q("  invoice ")));
    }

    #[test]
    fn test_non_adjacent_repeat_runs() {
        let mut guard = QueryGuard::new();
        assert!(guard.should_run(&q("a")));
        assert!(guard.should_run(&q("b")));
        assert!(guard.should_run(&q("a")));
        assert_eq!(guard.last(), "a");
    }

    #[test]
    fn test_case_sensitive() {
        let mut guard = QueryGuard::new();
        assert!(guard.should_run(&q("Invoice")));
        assert!(guard.should_run(&q("invoice")));
    }
}
