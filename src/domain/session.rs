use chrono::{DateTime, Utc};

use crate::domain::{ArticleRecord, TranslatedTitle};

/// Terminal status of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Passed,
    Failed,
}

impl SessionStatus {
    pub fn is_passed(&self) -> bool {
        matches!(self, SessionStatus::Passed)
    }

    /// Status tag reported to the remote execution endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Passed => "passed",
            SessionStatus::Failed => "failed",
        }
    }
}

/// Everything one session produced. Created at session start, finalized at
/// session end, reported and discarded.
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub label: String,
    pub records: Vec<ArticleRecord>,
    pub titles: Vec<TranslatedTitle>,
    /// Tokens repeated strictly more than the configured threshold, in
    /// first-occurrence order.
    pub repeated_words: Vec<(String, usize)>,
    pub status: SessionStatus,
    pub reason: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl SessionResult {
    pub fn started(label: &str) -> Self {
        Self {
            label: label.to_string(),
            records: Vec::new(),
            titles: Vec::new(),
            repeated_words: Vec::new(),
            status: SessionStatus::Failed,
            reason: None,
            started_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tags() {
        assert_eq!(SessionStatus::Passed.as_str(), "passed");
        assert_eq!(SessionStatus::Failed.as_str(), "failed");
        assert!(SessionStatus::Passed.is_passed());
        assert!(!SessionStatus::Failed.is_passed());
    }

    #[test]
    fn test_started_defaults_to_failed_until_finalized() {
        let result = SessionResult::started("Local");
        assert_eq!(result.status, SessionStatus::Failed);
        assert!(result.records.is_empty());
        assert!(result.reason.is_none());
    }
}
