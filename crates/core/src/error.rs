//! Error types for the SWMTrack domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. Divide-by-zero inside
//! metrics computation is a defined policy (the ratio is 0), never an
//! error, so no variant exists for it.

use thiserror::Error;

/// The top-level error type for all SWMTrack operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Input validation ---
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // --- Entry storage ---
    #[error("Entry not found: {entry_id}")]
    EntryNotFound { entry_id: String },

    #[error("Entry storage error: {0}")]
    Store(#[from] StoreError),

    // --- Narrator service ---
    #[error("Narrator error: {0}")]
    Narrator(#[from] NarratorError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// A single field-level violation found during input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path to the offending field (e.g. `day.wetWasteCollected`).
    pub field: String,
    /// What was wrong with it.
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Malformed or out-of-range input. Recoverable by the caller correcting
/// input; never retried automatically.
#[derive(Debug, Clone, Error)]
#[error("{}", .violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; "))]
pub struct ValidationError {
    /// Every field-level problem found, not just the first.
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Convenience for a single-field failure.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::new(field, message)],
        }
    }
}

/// Errors from the narrator collaborator.
///
/// `NotConfigured` is surfaced distinctly from transport failures so
/// operators can tell misconfiguration from a transient outage.
#[derive(Debug, Clone, Error)]
pub enum NarratorError {
    #[error("Narrator service not configured: {0}")]
    NotConfigured(String),

    #[error("Narrator API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Network error reaching narrator: {0}")]
    Network(String),

    #[error("Narrator request timed out: {0}")]
    Timeout(String),

    /// The narrator replied, but with something we cannot use. The raw
    /// text is preserved verbatim for diagnosis.
    #[error("Invalid narrator response: {reason}")]
    InvalidResponse { reason: String, raw: String },
}

/// Errors from the entry-storage collaborator.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_all_violations() {
        let err = ValidationError::new(vec![
            Violation::new("date", "must match YYYY-MM-DD"),
            Violation::new("day.households", "must be a nonnegative integer"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("date"));
        assert!(msg.contains("day.households"));
        assert!(msg.contains("; "));
    }

    #[test]
    fn entry_not_found_displays_id() {
        let err = Error::EntryNotFound {
            entry_id: "entry_42".into(),
        };
        assert!(err.to_string().contains("entry_42"));
    }

    #[test]
    fn narrator_error_displays_correctly() {
        let err = Error::Narrator(NarratorError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn invalid_response_keeps_raw_text() {
        let err = NarratorError::InvalidResponse {
            reason: "not valid JSON".into(),
            raw: "```oops```".into(),
        };
        match &err {
            NarratorError::InvalidResponse { raw, .. } => assert_eq!(raw, "```oops```"),
            _ => unreachable!(),
        }
        assert!(err.to_string().contains("not valid JSON"));
    }
}
