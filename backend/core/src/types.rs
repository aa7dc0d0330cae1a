use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RemoteError;

/// Opaque identifier for a group, as reported by the NapCat listing call.
///
/// Group ids arrive from the service as either JSON numbers or strings; they
/// are normalized to strings here and passed back verbatim to the check-in
/// call. No other meaning is attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub String);

impl GroupId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One group that failed to check in, with the human-readable reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinFailure {
    pub group: GroupId,
    pub reason: String,
}

/// Aggregate result of one batch run.
///
/// Created fresh per cycle, logged, and dropped — nothing persists across
/// runs. Partial failure is a normal completion, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<CheckinFailure>,
}

impl BatchOutcome {
    /// Outcome for a cycle that never got a group list (listing failed or
    /// came back empty). Zero groups processed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, group: GroupId, error: &RemoteError) {
        self.total += 1;
        self.failed += 1;
        self.failures.push(CheckinFailure {
            group,
            reason: error.to_string(),
        });
    }

    /// Failure details joined for a one-line log record.
    pub fn failure_summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("group {}: {}", f.group, f.reason))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_counts_track_records() {
        let mut outcome = BatchOutcome::empty();
        outcome.record_success();
        outcome.record_failure(GroupId::from("42"), &RemoteError::Unreachable);
        outcome.record_success();

        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].group, GroupId::from("42"));
    }

    #[test]
    fn failure_summary_joins_details() {
        let mut outcome = BatchOutcome::empty();
        outcome.record_failure(GroupId::from("1"), &RemoteError::BadStatus(502));
        outcome.record_failure(
            GroupId::from("2"),
            &RemoteError::Rejected("sign disabled".into()),
        );

        let summary = outcome.failure_summary();
        assert!(summary.contains("group 1:"));
        assert!(summary.contains("502"));
        assert!(summary.contains("group 2: NapCat service rejected the request: sign disabled"));
    }
}
