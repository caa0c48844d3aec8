//! Worker-assignment reconciliation.
//!
//! The diff (to-add, to-remove) is computed once from the current and
//! desired sets, then applied as sequential calls with per-key outcomes
//! collected into a report. Partial failure is reported explicitly; nothing
//! is rolled back, and the caller refreshes authoritative state afterwards.

use std::collections::BTreeSet;

use super::client::Client;
use super::error::ApiError;

/// The computed change set, before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentDiff {
    pub to_add: Vec<String>,
    pub to_remove: Vec<String>,
}

impl AssignmentDiff {
    /// Set difference in both directions. Order is deterministic
    /// (lexicographic) so retries issue the same sequence.
    pub fn compute(current: &[String], desired: &[String]) -> Self {
        let current: BTreeSet<&String> = current.iter().collect();
        let desired: BTreeSet<&String> = desired.iter().collect();
        Self {
            to_add: desired
                .difference(&current)
                .map(|s| (*s).clone())
                .collect(),
            to_remove: current
                .difference(&desired)
                .map(|s| (*s).clone())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Outcome of applying a diff: which keys landed, which failed with what.
#[derive(Debug, Default)]
pub struct AssignmentReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub failed: Vec<(String, ApiError)>,
}

impl AssignmentReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// First failure, for the dialog banner; the full list stays available.
    pub fn first_error(&self) -> Option<&ApiError> {
        self.failed.first().map(|(_, err)| err)
    }
}

impl Client {
    /// Apply an assignment diff for one worker, sequentially. Adds run
    /// before removes so a worker is never left with zero stations
    /// mid-reconciliation. An `ASSIGNMENT_EXISTS` rejection on add is
    /// treated as already-applied, not a failure.
    pub async fn reconcile_assignments(
        &self,
        worker_id: &str,
        diff: &AssignmentDiff,
    ) -> AssignmentReport {
        let mut report = AssignmentReport::default();

        for station_id in &diff.to_add {
            match self.add_assignment(worker_id, station_id).await {
                Ok(()) => report.added.push(station_id.clone()),
                Err(err) if err.domain_code() == Some("ASSIGNMENT_EXISTS") => {
                    tracing::debug!(worker_id, station_id, "assignment already present");
                    report.added.push(station_id.clone());
                }
                Err(err) => {
                    tracing::warn!(worker_id, station_id, %err, "assignment add failed");
                    report.failed.push((station_id.clone(), err));
                }
            }
        }

        for station_id in &diff.to_remove {
            match self.remove_assignment(worker_id, station_id).await {
                Ok(()) => report.removed.push(station_id.clone()),
                Err(err) => {
                    tracing::warn!(worker_id, station_id, %err, "assignment remove failed");
                    report.failed.push((station_id.clone(), err));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_diff_both_directions() {
        let diff = AssignmentDiff::compute(&ids(&["s1", "s2", "s3"]), &ids(&["s2", "s4"]));
        assert_eq!(diff.to_add, ids(&["s4"]));
        assert_eq!(diff.to_remove, ids(&["s1", "s3"]));
    }

    #[test]
    fn test_diff_of_equal_sets_is_empty() {
        let diff = AssignmentDiff::compute(&ids(&["s1", "s2"]), &ids(&["s2", "s1"]));
        assert!(diff.is_empty());
    }

    #[test]
    fn test_diff_is_order_insensitive_and_deterministic() {
        let a = AssignmentDiff::compute(&ids(&["s3", "s1"]), &ids(&["s9", "s2"]));
        let b = AssignmentDiff::compute(&ids(&["s1", "s3"]), &ids(&["s2", "s9"]));
        assert_eq!(a, b);
        assert_eq!(a.to_add, ids(&["s2", "s9"]));
    }

    #[test]
    fn test_report_first_error() {
        let mut report = AssignmentReport::default();
        assert!(report.all_succeeded());
        report
            .failed
            .push(("s1".to_string(), ApiError::domain("STATION_IN_USE")));
        report
            .failed
            .push(("s2".to_string(), ApiError::network("timeout")));
        assert!(!report.all_succeeded());
        assert_eq!(
            report.first_error().and_then(ApiError::domain_code),
            Some("STATION_IN_USE")
        );
    }
}
