use serde::{Deserialize, Serialize};

/// A physical production-line work cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    /// Short machine code, unique across stations (backend-enforced).
    pub code: String,
    pub name: String,
}

/// Advisory lock signal: whether a worker is currently operating against an
/// entity. Checked before destructive edits; not transactional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    pub has_active_session: bool,
    /// Name of the blocking worker, when the backend knows it.
    #[serde(default)]
    pub worker_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_session_wire_shape() {
        let session: ActiveSession =
            serde_json::from_str(r#"{"hasActiveSession":true,"workerName":"Dana"}"#).unwrap();
        assert!(session.has_active_session);
        assert_eq!(session.worker_name.as_deref(), Some("Dana"));
    }

    #[test]
    fn test_active_session_worker_name_optional() {
        let session: ActiveSession =
            serde_json::from_str(r#"{"hasActiveSession":false}"#).unwrap();
        assert!(!session.has_active_session);
        assert!(session.worker_name.is_none());
    }
}
