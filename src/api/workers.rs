//! Worker endpoints: CRUD plus per-station assignment calls. The batch
//! assignment reconciliation lives in `assignments.rs`.

use serde::Serialize;

use super::client::{Client, ItemsEnvelope};
use super::error::ApiError;
use crate::types::{ActiveSession, Worker, WorkerRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerPayload {
    pub name: String,
    pub badge: String,
    pub role: WorkerRole,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignmentBody<'a> {
    station_id: &'a str,
}

impl Client {
    pub async fn list_workers(&self) -> Result<Vec<Worker>, ApiError> {
        let envelope: ItemsEnvelope<Worker> = self.get_json("/workers").await?;
        Ok(envelope.items)
    }

    pub async fn create_worker(&self, worker: &WorkerPayload) -> Result<Worker, ApiError> {
        self.post_json("/workers", worker).await
    }

    pub async fn update_worker(
        &self,
        id: &str,
        worker: &WorkerPayload,
    ) -> Result<(), ApiError> {
        self.put_unit(&format!("/workers/{id}"), worker).await
    }

    /// Rejected with `WORKER_HAS_SESSION` while the worker is clocked in.
    pub async fn delete_worker(&self, id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/workers/{id}")).await
    }

    /// Advisory check before destructive edits; the delete itself still
    /// rejects with `WORKER_HAS_SESSION` if a session starts in between.
    pub async fn worker_active_session(&self, id: &str) -> Result<ActiveSession, ApiError> {
        self.get_json(&format!("/workers/{id}/active-session")).await
    }

    /// Station ids the worker may operate, unordered.
    pub async fn worker_assignments(&self, id: &str) -> Result<Vec<String>, ApiError> {
        let envelope: ItemsEnvelope<String> =
            self.get_json(&format!("/workers/{id}/assignments")).await?;
        Ok(envelope.items)
    }

    pub async fn add_assignment(&self, id: &str, station_id: &str) -> Result<(), ApiError> {
        self.post_unit(
            &format!("/workers/{id}/assignments"),
            &AssignmentBody { station_id },
        )
        .await
    }

    pub async fn remove_assignment(&self, id: &str, station_id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/workers/{id}/assignments/{station_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_payload_wire_shape() {
        let json = serde_json::to_value(WorkerPayload {
            name: "Dana".to_string(),
            badge: "1042".to_string(),
            role: WorkerRole::Operator,
        })
        .unwrap();
        assert_eq!(json["badge"], "1042");
        assert_eq!(json["role"], "operator");
    }
}
