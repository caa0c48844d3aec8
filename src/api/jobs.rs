//! Production-job endpoints.

use serde::Serialize;

use super::client::{Client, ItemsEnvelope};
use super::error::ApiError;
use crate::types::{ActiveSession, Job, JobStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    pub number: String,
    pub product: String,
    pub quantity: u32,
    pub status: JobStatus,
}

impl Client {
    pub async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let envelope: ItemsEnvelope<Job> = self.get_json("/jobs").await?;
        Ok(envelope.items)
    }

    pub async fn create_job(&self, job: &JobPayload) -> Result<Job, ApiError> {
        self.post_json("/jobs", job).await
    }

    pub async fn update_job(&self, id: &str, job: &JobPayload) -> Result<(), ApiError> {
        self.put_unit(&format!("/jobs/{id}"), job).await
    }

    /// Rejected with `JOB_IN_USE` while a worker is logged onto the job.
    pub async fn delete_job(&self, id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/jobs/{id}")).await
    }

    pub async fn job_active_session(&self, id: &str) -> Result<ActiveSession, ApiError> {
        self.get_json(&format!("/jobs/{id}/active-session")).await
    }
}
