use serde::{Deserialize, Serialize};
use std::fmt;

/// A production job tracked on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    /// Works-order number shown on travelers and labels.
    pub number: String,
    pub product: String,
    pub quantity: u32,
    pub status: JobStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    InProgress,
    Done,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Open => write!(f, "open"),
            JobStatus::InProgress => write!(f, "in_progress"),
            JobStatus::Done => write!(f, "done"),
        }
    }
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::Open, JobStatus::InProgress, JobStatus::Done];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(JobStatus::Open),
            "in_progress" => Some(JobStatus::InProgress),
            "done" => Some(JobStatus::Done),
            _ => None,
        }
    }
}
