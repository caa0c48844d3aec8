use serde::{Deserialize, Serialize};
use std::fmt;

/// A floor worker or shift manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: String,
    pub name: String,
    /// Badge number punched at the station terminal.
    pub badge: String,
    pub role: WorkerRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerRole {
    Operator,
    Manager,
}

impl WorkerRole {
    pub const ALL: [WorkerRole; 2] = [WorkerRole::Operator, WorkerRole::Manager];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "operator" => Some(WorkerRole::Operator),
            "manager" => Some(WorkerRole::Manager),
            _ => None,
        }
    }
}

impl fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerRole::Operator => write!(f, "operator"),
            WorkerRole::Manager => write!(f, "manager"),
        }
    }
}
