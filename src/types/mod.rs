//! Domain entities exchanged with the Gestelit backend.
//!
//! Wire format is JSON with camelCase field names; ordered aggregates carry
//! explicit 0-based positions.

mod checklist;
mod job;
mod preset;
mod reason;
mod station;
mod worker;

pub use checklist::{ChecklistItem, ChecklistSide};
pub use job::{Job, JobStatus};
pub use preset::{PipelinePreset, PresetStep};
pub use reason::StationReason;
pub use station::{ActiveSession, Station};
pub use worker::{Worker, WorkerRole};
