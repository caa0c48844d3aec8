//! Persistence adapter: typed wrappers over the Gestelit backend's HTTP
//! JSON API. The adapter translates working sequences into the wire shapes
//! the backend expects and reports failures without interpreting domain
//! codes; the UI layer maps those to localized messages.

mod assignments;
mod client;
mod error;
mod jobs;
mod presets;
mod stations;
mod workers;

pub use assignments::{AssignmentDiff, AssignmentReport};
pub use client::Client;
pub use error::ApiError;
pub use jobs::JobPayload;
pub use stations::{NewStation, StationUpdate};
pub use workers::WorkerPayload;
