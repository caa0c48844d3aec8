//! Gestelit console: a terminal admin client for the Gestelit
//! manufacturing-floor tracking backend. Stations, workers, pipeline
//! presets, and jobs are edited in modal dialogs over local ordered
//! working copies and saved back through explicit whole-list calls.

pub mod api;
pub mod app;
pub mod config;
pub mod i18n;
pub mod logging;
pub mod ordered;
pub mod session;
pub mod types;
pub mod ui;
pub mod validate;
