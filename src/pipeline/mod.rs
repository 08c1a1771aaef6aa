// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: search orchestration

mod orchestrator;
mod stats;

pub use orchestrator::SearchOrchestrator;
pub use stats::{SearchPreference, ServiceStats};
