//! E2E test suite entry point.

#[path = "../common/mod.rs"]
mod common;
mod concurrency_workflow;
mod exclusivity_workflow;
mod fixture;
mod persistence_workflow;
