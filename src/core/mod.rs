// ctsl-report - core/mod.rs
//
// Core business logic layer: classification, report building, export.
// Pure functions of the result set; no filesystem or UI dependencies
// beyond Write sinks.

pub mod classify;
pub mod export;
pub mod model;
pub mod report;
