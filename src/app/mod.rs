// ctsl-report - app/mod.rs
//
// Orchestration layer: the pipeline entry point used by all adapters,
// and the raw-view state controller.

pub mod pipeline;
pub mod view;
