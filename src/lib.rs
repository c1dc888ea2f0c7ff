// ctsl-report - lib.rs
//
// Library entry point. The whole pipeline is exposed here so any
// adapter (the bundled CLI, a web layer, integration tests) can run
// classification, rendering, and export without the binary.

pub mod app;
pub mod core;
pub mod util;
