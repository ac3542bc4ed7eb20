//! Budget execution dashboard generator.
//!
//! Polls a JSON snapshot exported from a spreadsheet pipeline, renders
//! it into a fixed set of HTML regions, and atomically publishes a
//! single self-contained page for a static host to serve.

pub mod dashboard;
pub mod fetch;
pub mod format;
pub mod logging;
pub mod model;
pub mod render;
pub mod state;
pub mod status;
