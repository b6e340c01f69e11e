//! Conversion pipeline for the trade converter.
//!
//! This crate provides:
//! - Input file discovery
//! - Import fan-in with first-accepting-importer dispatch
//! - Duplicate collapsing and session grouping
//! - Fan-out of every session to every exporter
//! - Run accounting

pub mod discovery;
pub mod pipeline;
pub mod report;
pub mod session;

pub use discovery::discover_input_files;
pub use pipeline::{run_context, ConversionPipeline, FileOutcome};
pub use report::RunReport;
pub use session::{dedupe, group_by_session};
