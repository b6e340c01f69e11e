//! Output dialects for the trade converter.
//!
//! This crate provides:
//! - The exporter capability shared by every output dialect
//! - Tradervue generic-import CSV writers
//! - Construction of the active exporters from configuration

pub mod exporter;
pub mod tradervue;

pub use exporter::{exporter_for, exporters_for, format_number, Exporter};
pub use tradervue::{DateLayout, TradervueExporter, TRADERVUE_HEADER};
