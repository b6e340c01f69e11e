//! Broker export importers for the trade converter.
//!
//! This crate handles:
//! - Quote-aware CSV line tokenizing
//! - Format sniffing (acceptance tests) per export dialect
//! - Parsing accepted files into canonical trade records
//! - Reference-zone date/time normalization

pub mod datetime;
pub mod importer;
pub mod simulator;
pub mod tokenizer;
pub mod webull;

pub use datetime::TimeConvention;
pub use importer::{default_importers, detect, read_input, Importer};
pub use simulator::{SimulatorImporter, SimulatorPositionalImporter};
pub use webull::{WebullImporter, WEBULL_HEADER};
