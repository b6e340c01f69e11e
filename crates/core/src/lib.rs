//! Core types and configuration for the trade converter.
//!
//! This crate provides shared types used across all other crates:
//! - The canonical trade record and its validating builder
//! - The reference time zone all timestamps are expressed in
//! - The conversion context built from caller configuration
//! - Common error types

pub mod config;
pub mod error;
pub mod types;
pub mod zone;

pub use config::{ConversionContext, ExporterKind};
pub use error::{Error, Result};
pub use types::*;
pub use zone::ReferenceZone;
