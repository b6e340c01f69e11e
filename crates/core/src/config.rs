//! Configuration structures for the trade converter.

use crate::error::{Error, Result};
use crate::zone::{ReferenceZone, DEFAULT_REFERENCE_ZONE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output dialects the converter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExporterKind {
    /// Tradervue generic import, month-first dates.
    Tradervue,
    /// Tradervue generic import, day-first dates.
    TradervueDayFirst,
}

/// Everything a conversion run needs, built once before the pipeline starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionContext {
    /// Directory scanned for `.csv` / `.txt` exports.
    pub input_dir: PathBuf,
    /// Directory the per-session files are written to.
    pub output_dir: PathBuf,
    /// Active exporters, in fan-out order.
    pub exporters: Vec<ExporterKind>,
    /// Read broker export times as UTC-offset instants instead of
    /// reference-zone wall-clock time.
    pub fix_dates: bool,
    /// IANA name (or alias) of the reference zone.
    pub reference_zone: String,
}

impl Default for ConversionContext {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            output_dir: PathBuf::new(),
            exporters: vec![ExporterKind::Tradervue],
            fix_dates: false,
            reference_zone: DEFAULT_REFERENCE_ZONE.to_string(),
        }
    }
}

impl ConversionContext {
    /// Create a context for the given directories with default settings.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Load a context from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Resolve the reference zone named by this context.
    pub fn zone(&self) -> Result<ReferenceZone> {
        ReferenceZone::resolve(&self.reference_zone)
    }

    /// Check directories and zone. Every failure here is fatal.
    pub fn validate(&self) -> Result<ReferenceZone> {
        check_dir("input", &self.input_dir)?;
        check_dir("output", &self.output_dir)?;
        if self.exporters.is_empty() {
            return Err(Error::config("no exporters configured"));
        }
        self.zone()
    }
}

fn check_dir(label: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::config(format!("missing {label} path")));
    }
    if !path.is_dir() {
        return Err(Error::config(format!(
            "invalid {label} path: '{}'",
            path.display()
        )));
    }
    Ok(())
}
