//! Command-line arguments.
//!
//! | Flag | Description |
//! |------|-------------|
//! | `-i`, `--input` | Directory holding broker exports |
//! | `-o`, `--output` | Directory the per-session files go to |
//! | `-f`, `--fix-dates` | `true`/`false`/`1`/`0`: broker times carry a UTC offset |
//! | `-e`, `--exporter` | Output dialect, repeatable |
//! | `-z`, `--zone` | Reference time zone |
//! | `-c`, `--config` | JSON file with defaults for all of the above |
//!
//! Flags override values read from the config file.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tradeconv_core::{ConversionContext, ExporterKind, Result};

#[derive(Debug, Parser)]
#[command(
    name = "tradeconv",
    version,
    about = "Convert broker trade history exports into Tradervue import files"
)]
pub struct Cli {
    /// Directory scanned for .csv/.txt exports
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Directory the output files are written to
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Read broker times as UTC-offset instants (true, false, 1 or 0)
    #[arg(
        short = 'f',
        long = "fix-dates",
        action = clap::ArgAction::Set,
        value_parser = parse_bool_flag
    )]
    pub fix_dates: Option<bool>,

    /// Output dialect; repeat for several
    #[arg(short = 'e', long = "exporter", value_enum)]
    pub exporters: Vec<ExporterArg>,

    /// Reference time zone, IANA name
    #[arg(short = 'z', long = "zone")]
    pub zone: Option<String>,

    /// JSON configuration file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExporterArg {
    /// Tradervue generic import, MM/dd/yyyy dates.
    Tradervue,
    /// Tradervue generic import, d/M/yyyy dates.
    TradervueDayFirst,
}

impl From<ExporterArg> for ExporterKind {
    fn from(value: ExporterArg) -> Self {
        match value {
            ExporterArg::Tradervue => ExporterKind::Tradervue,
            ExporterArg::TradervueDayFirst => ExporterKind::TradervueDayFirst,
        }
    }
}

impl Cli {
    /// Layer the flags over the config file (or defaults).
    pub fn context(&self) -> Result<ConversionContext> {
        let mut context = match &self.config {
            Some(path) => ConversionContext::from_json_file(path)?,
            None => ConversionContext::default(),
        };

        if let Some(input) = &self.input {
            context.input_dir = input.clone();
        }
        if let Some(output) = &self.output {
            context.output_dir = output.clone();
        }
        if let Some(fix_dates) = self.fix_dates {
            context.fix_dates = fix_dates;
        }
        if !self.exporters.is_empty() {
            context.exporters = self.exporters.iter().copied().map(Into::into).collect();
        }
        if let Some(zone) = &self.zone {
            context.reference_zone = zone.clone();
        }
        Ok(context)
    }
}

/// Accepts exactly `true`, `false`, `1` or `0`, ignoring case.
fn parse_bool_flag(value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(format!("expected true, false, 1 or 0, got '{value}'")),
    }
}
