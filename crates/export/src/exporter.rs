//! The exporter capability.

use crate::tradervue::TradervueExporter;
use chrono::NaiveDate;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tradeconv_core::{ExporterKind, Result, TradeRecord};

/// An output dialect.
pub trait Exporter {
    /// Name used as the output file prefix.
    fn name(&self) -> &str;

    /// Render records, in the given order, to a sink.
    fn write(&self, out: &mut dyn Write, records: &[TradeRecord]) -> io::Result<()>;

    /// Output file name for one session.
    fn file_name(&self, session: NaiveDate) -> String {
        format!("{}-{}.csv", self.name(), session.format("%Y-%m-%d"))
    }

    /// Create (or truncate) `path` and write the records to it.
    ///
    /// A failure part way through leaves whatever was already written.
    fn write_to_file(&self, path: &Path, records: &[TradeRecord]) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer, records)?;
        writer.flush()?;
        Ok(())
    }
}

/// Build the exporter for a configured kind.
pub fn exporter_for(kind: ExporterKind) -> Box<dyn Exporter> {
    match kind {
        ExporterKind::Tradervue => Box::new(TradervueExporter::month_first()),
        ExporterKind::TradervueDayFirst => Box::new(TradervueExporter::day_first()),
    }
}

/// Build the active exporters in configuration order.
pub fn exporters_for(kinds: &[ExporterKind]) -> Vec<Box<dyn Exporter>> {
    kinds.iter().copied().map(exporter_for).collect()
}

/// Shortest representation that reads back to the same value.
///
/// `10.0` renders as `10`, `2.50` as `2.5`. Negative zero renders as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(150.25), "150.25");
        assert_eq!(format_number(2.50), "2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(-3.75), "-3.75");
    }

    #[test]
    fn test_exporters_for_kinds() {
        let exporters = exporters_for(&[ExporterKind::Tradervue, ExporterKind::TradervueDayFirst]);
        let names: Vec<_> = exporters.iter().map(|e| e.name().to_string()).collect();
        assert_eq!(names, vec!["Tradervue", "TradervueDayFirst"]);
    }

    #[test]
    fn test_file_name() {
        let exporter = exporter_for(ExporterKind::Tradervue);
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(exporter.file_name(date), "Tradervue-2025-03-10.csv");
    }
}
