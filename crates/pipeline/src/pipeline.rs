//! Import fan-in, dedupe, grouping and export fan-out.

use crate::discovery::discover_input_files;
use crate::report::RunReport;
use crate::session::{dedupe, group_by_session};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tradeconv_core::{ConversionContext, Error, Result, TradeRecord};
use tradeconv_export::{exporters_for, Exporter};
use tradeconv_ingestion::{default_importers, detect, read_input, Importer};

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome {
    /// An importer accepted and parsed every record.
    Imported {
        importer: &'static str,
        records: Vec<TradeRecord>,
    },
    /// No importer accepted the file.
    Unrecognized,
    /// The file could not be read, or an accepted file had a bad record.
    Failed {
        importer: Option<&'static str>,
        error: Error,
    },
}

/// Batch converter: importers in priority order, exporters in fan-out order.
pub struct ConversionPipeline {
    importers: Vec<Box<dyn Importer>>,
    exporters: Vec<Box<dyn Exporter>>,
}

impl ConversionPipeline {
    pub fn new(importers: Vec<Box<dyn Importer>>, exporters: Vec<Box<dyn Exporter>>) -> Self {
        Self {
            importers,
            exporters,
        }
    }

    /// Build the default registries for a context. Fails only on a bad zone.
    pub fn from_context(context: &ConversionContext) -> Result<Self> {
        let zone = context.zone()?;
        Ok(Self::new(
            default_importers(zone, context.fix_dates),
            exporters_for(&context.exporters),
        ))
    }

    /// Read a file once and hand it to the first accepting importer.
    pub fn import_file(&self, path: &Path) -> FileOutcome {
        let content = match read_input(path) {
            Ok(Some(content)) => content,
            Ok(None) => return FileOutcome::Unrecognized,
            Err(error) => {
                return FileOutcome::Failed {
                    importer: None,
                    error,
                }
            }
        };

        let Some(importer) = detect(&self.importers, &content) else {
            return FileOutcome::Unrecognized;
        };

        match importer.parse(&content) {
            Ok(records) => FileOutcome::Imported {
                importer: importer.name(),
                records,
            },
            Err(error) => FileOutcome::Failed {
                importer: Some(importer.name()),
                error,
            },
        }
    }

    /// Import every file in order and concatenate the accepted records.
    pub fn import_files(&self, paths: &[PathBuf], report: &mut RunReport) -> Vec<TradeRecord> {
        let mut all = Vec::new();
        for path in paths {
            report.files_seen += 1;
            match self.import_file(path) {
                FileOutcome::Imported { importer, records } => {
                    info!(
                        path = %path.display(),
                        importer,
                        records = records.len(),
                        "imported file"
                    );
                    report.files_imported += 1;
                    report.records_imported += records.len();
                    all.extend(records);
                }
                FileOutcome::Unrecognized => {
                    warn!(path = %path.display(), "no importer accepted file, skipping");
                    report.files_unrecognized += 1;
                }
                FileOutcome::Failed { importer, error } => {
                    error!(
                        path = %path.display(),
                        importer = importer.unwrap_or("-"),
                        %error,
                        "failed to import file"
                    );
                    report.files_failed += 1;
                }
            }
        }
        all
    }

    /// Write every session with every exporter. Write failures are counted
    /// and do not stop the remaining outputs.
    pub fn export_sessions(
        &self,
        sessions: &BTreeMap<NaiveDate, Vec<TradeRecord>>,
        output_dir: &Path,
        report: &mut RunReport,
    ) {
        for exporter in &self.exporters {
            for (date, records) in sessions {
                let path = output_dir.join(exporter.file_name(*date));
                match exporter.write_to_file(&path, records) {
                    Ok(()) => {
                        info!(path = %path.display(), records = records.len(), "wrote output");
                        report.files_written += 1;
                    }
                    Err(error) => {
                        error!(path = %path.display(), %error, "failed to write output");
                        report.write_failures += 1;
                    }
                }
            }
        }
    }

    /// Convert the given files into `output_dir`.
    pub fn run(&self, paths: &[PathBuf], output_dir: &Path) -> RunReport {
        let mut report = RunReport::default();

        let records = self.import_files(paths, &mut report);
        let unique = dedupe(records);
        report.duplicates_dropped = report.records_imported - unique.len();

        let sessions = group_by_session(unique);
        report.sessions = sessions.len();

        self.export_sessions(&sessions, output_dir, &mut report);

        info!(%report, "conversion finished");
        report
    }
}

/// Validate a context, discover its inputs and run the conversion.
///
/// Only configuration problems and an unreadable input directory are
/// returned as errors; per-file problems land in the report.
pub fn run_context(context: &ConversionContext) -> Result<RunReport> {
    context.validate()?;
    let pipeline = ConversionPipeline::from_context(context)?;
    let paths = discover_input_files(&context.input_dir)?;
    info!(
        input = %context.input_dir.display(),
        files = paths.len(),
        "discovered input files"
    );
    Ok(pipeline.run(&paths, &context.output_dir))
}
