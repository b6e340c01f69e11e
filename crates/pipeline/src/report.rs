//! Run accounting.

use std::fmt::{Display, Formatter};

/// Counters collected over one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Candidate files handed to the pipeline.
    pub files_seen: usize,
    /// Files accepted and fully parsed by an importer.
    pub files_imported: usize,
    /// Files no importer accepted.
    pub files_unrecognized: usize,
    /// Files accepted but dropped because a record failed to parse.
    pub files_failed: usize,
    /// Records imported before duplicate collapsing.
    pub records_imported: usize,
    /// Records dropped as duplicates.
    pub duplicates_dropped: usize,
    /// Distinct session dates.
    pub sessions: usize,
    /// Output files written successfully.
    pub files_written: usize,
    /// Output files that could not be written.
    pub write_failures: usize,
}

impl RunReport {
    /// Records that reached the exporters.
    pub fn records_exported(&self) -> usize {
        self.records_imported - self.duplicates_dropped
    }

    /// Whether any input was dropped or any output failed.
    pub fn has_problems(&self) -> bool {
        self.files_unrecognized > 0 || self.files_failed > 0 || self.write_failures > 0
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} files imported ({} unrecognized, {} failed), {} records ({} duplicates dropped), {} sessions, {} files written ({} failed)",
            self.files_imported,
            self.files_seen,
            self.files_unrecognized,
            self.files_failed,
            self.records_exported(),
            self.duplicates_dropped,
            self.sessions,
            self.files_written,
            self.write_failures,
        )
    }
}
