//! The importer capability and the priority-ordered registry.

use crate::datetime::TimeConvention;
use crate::simulator::{SimulatorImporter, SimulatorPositionalImporter};
use crate::webull::WebullImporter;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;
use tradeconv_core::{ReferenceZone, Result, TradeRecord};

/// A broker export dialect that can recognize and parse its own files.
///
/// Implementations hold only immutable configuration, so one instance can be
/// reused for every file of a run.
pub trait Importer {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Cheap format sniffing. Never fails: a file that does not look right
    /// simply returns `false`.
    fn accepts(&self, content: &str) -> bool;

    /// Parse a whole accepted file. Any bad record fails the entire file.
    fn parse(&self, content: &str) -> Result<Vec<TradeRecord>>;

    /// Sniff and parse in one step.
    ///
    /// `Ok(None)` means the file is not in this dialect.
    fn import_str(&self, content: &str) -> Result<Option<Vec<TradeRecord>>> {
        if !self.accepts(content) {
            return Ok(None);
        }
        self.parse(content).map(Some)
    }

    /// Read a file and import it. Files that are not valid UTF-8 are treated
    /// as not accepted.
    fn try_import(&self, path: &Path) -> Result<Option<Vec<TradeRecord>>> {
        match read_input(path)? {
            Some(content) => self.import_str(&content),
            None => Ok(None),
        }
    }
}

/// Read a candidate input file whole.
///
/// `Ok(None)` means the file is not valid UTF-8 text and no importer can
/// accept it. Any other read failure is an error.
pub fn read_input(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            debug!(path = %path.display(), "not a text file");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Build the importers in the order they must be tried.
///
/// Richer header-based dialects come first; the positional simulator format
/// only checks a field count, so it goes last. `fix_dates` switches the
/// broker export to the UTC-offset convention.
pub fn default_importers(zone: ReferenceZone, fix_dates: bool) -> Vec<Box<dyn Importer>> {
    let webull_convention = if fix_dates {
        TimeConvention::UtcOffset
    } else {
        TimeConvention::WallClock
    };

    vec![
        Box::new(WebullImporter::new(zone, webull_convention)),
        Box::new(SimulatorImporter::new()),
        Box::new(SimulatorPositionalImporter::new(zone)),
    ]
}

/// Find the first importer that accepts the content.
pub fn detect<'a>(importers: &'a [Box<dyn Importer>], content: &str) -> Option<&'a dyn Importer> {
    importers
        .iter()
        .map(|importer| importer.as_ref())
        .find(|importer| {
            let accepted = importer.accepts(content);
            debug!(importer = importer.name(), accepted, "acceptance test");
            accepted
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webull::WEBULL_HEADER;

    #[test]
    fn test_registry_order() {
        let importers = default_importers(ReferenceZone::eastern(), false);
        let names: Vec<_> = importers.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["Webull", "WarriorTradingSim", "WarriorTradingSimPositional"]);
    }

    #[test]
    fn test_detect_broker_export() {
        let importers = default_importers(ReferenceZone::eastern(), false);
        let content = format!(
            "{WEBULL_HEADER}\nAAPL,Apple Inc,USD,ETF,2025/03/10,09:31:00,Buy,10,150.25,1502.50,1500.00,2.50,0,NASDAQ\n"
        );
        assert_eq!(detect(&importers, &content).map(|i| i.name()), Some("Webull"));
    }

    #[test]
    fn test_detect_positional() {
        let importers = default_importers(ReferenceZone::eastern(), false);
        let content = "10/03/25,09:31:00,AAPL,B,100,150.25,x\n";
        assert_eq!(
            detect(&importers, content).map(|i| i.name()),
            Some("WarriorTradingSimPositional")
        );
    }

    #[test]
    fn test_detect_nothing() {
        let importers = default_importers(ReferenceZone::eastern(), false);
        assert!(detect(&importers, "hello,world\n").is_none());
        assert!(detect(&importers, "").is_none());
    }

    #[test]
    fn test_try_import_binary_file_is_not_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.csv");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x81]).unwrap();

        let importers = default_importers(ReferenceZone::eastern(), false);
        for importer in &importers {
            assert!(importer.try_import(&path).unwrap().is_none());
        }
    }

    #[test]
    fn test_read_input() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("text.csv");
        std::fs::write(&text, "a,b\n").unwrap();
        let blob = dir.path().join("blob.csv");
        std::fs::write(&blob, [0xff, 0xfe, 0x00, 0x81]).unwrap();

        assert_eq!(read_input(&text).unwrap().as_deref(), Some("a,b\n"));
        assert!(read_input(&blob).unwrap().is_none());
        assert!(matches!(
            read_input(&dir.path().join("missing.csv")),
            Err(tradeconv_core::Error::Io(_))
        ));
    }

    #[test]
    fn test_try_import_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let importer = SimulatorImporter::new();
        assert!(importer.try_import(&dir.path().join("missing.csv")).is_err());
    }
}
