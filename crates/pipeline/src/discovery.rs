//! Input file discovery.

use std::path::{Path, PathBuf};
use tradeconv_core::Result;

/// Extensions (lowercase) of files worth sniffing.
pub const INPUT_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// List the `.csv` / `.txt` files directly inside `dir`, sorted by path.
///
/// Subdirectories are not descended into. Extension matching ignores case.
pub fn discover_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_input_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            INPUT_EXTENSIONS
                .iter()
                .any(|wanted| ext.eq_ignore_ascii_case(wanted))
        })
}
