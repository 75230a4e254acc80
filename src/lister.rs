use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{ManifestError, ManifestResult, NameSet};

/// Collect the base names of the files in `dir` whose extension is exactly `extension`.
///
/// Only the top level is scanned. Hidden entries and anything that does not
/// resolve to a regular file are skipped. Only the last extension is stripped, so
/// `intro.part1.jpg` yields `intro.part1`.
pub fn list_base_names(dir: &Path, extension: &str) -> ManifestResult<NameSet> {
    let mut names = NameSet::new();

    for entry_result in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry_result.map_err(|source| ManifestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;

        let Some(file_name) = entry.file_name().to_str() else {
            warn!("Skipping non UTF-8 file name in {}: {:?}", dir.display(), entry.file_name());
            continue;
        };

        if is_hidden(file_name) {
            continue;
        }

        if !entry.path().is_file() {
            continue;
        }

        if let Some(base) = strip_extension(file_name, extension) {
            names.insert(base.to_string());
        } else {
            debug!("Ignoring {} (not .{})", entry.path().display(), extension);
        }
    }

    debug!("Found {} .{} files in {}", names.len(), extension, dir.display());
    Ok(names)
}

fn is_hidden(file_name: &str) -> bool {
    file_name.starts_with('.')
}

/// Base name of `file_name` if its last extension equals `extension`
fn strip_extension<'a>(file_name: &'a str, extension: &str) -> Option<&'a str> {
    let path = Path::new(file_name);
    let ext = path.extension().and_then(|e| e.to_str())?;
    if ext != extension {
        return None;
    }
    path.file_stem().and_then(|s| s.to_str())
}
