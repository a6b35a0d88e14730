//! Directory walking for source discovery.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};

/// Extensions the tree provider understands.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Directory names skipped wherever they appear.
    pub ignore_dirs: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            ignore_dirs: vec!["node_modules".to_string()],
        }
    }
}

pub fn matches_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn should_skip(entry: &DirEntry, options: &ScanOptions) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return true;
    }
    entry.file_type().is_dir() && options.ignore_dirs.iter().any(|d| *d == name)
}

/// Every source file under `root`, sorted by path.
pub fn gather_source_files(root: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !should_skip(entry, options));
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
            Error::io(&path, io::Error::from(e))
        })?;
        if entry.file_type().is_file() && matches_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
