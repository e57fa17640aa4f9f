//! # Directory Scanner Module
//!
//! Collects every regular file under the configured wallpaper folder. No
//! filtering happens here: whether a file is actually an image is decided
//! lazily, per navigation step, by the content sniffer.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively walks `root` and returns all regular file paths found.
///
/// A missing or unreadable root produces an empty result; unreadable
/// subtrees are skipped. Scan failures are deliberately silent beyond a
/// debug log entry, the caller just ends up with fewer candidates.
pub fn scan_directory(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => log::debug!("skipping unreadable entry under {}: {}", root.display(), e),
        }
    }

    log::debug!("scanned {}: {} files", root.display(), files.len());
    files
}
