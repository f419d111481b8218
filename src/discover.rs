//! Source file discovery below the scan root.
//!
//! Walks the tree in file-name order and selects `.go` files, skipping
//! `_test.go` files, `vendor` directories, hidden directories and anything
//! matching a user supplied exclude glob (relative to the root).

use crate::error::{Error, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const SOURCE_SUFFIX: &str = ".go";
const TEST_SUFFIX: &str = "_test.go";
const SKIPPED_DIRS: &[&str] = &["vendor"];

/// Compile `--exclude` patterns.
pub fn parse_excludes(patterns: &[String]) -> anyhow::Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(|e| anyhow::anyhow!("invalid exclude pattern {p:?}: {e}")))
        .collect()
}

/// Collect the source files to scan, sorted for deterministic output.
pub fn collect_sources(root: &Path, excludes: &[Pattern]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped(e, root, excludes));

    for entry in walker {
        let entry = entry.map_err(|e| Error::Io {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_file() && is_source(entry.path()) {
            files.push(entry.into_path());
        }
    }

    tracing::info!(root = %root.display(), files = files.len(), "discovered source files");
    Ok(files)
}

fn is_skipped(entry: &DirEntry, root: &Path, excludes: &[Pattern]) -> bool {
    let name = entry.file_name().to_string_lossy();
    if entry.file_type().is_dir() && (name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref()))
    {
        return true;
    }
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    let excluded = excludes.iter().any(|p| p.matches_path(relative));
    if excluded {
        tracing::debug!(path = %relative.display(), "excluded");
    }
    excluded
}

fn is_source(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    name.ends_with(SOURCE_SUFFIX) && !name.ends_with(TEST_SUFFIX)
}
