//! Tag scanner: finds `+cty` tags in a source file.

pub mod comment;
pub mod declaration;
pub mod line;
pub mod tags;

use crate::error::{Error, Result, TagError};
use crate::model::{TagKind, TagResult};
use std::fs;
use std::path::Path;

/// Read and scan a source file.
pub fn scan_file(path: &Path) -> Result<Vec<TagResult>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let results = scan(path, &content)?;
    tracing::debug!(path = %path.display(), tags = results.len(), "scanned file");
    Ok(results)
}

/// Scan file content top to bottom, trying every tag kind on every line.
///
/// `path` is only used to locate errors.
pub fn scan(path: &Path, content: &str) -> Result<Vec<TagResult>> {
    let lines: Vec<&str> = content.lines().collect();
    let mut results = Vec::new();

    for (i, tag_line) in lines.iter().enumerate() {
        for kind in TagKind::ALL {
            if !kind.matches(tag_line) {
                continue;
            }
            let at_line = |source: TagError| Error::Parse {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            };

            let target = kind.parse_target(tag_line).map_err(at_line)?;
            let decl_line = declaration_line(&lines, i).map_err(at_line)?;
            let declaration = kind.parse_declaration(decl_line).map_err(at_line)?;

            results.push(TagResult {
                kind,
                target,
                declaration,
                comment: comment::surrounding_comment(&lines, i),
                line: i + 1,
            });
        }
    }

    Ok(results)
}

/// First non-comment line after the tag at `index`.
///
/// Fails when only comments and blank lines remain.
fn declaration_line<'a>(lines: &[&'a str], index: usize) -> Result<&'a str, TagError> {
    let rest = lines.get(index + 1..).unwrap_or_default();
    if rest.iter().all(|l| l.trim().is_empty() || line::is_comment(l)) {
        return Err(TagError::MissingDeclaration);
    }
    rest.iter()
        .copied()
        .find(|l| !line::is_comment(l))
        .map(str::trim)
        .ok_or(TagError::MissingDeclaration)
}
