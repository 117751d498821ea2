//! File system scanner for discovering icon sources.
//!
//! Recursively walks the input directory and collects every `.svg` file,
//! sorted so that manifest order is stable across runs and platforms.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::config::compile_excludes;
use crate::error::{IconsheetError, Result};
use crate::icon::{collate, IconFile};

/// Scan `root` for SVG files.
///
/// Hidden files and directories are skipped, as are paths matching any of
/// `excludes`. Fails with [`IconsheetError::InputNotFound`] if `root` does not
/// exist or holds no SVG files.
pub fn discover_icons(root: &Path, excludes: &[String]) -> Result<Vec<IconFile>> {
    if !root.is_dir() {
        return Err(IconsheetError::InputNotFound {
            path: root.to_path_buf(),
        });
    }

    let excludes = compile_excludes(excludes)?;

    let mut files: Vec<IconFile> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_svg(e.path()))
        .filter_map(|e| IconFile::from_path(root, e.path()))
        .filter(|f| !excludes.is_match(&f.relative))
        .collect();

    if files.is_empty() {
        return Err(IconsheetError::InputNotFound {
            path: root.to_path_buf(),
        });
    }

    files.sort_by(|a, b| collate(&a.relative, &b.relative));
    Ok(files)
}

/// Check for an exact, case-sensitive `.svg` extension.
pub fn is_svg(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("svg")
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
