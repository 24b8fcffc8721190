//! Import directory discovery
//!
//! Lists the immediate sub-directories of a base path, optionally filtered by
//! a pattern on the directory name. The result is typically fed into
//! [`crate::LoaderOptions::dirs`].

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{ConfigError, Result};
use crate::pattern::Pattern;

/// List sub-directories of `base` whose names match `pattern`
///
/// Only direct children are returned, sorted by name. Files are skipped.
///
/// # Example
///
/// ```no_run
/// use scss_loader::{resolve_dirs, Pattern};
///
/// let themes = resolve_dirs("apps", Some(&Pattern::new("^theme-").unwrap())).unwrap();
/// ```
pub fn resolve_dirs(base: impl AsRef<Path>, pattern: Option<&Pattern>) -> Result<Vec<PathBuf>> {
    let base = base.as_ref();
    let mut dirs = Vec::new();

    for entry in WalkDir::new(base)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::DirRead {
            path: base.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        let keep = match pattern {
            Some(pattern) => pattern.is_match(&entry.file_name().to_string_lossy()),
            None => true,
        };
        if keep {
            dirs.push(entry.into_path());
        }
    }

    Ok(dirs)
}
