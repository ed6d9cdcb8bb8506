use anyhow::{Context, Result};
use std::{
    collections::HashSet,
    fs::OpenOptions,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

use crate::{
    contents::{Contents, Placeholders},
    debug,
};

/// Every path below `root`, directories included, relative to `root`.
///
/// The walk is lazy; call again to start over.
pub fn list_relative_files(root: &Path) -> impl Iterator<Item = Result<PathBuf>> + '_ {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(move |entry| -> Result<PathBuf> {
            let entry =
                entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            Ok(entry.path().strip_prefix(root)?.to_path_buf())
        })
}

/// Relative paths found in the generic overlay followed by the language
/// overlay. A path present in both is listed once, at its first position.
///
/// # Errors
///
/// Returns an [`Err`] if either directory can not be walked.
pub fn affected_files(generic: &Path, specific: &Path) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for path in list_relative_files(generic).chain(list_relative_files(specific)) {
        let path = path?;
        if seen.insert(path.clone()) {
            files.push(path);
        }
    }

    Ok(files)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Regular files that were read.
    pub scanned: usize,
    /// Files that contained at least one token and were written back.
    pub rewritten: usize,
}

/// Replaces the tokens in every `files` entry that resolves to a regular
/// file under `base`. Anything else is skipped.
///
/// # Errors
///
/// Stops at the first file that can not be read as text or written back.
/// Files handled before it keep their new contents.
pub fn process(
    files: &[PathBuf],
    base: &Path,
    placeholders: &Placeholders<'_>,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for rel in files {
        let path = base.join(rel);
        if !path.is_file() {
            continue;
        }

        debug!("Processing file: {}", path.display());
        let replaced = Contents::from_file(&path)?.replace(placeholders);
        summary.scanned += 1;

        if replaced.replacements() == 0 {
            continue;
        }

        let target = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        replaced
            .write_to_file(target)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        summary.rewritten += 1;

        debug!(
            "Processed file: {} ({} replacements)",
            path.display(),
            replaced.replacements()
        );
    }

    Ok(summary)
}
