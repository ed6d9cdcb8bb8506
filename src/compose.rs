use anyhow::{ensure, Context, Result};
use fs_extra::dir::CopyOptions;
use std::path::Path;

use crate::trace;

/// Copies everything under `source` into `dest`, replacing files that already
/// exist at the same relative path and leaving every other file in `dest`
/// alone.
///
/// # Errors
///
/// Returns an [`Err`] if `source` is not a directory or any IO error occurs
/// while copying.
pub fn merge_copy(source: &Path, dest: &Path) -> Result<u64> {
    ensure!(
        source.is_dir(),
        "Template directory {} does not exist",
        source.display()
    );

    std::fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    let options = CopyOptions::new().overwrite(true).content_only(true);
    let copied = fs_extra::dir::copy(source, dest, &options).with_context(|| {
        format!(
            "Failed to copy {} into {}",
            source.display(),
            dest.display()
        )
    })?;

    trace!(
        "Copied {copied} bytes from {} into {}",
        source.display(),
        dest.display()
    );

    Ok(copied)
}
