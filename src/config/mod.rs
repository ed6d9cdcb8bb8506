mod store;

pub use store::{ConfigStore, Field, Settings};

use anyhow::{Context, Result};
use directories::UserDirs;
use std::path::{Path, PathBuf};

pub const TOOL_NAME: &str = "repoman";
pub const TEMPLATE_REPO_NAME: &str = "bs-repoman-github-templates";
pub const TEMPLATE_REPO_URL: &str =
    "git@github.com:BillSchumacher/bs-repoman-github-templates.git";

/// Every location the tool reads from or writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepomanDirs {
    base: PathBuf,
    config_dir: PathBuf,
    config_file: PathBuf,
    cache_dir: PathBuf,
    template_clone: PathBuf,
}

impl RepomanDirs {
    /// Lays out the tool directories for a given base directory and user home.
    #[must_use]
    pub fn new(base: PathBuf, home: &Path) -> Self {
        let config_dir = home.join(".config").join(TOOL_NAME);
        let cache_dir = home.join(".cache").join(TOOL_NAME);

        Self {
            base,
            config_file: config_dir.join("config.toml"),
            template_clone: cache_dir.join(TEMPLATE_REPO_NAME),
            config_dir,
            cache_dir,
        }
    }

    /// Attempt to create a new [`RepomanDirs`] from the process environment
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the current directory can not be resolved or
    /// the user has no home directory.
    pub fn default_paths() -> Result<Self> {
        let home = Self::get_user_home()?;
        Ok(Self::new(Self::get_current_dir()?, &home))
    }

    /// Returns the path for the user home `~/`
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if a path for the users home can not
    /// be found
    pub fn get_user_home() -> Result<PathBuf> {
        Ok(UserDirs::new()
            .context("Failed to get user's home directory")?
            .home_dir()
            .to_owned())
    }

    /// Returns the resolved current working directory
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the current working directory does not exist or
    /// can not be accessed.
    pub fn get_current_dir() -> Result<PathBuf> {
        let cwd = std::env::current_dir().context("Failed to get current dir")?;
        cwd.canonicalize()
            .with_context(|| format!("Failed to resolve {}", cwd.display()))
    }

    /// Final component of the base path, used as the default repository name.
    #[must_use]
    pub fn base_name(&self) -> String {
        self.base
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn base(&self) -> &Path {
        self.base.as_path()
    }

    #[must_use]
    pub fn config_dir(&self) -> &Path {
        self.config_dir.as_path()
    }

    #[must_use]
    pub fn config_file(&self) -> &Path {
        self.config_file.as_path()
    }

    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        self.cache_dir.as_path()
    }

    #[must_use]
    pub fn template_clone(&self) -> &Path {
        self.template_clone.as_path()
    }
}

/// Creates `path` and any missing parents.
///
/// # Errors
///
/// This function will return an error if the path exists but is not a
/// directory, or any IO error occurs
pub fn ensure_directory(path: &Path, what: &str) -> Result<()> {
    if path.is_dir() {
        crate::debug!("The {what} directory at path {} already exists", path.display());
        return Ok(());
    }

    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {what} directory {}", path.display()))?;
    crate::info!("Created {what} directory at {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let dirs = RepomanDirs::new(PathBuf::from("/tmp/proj"), Path::new("/home/ana"));

        assert_eq!(dirs.base(), Path::new("/tmp/proj"));
        assert_eq!(dirs.config_dir(), Path::new("/home/ana/.config/repoman"));
        assert_eq!(
            dirs.config_file(),
            Path::new("/home/ana/.config/repoman/config.toml")
        );
        assert_eq!(dirs.cache_dir(), Path::new("/home/ana/.cache/repoman"));
        assert_eq!(
            dirs.template_clone(),
            Path::new("/home/ana/.cache/repoman/bs-repoman-github-templates")
        );
        assert_eq!(dirs.base_name(), "proj");
    }

    #[test]
    fn ensure_directory_is_idempotent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");

        ensure_directory(&nested, "test").unwrap();
        assert!(nested.is_dir());
        ensure_directory(&nested, "test").unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("taken");
        std::fs::write(&file, "").unwrap();

        assert!(ensure_directory(&file, "test").is_err());
    }
}
