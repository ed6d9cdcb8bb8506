use anyhow::{bail, Context, Result};
use std::{
    ffi::OsStr,
    fmt::Display,
    path::{Path, PathBuf},
    process::Command,
};

use crate::{debug, info};

/// What an external version control command ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub program: String,
    pub args: Vec<String>,
    /// [`None`] when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutcome {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turns a non-zero exit into an error.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] naming the command and its exit code when it failed.
    pub fn check(self) -> Result<Self> {
        if !self.success() {
            match self.code {
                Some(code) => bail!("`{self}` exited with code {code}"),
                None => bail!("`{self}` was terminated by a signal"),
            }
        }

        Ok(self)
    }
}

impl Display for CommandOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

pub trait Vcs {
    /// Clones `url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] only if the command could not be started.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<CommandOutcome>;

    /// Brings the clone at `repo` up to date with its remote.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] only if the command could not be started.
    fn pull(&self, repo: &Path) -> Result<CommandOutcome>;
}

/// Shells out to the `git` binary found on `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Git;

impl Git {
    fn run(args: &[&OsStr]) -> Result<CommandOutcome> {
        let mut outcome = CommandOutcome {
            program: "git".into(),
            args: args.iter().map(|a| a.to_string_lossy().into_owned()).collect(),
            code: None,
        };

        debug!("Running: {outcome}");
        let status = Command::new(&outcome.program)
            .args(args)
            .status()
            .with_context(|| format!("Failed to run `{outcome}`, is git installed?"))?;
        outcome.code = status.code();

        Ok(outcome)
    }
}

impl Vcs for Git {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<CommandOutcome> {
        Self::run(&[OsStr::new("clone"), OsStr::new(url), dest.as_os_str()])
    }

    fn pull(&self, repo: &Path) -> Result<CommandOutcome> {
        Self::run(&[OsStr::new("-C"), repo.as_os_str(), OsStr::new("pull")])
    }
}

/// What [`TemplateRepo::ensure_clone`] had to do.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Synced {
    pub cloned: bool,
    pub pulled: bool,
}

/// Local clone of the remote template repository.
#[derive(Debug, Clone)]
pub struct TemplateRepo {
    url: String,
    path: PathBuf,
}

impl TemplateRepo {
    #[must_use]
    pub fn new(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Directory of the overlay named `name` inside the clone.
    #[must_use]
    pub fn overlay(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }

    /// Clones the repository if it is not on disk yet and pulls it when
    /// `update` is set, whether or not it was just cloned.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if git can not be started or exits unsuccessfully.
    pub fn ensure_clone(&self, vcs: &impl Vcs, update: bool) -> Result<Synced> {
        let mut synced = Synced::default();

        if !self.path.exists() {
            info!(
                "Did not find repo at {}. Cloning {}...",
                self.path.display(),
                Name(&self.path)
            );
            vcs.clone_repo(&self.url, &self.path)?
                .check()
                .context("Failed to clone the template repository")?;
            info!("Cloned {} to {}", Name(&self.path), self.path.display());
            synced.cloned = true;
        }

        if update {
            info!("Updating {}...", Name(&self.path));
            vcs.pull(&self.path)?
                .check()
                .context("Failed to update the template repository")?;
            info!("Updated {} at {}", Name(&self.path), self.path.display());
            synced.pulled = true;
        }

        Ok(synced)
    }
}

struct Name<'a>(&'a Path);

impl Display for Name<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.file_name() {
            Some(name) => write!(f, "{}", name.to_string_lossy()),
            None => write!(f, "{}", self.0.display()),
        }
    }
}
