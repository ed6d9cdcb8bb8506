use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Identity defaults reused across invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub author: String,
    pub author_email: String,
    pub github_username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Author,
    AuthorEmail,
    GithubUsername,
}

impl Field {
    #[must_use]
    pub fn prompt(self) -> &'static str {
        match self {
            Field::Author => "Your name please",
            Field::AuthorEmail => "Your email-address please",
            Field::GithubUsername => "Your github username please",
        }
    }

    /// Asks for the value on the terminal.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the prompt can not be shown (e.g. no TTY) or
    /// the user cancels it.
    pub fn ask(self) -> Result<String> {
        inquire::Text::new(self.prompt())
            .prompt()
            .with_context(|| format!("Failed to read a value for '{}'", self.prompt()))
    }
}

impl Settings {
    #[must_use]
    pub fn new(
        author: impl Into<String>,
        author_email: impl Into<String>,
        github_username: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            author_email: author_email.into(),
            github_username: github_username.into(),
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Author => &self.author,
            Field::AuthorEmail => &self.author_email,
            Field::GithubUsername => &self.github_username,
        }
    }

    /// Picks each field from the command line, then the stored settings,
    /// and only asks for it when neither has a value.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `ask`.
    pub fn resolve(
        stored: Option<&Settings>,
        author: Option<String>,
        author_email: Option<String>,
        github_username: Option<String>,
        mut ask: impl FnMut(Field) -> Result<String>,
    ) -> Result<Settings> {
        let mut pick = |field: Field, given: Option<String>| -> Result<String> {
            match given.or_else(|| stored.map(|s| s.get(field).to_owned())) {
                Some(value) => Ok(value),
                None => ask(field),
            }
        };

        Ok(Settings {
            author: pick(Field::Author, author)?,
            author_email: pick(Field::AuthorEmail, author_email)?,
            github_username: pick(Field::GithubUsername, github_username)?,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct ConfigFile {
    defaults: Settings,
}

/// Reads and writes the settings file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
    file: PathBuf,
}

impl ConfigStore {
    #[must_use]
    pub fn new(dir: &Path, file: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            file: file.to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.as_path()
    }

    /// # Errors
    ///
    /// Returns an [`Err`] if the config directory can not be created.
    pub fn ensure_directory(&self) -> Result<()> {
        super::ensure_directory(&self.dir, "config")
    }

    /// Returns the stored settings, or [`None`] when there is no config file yet.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the file exists but can not be read or parsed.
    pub fn load(&self) -> Result<Option<Settings>> {
        if !self.file.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read config: {}", self.file.display()))?;
        let config: ConfigFile = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", self.file.display()))?;

        Ok(Some(config.defaults))
    }

    /// Builds settings from the given values and persists them right away.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the settings can not be written.
    pub fn create_default(
        &self,
        author: &str,
        author_email: &str,
        github_username: &str,
    ) -> Result<Settings> {
        let settings = Settings::new(author, author_email, github_username);
        self.write(&settings)?;
        Ok(settings)
    }

    /// Replaces the whole config file with `settings`.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the directory can not be created or the file
    /// can not be written.
    pub fn write(&self, settings: &Settings) -> Result<()> {
        self.ensure_directory()?;

        let contents = toml::to_string_pretty(&ConfigFile {
            defaults: settings.clone(),
        })?;
        std::fs::write(&self.file, contents)
            .with_context(|| format!("Failed to write config: {}", self.file.display()))?;
        crate::trace!("Wrote config to {}", self.file.display());

        Ok(())
    }
}
