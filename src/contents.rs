use anyhow::{Context as _, Result};
use std::path::Path;

use crate::context::Context;

pub const AUTHOR: &str = "{{ author }}";
pub const AUTHOR_EMAIL: &str = "{{ author_email }}";
pub const GITHUB_USERNAME: &str = "{{ github_username }}";
pub const REPO_NAME: &str = "{{ repo_name }}";

/// Literal tokens and the text each one is replaced with, applied in order.
#[derive(Debug, Clone)]
pub struct Placeholders<'a>(Vec<(&'static str, &'a str)>);

impl<'a> Placeholders<'a> {
    #[must_use]
    pub fn new(pairs: Vec<(&'static str, &'a str)>) -> Self {
        Placeholders(pairs.into_iter().filter(|(t, _)| !t.is_empty()).collect())
    }

    /// Author, author email, GitHub username, then repository name.
    #[must_use]
    pub fn from_context(ctx: &'a Context) -> Self {
        Self::new(vec![
            (AUTHOR, ctx.settings.author.as_str()),
            (AUTHOR_EMAIL, ctx.settings.author_email.as_str()),
            (GITHUB_USERNAME, ctx.settings.github_username.as_str()),
            (REPO_NAME, ctx.repo_name.as_str()),
        ])
    }
}

pub struct Contents {
    pub(crate) contents: String,
}

pub struct Replaced {
    pub(crate) contents: String,
    replacements: usize,
}

impl Replaced {
    pub fn write_to_file(&self, mut target: impl std::io::Write) -> Result<()> {
        target.write_all(self.contents.as_bytes())?;
        Ok(())
    }

    /// Number of tokens that were replaced.
    #[must_use]
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Contents {
    /// Reads the whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the file can not be read or is not valid UTF-8.
    pub fn from_file(path: &Path) -> Result<Contents> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read text from {}", path.display()))?;

        Ok(Contents { contents })
    }

    /// Replaces each token in turn over the whole text. A value that holds a
    /// token further down the list is expanded by that later pass.
    #[must_use]
    pub fn replace(self, placeholders: &Placeholders<'_>) -> Replaced {
        let mut contents = self.contents;
        let mut replacements = 0;

        for &(token, value) in &placeholders.0 {
            let found = contents.matches(token).count();
            if found > 0 {
                contents = contents.replace(token, value);
                replacements += found;
            }
        }

        Replaced {
            contents,
            replacements,
        }
    }
}
