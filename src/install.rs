use anyhow::{bail, ensure, Result};
use std::str::FromStr;

use crate::{
    compose::merge_copy,
    config::{ensure_directory, TEMPLATE_REPO_URL},
    contents::Placeholders,
    context::Context,
    debug, info,
    substitute::{affected_files, process, Summary},
    vcs::{TemplateRepo, Vcs},
};

/// Overlay copied for every language, before the language one.
pub const GENERIC_OVERLAY: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
}

impl Language {
    /// Overlay directory inside the template repository.
    #[must_use]
    pub fn overlay(self) -> &'static str {
        match self {
            Language::Python => "python",
        }
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "python" => Ok(Language::Python),
            other => bail!("Language {other} not implemented."),
        }
    }
}

/// Copies the generic and the `language` overlays of the template repository
/// into the base directory and fills in their placeholders.
///
/// # Errors
///
/// Fails before touching anything when `language` is not supported. Later
/// failures (git, IO, non-text files) leave whatever was already copied or
/// substituted in place.
pub fn install_github_template(ctx: &Context, language: &str, vcs: &impl Vcs) -> Result<Summary> {
    let language = Language::from_str(language)?;
    let base = ctx.dirs.base();

    info!("Initializing github template...");
    ensure_directory(ctx.dirs.cache_dir(), "cache")?;
    ensure_directory(ctx.dirs.config_dir(), "config")?;

    let repo = TemplateRepo::new(TEMPLATE_REPO_URL, ctx.dirs.template_clone());
    repo.ensure_clone(vcs, ctx.update)?;
    debug!("Using templates from {}", repo.path().display());

    let generic = repo.overlay(GENERIC_OVERLAY);
    let specific = repo.overlay(language.overlay());
    for overlay in [&generic, &specific] {
        ensure!(
            overlay.is_dir(),
            "Template directory {} does not exist, try again with --update",
            overlay.display()
        );
    }

    merge_copy(&generic, base)?;
    merge_copy(&specific, base)?;
    info!("Copied github templates to {}", base.display());

    let files = affected_files(&generic, &specific)?;
    debug!("All files affected: {files:?}");

    let summary = process(&files, base, &Placeholders::from_context(ctx))?;
    debug!("Processed all files.");
    info!(
        "Initialized github template! ({} files, {} filled in)",
        summary.scanned, summary.rewritten
    );

    Ok(summary)
}
