use anyhow::Result;

use crate::{
    args::{Args, Commands},
    config::{ensure_directory, ConfigStore, Field, RepomanDirs, Settings},
    context::Context,
    debug, info,
    install::install_github_template,
    vcs::Vcs,
};

/// Resolves options against the stored settings, persists them and runs the
/// requested subcommand.
///
/// # Errors
///
/// Returns the first error of any step; nothing is retried.
pub fn run(
    args: &Args,
    dirs: RepomanDirs,
    vcs: &impl Vcs,
    ask: impl FnMut(Field) -> Result<String>,
) -> Result<Context> {
    info!("Starting repoman...");
    debug!("Debug mode is on");

    ensure_directory(dirs.cache_dir(), "cache")?;
    let store = ConfigStore::new(dirs.config_dir(), dirs.config_file());
    store.ensure_directory()?;

    let stored = store.load()?;
    let settings = Settings::resolve(
        stored.as_ref(),
        args.author.clone(),
        args.author_email.clone(),
        args.github_username.clone(),
        ask,
    )?;
    if stored.is_none() {
        store.create_default(
            &settings.author,
            &settings.author_email,
            &settings.github_username,
        )?;
    }
    store.write(&settings)?;

    let repo_name = args.repo_name.clone().unwrap_or_else(|| dirs.base_name());

    debug!("Author: {}", settings.author);
    debug!("Author email: {}", settings.author_email);
    debug!("Github username: {}", settings.github_username);
    debug!("Repo name: {repo_name}");

    let ctx = Context::builder()
        .update(args.update())
        .repo_name(repo_name)
        .settings(settings)
        .dirs(dirs)
        .build()?;

    match &args.command {
        Some(Commands::InstallGithubTemplate { language }) => {
            install_github_template(&ctx, language, vcs)?;
        }
        None => debug!("No command given, settings saved to {}", store.path().display()),
    }

    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args::Parser, vcs::tests::FakeVcs};
    use anyhow::bail;
    use std::fs;
    use tempfile::TempDir;

    fn dirs(tmp: &TempDir) -> RepomanDirs {
        let base = tmp.path().join("proj");
        fs::create_dir_all(&base).unwrap();
        RepomanDirs::new(base, &tmp.path().join("home"))
    }

    fn no_prompt(field: Field) -> Result<String> {
        bail!("Unexpected prompt for {field:?}")
    }

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("repoman").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn first_run_persists_options() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs(&tmp);
        let store = ConfigStore::new(dirs.config_dir(), dirs.config_file());
        let args = parse(&[
            "--author",
            "Ana",
            "--author-email",
            "ana@example.com",
            "--github-username",
            "ana",
        ]);

        let ctx = run(&args, dirs.clone(), &FakeVcs::default(), no_prompt).unwrap();

        assert_eq!(
            store.load().unwrap(),
            Some(Settings::new("Ana", "ana@example.com", "ana"))
        );
        assert_eq!(ctx.repo_name, "proj");
        assert!(dirs.cache_dir().is_dir());
    }

    #[test]
    fn stored_values_fill_in_and_latest_wins() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs(&tmp);
        let store = ConfigStore::new(dirs.config_dir(), dirs.config_file());
        store.create_default("Ana", "ana@example.com", "ana").unwrap();

        let ctx = run(
            &parse(&["--author", "Bo", "--repo-name", "other", "--debug"]),
            dirs,
            &FakeVcs::default(),
            no_prompt,
        )
        .unwrap();

        assert_eq!(ctx.settings, Settings::new("Bo", "ana@example.com", "ana"));
        assert_eq!(ctx.repo_name, "other");
        assert_eq!(store.load().unwrap(), Some(ctx.settings));
    }

    #[test]
    fn prompts_only_for_unknown_values() {
        let tmp = TempDir::new().unwrap();
        let mut asked = Vec::new();

        run(
            &parse(&["--author", "Ana"]),
            dirs(&tmp),
            &FakeVcs::default(),
            |field| {
                asked.push(field);
                Ok("typed".into())
            },
        )
        .unwrap();

        assert_eq!(asked, vec![Field::AuthorEmail, Field::GithubUsername]);
    }

    #[test]
    fn install_scenario() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs(&tmp);
        let vcs = FakeVcs {
            files: vec![
                ("all/README.md", "Hi {{ author }}"),
                ("python/setup.cfg", "{{ repo_name }}"),
            ],
            ..FakeVcs::default()
        };
        let args = parse(&[
            "--author",
            "Ana",
            "--author-email",
            "ana@example.com",
            "--github-username",
            "ana",
            "install-github-template",
        ]);

        run(&args, dirs.clone(), &vcs, no_prompt).unwrap();

        let base = dirs.base();
        assert_eq!(fs::read_to_string(base.join("README.md")).unwrap(), "Hi Ana");
        assert_eq!(fs::read_to_string(base.join("setup.cfg")).unwrap(), "proj");
    }

    #[test]
    fn unsupported_language_fails() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs(&tmp);
        let args = parse(&[
            "--author",
            "Ana",
            "--author-email",
            "ana@example.com",
            "--github-username",
            "ana",
            "install-github-template",
            "--language",
            "ruby",
        ]);

        let err = run(&args, dirs.clone(), &FakeVcs::default(), no_prompt).unwrap_err();

        assert_eq!(err.to_string(), "Language ruby not implemented.");
        assert_eq!(fs::read_dir(dirs.base()).unwrap().count(), 0);
    }
}
