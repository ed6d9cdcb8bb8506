pub use clap::{Parser, Subcommand};

/// Helps to eliminate repo boilerplate stuff.
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Args {
    /// Author name written into the templates [default: stored value or prompt]
    #[clap(long, global = true)]
    pub author: Option<String>,

    /// Author email written into the templates [default: stored value or prompt]
    #[clap(long, global = true)]
    pub author_email: Option<String>,

    /// GitHub username written into the templates [default: stored value or prompt]
    #[clap(long, global = true)]
    pub github_username: Option<String>,

    /// Name of the repository [default: name of the current directory]
    #[clap(long, global = true)]
    pub repo_name: Option<String>,

    /// Print debug output
    #[clap(long, global = true, overrides_with = "no_debug")]
    pub debug: bool,

    #[clap(long, global = true, overrides_with = "debug", hide = true)]
    pub no_debug: bool,

    /// Pull the latest version of the template repository before installing
    #[clap(long, global = true, overrides_with = "no_update")]
    pub update: bool,

    #[clap(long, global = true, overrides_with = "update", hide = true)]
    pub no_update: bool,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Install the GitHub boilerplate into the current directory
    InstallGithubTemplate {
        /// Language overlay to install on top of the generic files
        #[clap(long, default_value = "python")]
        language: String,
    },
}

impl Args {
    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug && !self.no_debug
    }

    #[must_use]
    pub fn update(&self) -> bool {
        self.update && !self.no_update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["repoman", "install-github-template"]).unwrap();

        assert!(!args.debug());
        assert!(!args.update());
        assert_eq!(args.author, None);
        assert_eq!(args.repo_name, None);
        assert_eq!(
            args.command,
            Some(Commands::InstallGithubTemplate {
                language: "python".into()
            })
        );
    }

    #[test]
    fn negated_flags_win_when_last() {
        let args =
            Args::try_parse_from(["repoman", "--debug", "--no-debug", "--update"]).unwrap();

        assert!(!args.debug());
        assert!(args.update());
        assert_eq!(args.command, None);
    }

    #[test]
    fn global_options() {
        let args = Args::try_parse_from([
            "repoman",
            "--author",
            "Ana",
            "--author-email",
            "ana@example.com",
            "--github-username",
            "ana",
            "--repo-name",
            "proj",
            "install-github-template",
            "--language",
            "ruby",
        ])
        .unwrap();

        assert_eq!(args.author.as_deref(), Some("Ana"));
        assert_eq!(args.author_email.as_deref(), Some("ana@example.com"));
        assert_eq!(args.github_username.as_deref(), Some("ana"));
        assert_eq!(args.repo_name.as_deref(), Some("proj"));
        assert_eq!(
            args.command,
            Some(Commands::InstallGithubTemplate {
                language: "ruby".into()
            })
        );
    }
}
