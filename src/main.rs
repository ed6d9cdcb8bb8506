use clap::Parser;
use std::process::ExitCode;

use repoman::{
    args::Args,
    config::{Field, RepomanDirs},
    error, log, trace,
    vcs::Git,
};

fn app(args: &Args) -> anyhow::Result<()> {
    let dirs = RepomanDirs::default_paths()?;

    trace!("Base path: {}", dirs.base().display());
    trace!("Config file: {}", dirs.config_file().display());
    trace!("Template clone: {}", dirs.template_clone().display());

    repoman::app::run(args, dirs, &Git, Field::ask).map(|_| ())
}

fn main() -> ExitCode {
    let args = Args::parse();
    log::set_verbose(args.debug());

    match app(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
