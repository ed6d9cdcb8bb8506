use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Turns `debug!` output on or off for the rest of the process.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

#[must_use]
pub fn verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            eprintln!(
                "{}: {}",
                "error".if_supports_color(owo_colors::Stream::Stderr, |s| s
                        .style(owo_colors::Style::new().bold().red())),
                format_args!($($arg)*)
            );
        }
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            println!(
                "{}: {}",
                "info".if_supports_color(owo_colors::Stream::Stdout, |s| s
                        .style(owo_colors::Style::new().bold().green())),
                format_args!($($arg)*)
            );
        }
    }
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            println!(
                "{}: {}",
                "warning".if_supports_color(owo_colors::Stream::Stdout, |s| s
                        .style(owo_colors::Style::new().bold().yellow())),
                format_args!($($arg)*)
            );
        }
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            if $crate::log::verbose() {
                println!(
                    "{}: {}",
                    "debug".if_supports_color(owo_colors::Stream::Stdout, |s| s
                            .style(owo_colors::Style::new().bold().blue())),
                    format_args!($($arg)*)
                );
            }
        }
    }
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            if std::env::var("REPOMAN_TRACE").is_ok() {
                println!(
                    "{}: {}",
                    "trace".if_supports_color(owo_colors::Stream::Stdout, |s| s
                            .style(owo_colors::Style::new().bold())),
                    format_args!($($arg)*)
                );
            }
        }
    }
}
