pub mod app;
pub mod args;
pub mod compose;
pub mod config;
pub mod contents;
pub mod context;
pub mod install;
pub mod log;
pub mod substitute;
pub mod vcs;
