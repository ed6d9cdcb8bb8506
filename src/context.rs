use derive_builder::Builder;

use crate::config::{RepomanDirs, Settings};

/// State of a single invocation, handed explicitly to every step.
#[derive(Builder, Debug, Clone)]
#[builder(setter(into))]
pub struct Context {
    #[builder(default)]
    pub update: bool,
    pub repo_name: String,
    pub settings: Settings,
    pub dirs: RepomanDirs,
}

impl Context {
    /// Create a new [`Context`] builder
    #[must_use]
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }
}
