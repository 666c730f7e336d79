pub mod default_config;
pub mod run;
pub mod show;

use std::path::Path;

use anyhow::Context;
use mseq_config::{SequenceConfig, DEFAULT_CONFIG_FILE};

/// An explicit `--config` must exist; otherwise `./mseq.toml` is used when
/// present and the built-in demo when not.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SequenceConfig> {
    match path {
        Some(path) => SequenceConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => SequenceConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))
            .with_context(|| format!("failed to load config {}", DEFAULT_CONFIG_FILE)),
    }
}
