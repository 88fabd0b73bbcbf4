pub mod config;
pub mod redact;
pub mod restore;
pub mod roles;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use sd_config::Config;
use sd_engine::Engine;
use std::path::Path;
use tracing::debug;

/// Build an engine from defaults, overlaid with `--config` or, failing
/// that, the config file in the user's config directory.
pub fn load_engine(config_path: Option<&Path>) -> Result<Engine> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => Config::default_path(),
    };

    let config = match &path {
        Some(path) => {
            debug!(path = %path.display(), "Using configuration");
            Config::load(path)?
        }
        None => Config::default(),
    };

    // The rest of the config still loads; only the broken types go undetected
    let resolved = config.resolve();
    if !resolved.pattern_errors.is_empty() {
        let types: Vec<&str> = resolved
            .pattern_errors
            .iter()
            .map(|err| err.entity_type.as_str())
            .collect();
        eprintln!(
            "Warning: detection disabled for {} invalid pattern(s): {}",
            types.len(),
            types.join(", ")
        );
    }

    Ok(Engine::new(resolved.patterns, resolved.roles))
}

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn write_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn completions(shell: Shell) {
    let mut cmd = crate::cli::Cli::command();
    clap_complete::generate(shell, &mut cmd, "safe-disclosure", &mut std::io::stdout());
}
