use anyhow::{Context, Result};
use sd_config::Config;
use std::path::Path;

pub fn generate(output: &Path) -> Result<()> {
    Config::sample()
        .save(output)
        .with_context(|| format!("Failed to write sample configuration to {}", output.display()))?;

    println!("✓ Sample configuration saved to {}", output.display());
    Ok(())
}
