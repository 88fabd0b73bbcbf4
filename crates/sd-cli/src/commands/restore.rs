use anyhow::{Context, Result};
use sd_core::TokenMap;
use std::path::Path;

use super::{load_engine, read_text, write_text};

pub fn handle(
    input: &Path,
    tokens: &Path,
    output: &Path,
    role: &str,
    config: Option<&Path>,
) -> Result<()> {
    let engine = load_engine(config)?;
    let redacted = read_text(input)?;

    let token_map: TokenMap = serde_json::from_str(&read_text(tokens)?)
        .with_context(|| format!("Invalid token map file {}", tokens.display()))?;

    if !engine.roles().can_restore(role) {
        eprintln!(
            "Warning: role '{}' cannot restore; output is unchanged",
            role
        );
    }

    let restored = engine.restore(&redacted, &token_map, role);
    write_text(output, &restored)?;

    println!(
        "✓ Document restored for role '{}' and saved to {}",
        role,
        output.display()
    );

    Ok(())
}
