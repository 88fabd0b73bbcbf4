use anyhow::{Context, Result};
use sd_core::{CustomEntities, custom_entities_from_raw};
use std::collections::BTreeMap;
use std::path::Path;

use super::{load_engine, read_text, write_text};

pub fn handle(
    input: &Path,
    output: &Path,
    role: &str,
    config: Option<&Path>,
    entities: Option<&Path>,
    save_tokens: Option<&Path>,
) -> Result<()> {
    let mut engine = load_engine(config)?;
    let content = read_text(input)?;

    let custom_entities = entities.map(load_custom_entities).transpose()?;

    let (redacted, token_map) = engine.redact(&content, role, custom_entities.as_ref());

    write_text(output, &redacted)?;
    if let Some(path) = save_tokens {
        let json = serde_json::to_string_pretty(&token_map)?;
        write_text(path, &json)?;
    }

    println!(
        "✓ Document redacted for role '{}' and saved to {}",
        role,
        output.display()
    );
    println!("  Tokens: {}", token_map.len());
    if let Some(path) = save_tokens {
        println!("  Token mapping saved to {}", path.display());
    }

    Ok(())
}

fn load_custom_entities(path: &Path) -> Result<CustomEntities> {
    let content = read_text(path)?;
    let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid custom entities file {}", path.display()))?;
    custom_entities_from_raw(raw)
        .with_context(|| format!("Invalid custom entities file {}", path.display()))
}
