use anyhow::Result;
use std::path::Path;

use super::load_engine;

pub fn list(config: Option<&Path>) -> Result<()> {
    let engine = load_engine(config)?;

    println!("Available roles:");
    println!("{}", "-".repeat(50));

    for (name, policy) in engine.roles().iter() {
        let allowed = if policy.allowed.is_empty() {
            "None".to_string()
        } else {
            policy
                .allowed
                .iter()
                .map(|ty| ty.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        println!("Role: {}", name);
        println!("  Description: {}", policy.description);
        println!("  Allowed entities: {}", allowed);
        println!("  Can restore: {}", policy.can_restore);
        println!();
    }

    Ok(())
}
