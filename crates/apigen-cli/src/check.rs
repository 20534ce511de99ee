//! The `check` command

use crate::inputs::{DEFAULT_CONFIG, load_config};
use anyhow::Result;

pub fn check(config_path: Option<String>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    println!("Checking config: {}", path);

    let config = load_config(Some(&path))?;

    println!("✓ Root object: {}", config.root_object);
    println!("✓ Module prefix: {}", config.module_prefix);
    println!("✓ Type prefixes: {}", config.type_prefixes.join(", "));
    println!(
        "✓ Guards: {} / {}",
        config.version_macro, config.deprecation_macro
    );
    println!(
        "✓ Nullable: {} result(s), {} function(s) with nullable parameters",
        config.nullability.results.len(),
        config.nullability.params.len()
    );
    println!("\nConfig is valid!");

    Ok(())
}
