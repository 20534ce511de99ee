//! The `scan` command

use anyhow::{Context, Result};
use apigen_codegen::{Naming, scan_module};
use apigen_core::ExistingModule;
use std::fs;

/// Scan a module file with `prefix` as the fallback C prefix.
pub fn scan_file(path: &str, prefix: &str) -> Result<ExistingModule> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read module: {path}"))?;
    Ok(scan_module(&text, &Naming::new(prefix, &[])))
}

pub fn run(path: &str, prefix: &str) -> Result<()> {
    let module = scan_file(path, prefix)?;
    let json = serde_json::to_string_pretty(&module).context("Failed to serialize scan result")?;
    println!("{json}");
    Ok(())
}
