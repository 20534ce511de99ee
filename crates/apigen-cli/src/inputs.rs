//! Reading generator inputs from disk

use anyhow::{Context, Result};
use apigen_codegen::{Naming, scan_module};
use apigen_core::{ExistingModule, GenConfig, ModuleDoc, Namespace};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "apigen.toml";

/// Extension of generated module files.
pub const MODULE_EXTENSION: &str = "chs";

pub fn load_api(path: &str) -> Result<Vec<Namespace>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read API model: {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse API model: {path}"))
}

pub fn load_docs(path: Option<&str>) -> Result<Vec<ModuleDoc>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read documentation: {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse documentation: {path}"))
}

/// Load and validate the configuration. Without an explicit path the default
/// file is used when present, otherwise the built-in defaults.
pub fn load_config(path: Option<&str>) -> Result<GenConfig> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG).exists() => DEFAULT_CONFIG,
        None => return Ok(GenConfig::default()),
    };
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read config: {path}"))?;
    let config = GenConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config: {path}"))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {path}"))?;
    Ok(config)
}

/// File name of the module generated for a type.
pub fn module_file_name(type_name: &str) -> String {
    format!("{type_name}.{MODULE_EXTENSION}")
}

/// Scan the existing module of every object that has one in `dir`, keyed by
/// the object's C name. A file that several objects map to is skipped, since
/// its hints cannot be attributed to one of them.
pub fn load_existing(
    dir: Option<&str>,
    namespaces: &[Namespace],
    naming_for: impl Fn(&Namespace) -> Naming,
) -> Result<HashMap<String, ExistingModule>> {
    let mut existing = HashMap::new();
    let Some(dir) = dir else {
        return Ok(existing);
    };

    let mut candidates: BTreeMap<PathBuf, Vec<(&str, Naming)>> = BTreeMap::new();
    for namespace in namespaces {
        let naming = naming_for(namespace);
        for object in &namespace.objects {
            let path = Path::new(dir).join(module_file_name(&naming.type_name(&object.cname)));
            candidates
                .entry(path)
                .or_default()
                .push((object.cname.as_str(), naming.clone()));
        }
    }

    for (path, objects) in candidates {
        if !path.exists() {
            continue;
        }
        let [(cname, naming)] = objects.as_slice() else {
            let names: Vec<&str> = objects.iter().map(|(cname, _)| *cname).collect();
            tracing::warn!(
                path = %path.display(),
                "existing module matches several objects ({}), ignoring it",
                names.join(", ")
            );
            continue;
        };
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read existing module: {}", path.display()))?;
        tracing::debug!(object = %cname, path = %path.display(), "scanning existing module");
        existing.insert(cname.to_string(), scan_module(&text, naming));
    }

    Ok(existing)
}
