//! Recovery of ordering and call hints from a previously generated module.

use crate::imports::import_module_name;
use crate::naming::Naming;
use apigen_core::{ExistingModule, MemberInfo};
use std::collections::HashSet;

/// Words that start a top-level line without defining a function.
const NON_DEFINITIONS: &[&str] = &[
    "import", "module", "instance", "data", "type", "newtype", "class", "foreign", "deriving",
];

/// Value of `key="value"` inside a hook.
fn attribute<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let start = line.find(&format!("{key}=\""))? + key.len() + 2;
    let len = line[start..].find('"')?;
    Some(&line[start..start + len])
}

/// Name exported by one line of an export list.
fn export_name(line: &str) -> Option<String> {
    if line.is_empty() || line.starts_with("--") || line.starts_with('#') {
        return None;
    }
    let name = line
        .trim_start_matches(['(', ','])
        .trim()
        .split([',', ' ', '\t'])
        .next()?;
    name.starts_with(|c: char| c.is_alphabetic() || c == '_')
        .then(|| name.to_string())
}

/// Name defined by a top-level declaration line.
fn definition_name(line: &str) -> Option<String> {
    if line.starts_with(char::is_whitespace) || !(line.contains("::") || line.contains('=')) {
        return None;
    }
    let name = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .next()?;
    let defines = name.starts_with(|c: char| c.is_lowercase() || c == '_')
        && !NON_DEFINITIONS.contains(&name);
    defines.then(|| name.to_string())
}

/// Called function names and their safety in every call hook on a line.
fn call_hooks(line: &str) -> Vec<(&str, bool)> {
    let mut hooks = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find("{#") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("#}") else {
            break;
        };
        let mut words = after[..end].split_whitespace();
        if words.next() == Some("call") {
            let mut is_unsafe = false;
            for word in words {
                match word {
                    "unsafe" => is_unsafe = true,
                    "pure" | "fun" => {}
                    name => {
                        hooks.push((name, is_unsafe));
                        break;
                    }
                }
            }
        }
        rest = &after[end + 2..];
    }
    hooks
}

/// Scan module source text for the hints regeneration preserves.
///
/// `naming` supplies the default C prefix; a context hook declaring its own
/// prefix overrides it.
pub fn scan_module(text: &str, naming: &Naming) -> ExistingModule {
    let mut module = ExistingModule::default();
    let mut naming = naming.clone();
    let mut imports = Vec::new();
    let mut in_exports = false;
    let mut current_def: Option<String> = None;
    let mut seen = HashSet::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if module.module_name.is_none()
            && let Some(rest) = line.strip_prefix("module ")
        {
            module.module_name = rest
                .split(|c: char| c.is_whitespace() || c == '(')
                .find(|s| !s.is_empty())
                .map(String::from);
            in_exports = !rest.contains(") where");
            continue;
        }
        if in_exports {
            if trimmed.starts_with(')') || trimmed.ends_with(") where") {
                in_exports = false;
            } else if let Some(name) = export_name(trimmed) {
                module.exports.push(name);
            }
            continue;
        }

        if trimmed.starts_with("{#") && trimmed.contains("context") {
            if let Some(prefix) = attribute(trimmed, "prefix") {
                module.context_prefix = Some(prefix.to_string());
                naming = naming.with_prefix(prefix);
            }
            continue;
        }
        if import_module_name(trimmed).is_some() {
            imports.push(trimmed.to_string());
            continue;
        }

        if let Some(def) = definition_name(line) {
            current_def = Some(def);
        }
        for (name, unsafe_call) in call_hooks(line) {
            let cname = naming.apply_prefix(name);
            if !seen.insert(cname.clone()) {
                continue;
            }
            let rename = current_def
                .clone()
                .filter(|def| *def != naming.function_name(&cname));
            let short_cname = (cname != name).then(|| name.to_string());
            module.members.push(MemberInfo {
                cname,
                rename,
                short_cname,
                unsafe_call,
            });
        }
    }

    if !imports.is_empty() {
        module.imports = Some(imports);
    }
    tracing::debug!(
        members = module.members.len(),
        exports = module.exports.len(),
        "scanned existing module"
    );
    module
}
