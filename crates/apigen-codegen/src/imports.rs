//! Import block assembly.

use apigen_core::ImportsConfig;

/// Module named by an import line, for plain and hook-style imports.
///
/// ```
/// use apigen_codegen::imports::import_module_name;
///
/// assert_eq!(import_module_name("import Control.Monad\t(liftM)"), Some("Control.Monad"));
/// assert_eq!(import_module_name("{#import Graphics.UI.Gtk.Types#}"), Some("Graphics.UI.Gtk.Types"));
/// assert_eq!(import_module_name("-- comment"), None);
/// ```
pub fn import_module_name(line: &str) -> Option<&str> {
    let line = line.trim();
    let rest = line
        .strip_prefix("{#import")
        .or_else(|| line.strip_prefix("import"))?;
    rest.trim_end_matches("#}")
        .split_whitespace()
        .find(|word| *word != "qualified")
        .map(|word| word.trim_end_matches("#}"))
}

/// Build the import block.
///
/// Without existing imports the configured defaults are used. Otherwise the
/// well-known imports come first in configured order, followed by every
/// other import in its original order after a blank line.
pub fn assemble_imports(existing: Option<&[String]>, config: &ImportsConfig) -> String {
    let Some(lines) = existing else {
        return config.defaults.join("\n");
    };

    let mut well_known = Vec::new();
    for name in &config.well_known {
        well_known.extend(
            lines
                .iter()
                .filter(|line| import_module_name(line) == Some(name.as_str()))
                .map(String::as_str),
        );
    }
    let extra: Vec<&str> = lines
        .iter()
        .filter(|line| {
            !import_module_name(line).is_some_and(|m| config.well_known.iter().any(|w| w == m))
        })
        .map(String::as_str)
        .collect();

    match (well_known.is_empty(), extra.is_empty()) {
        (_, true) => well_known.join("\n"),
        (true, false) => extra.join("\n"),
        (false, false) => format!("{}\n\n{}", well_known.join("\n"), extra.join("\n")),
    }
}
