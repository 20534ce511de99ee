//! Module header parts: class hierarchy and description.

use crate::format::DocFormatter;
use crate::naming::Naming;
use apigen_core::{ModuleDoc, SymbolTable};

/// The class hierarchy of an object as a documentation block, root first.
/// Empty for non-object types.
///
/// ```text
/// -- |
/// -- @
/// -- |  'GObject'
/// -- |   +----'Widget'
/// -- |         +----'Button'
/// -- @
/// ```
pub fn hierarchy(symbols: &SymbolTable, naming: &Naming, cname: &str) -> String {
    let Some(chain) = symbols.ancestors(cname) else {
        return String::new();
    };

    let mut lines = vec!["-- |".to_string(), "-- @".to_string()];
    for (depth, ancestor) in chain.iter().rev().enumerate() {
        let name = naming.type_name(ancestor);
        let line = match depth {
            0 => format!("-- |  '{name}'"),
            n => format!("-- |  {:width$}+----'{name}'", "", width = 1 + 6 * (n - 1)),
        };
        lines.push(line);
    }
    lines.push("-- @".to_string());
    lines.join("\n")
}

/// The module description: summary line followed by the description
/// paragraphs.
pub fn description(formatter: &DocFormatter<'_>, doc: &ModuleDoc) -> String {
    let mut lines = Vec::new();
    if let Some(summary) = doc.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        lines.push(format!("-- {}", summary.trim()));
        lines.push("--".to_string());
    }
    lines.extend(formatter.declaration(&doc.description, doc.since.as_deref()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use apigen_core::{CSymbol, DocPara, DocSpan};

    fn naming() -> Naming {
        Naming::new("gtk", &["Gtk".to_string(), "G".to_string()])
    }

    #[test]
    fn hierarchy___indents_each_generation() {
        let symbols: SymbolTable = [(
            "GtkButton",
            CSymbol::ObjectType(vec!["GtkButton".into(), "GtkWidget".into(), "GObject".into()]),
        )]
        .into_iter()
        .collect();

        let text = hierarchy(&symbols, &naming(), "GtkButton");

        assert_eq!(
            text,
            [
                "-- |",
                "-- @",
                "-- |  'Object'",
                "-- |   +----'Widget'",
                "-- |         +----'Button'",
                "-- @",
            ]
            .join("\n")
        );
    }

    #[test]
    fn hierarchy___non_object_is_empty() {
        let symbols: SymbolTable = [("GtkBorder", CSymbol::BoxedType)].into_iter().collect();

        assert_eq!(hierarchy(&symbols, &naming(), "GtkBorder"), "");
    }

    #[test]
    fn description___summary_then_paragraphs() {
        let symbols = SymbolTable::default();
        let naming = naming();
        let formatter = DocFormatter::new(&symbols, &naming, 80, "Gtk+");
        let doc = ModuleDoc {
            name: "GtkButton".into(),
            summary: Some("A push button".into()),
            description: vec![DocPara::Text {
                spans: vec![DocSpan::text("Emits a signal when clicked.")],
            }],
            ..Default::default()
        };

        assert_eq!(
            description(&formatter, &doc),
            "-- A push button\n--\n-- | Emits a signal when clicked.\n--"
        );
    }
}
