//! Module template rendering.
//!
//! A template is plain text with `{{placeholder}}` markers:
//!
//! | Placeholder | Replaced by |
//! |-------------|-------------|
//! | `{{module-name}}` | full module name |
//! | `{{description}}` | module documentation |
//! | `{{hierarchy}}` | class hierarchy block |
//! | `{{exports}}` | export list |
//! | `{{imports}}` | import block |
//! | `{{context-lib}}` | C library name |
//! | `{{context-prefix}}` | C function prefix |
//! | `{{body}}` | generated declarations |
//! | `{{todo}}` | list of functions that were not bound |

use crate::generate::GeneratedModule;

/// Template used when none is configured.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/module.chs.tmpl");

/// Placeholder values of one generated module.
pub struct TemplateContext<'a> {
    module: &'a GeneratedModule,
}

impl<'a> TemplateContext<'a> {
    pub fn new(module: &'a GeneratedModule) -> Self {
        Self { module }
    }

    /// Value of a placeholder name, `None` for unknown names.
    fn value(&self, name: &str) -> Option<&'a str> {
        let m = self.module;
        let value = match name {
            "module-name" => &m.module_name,
            "description" => &m.description,
            "hierarchy" => &m.hierarchy,
            "exports" => &m.exports,
            "imports" => &m.imports,
            "context-lib" => &m.context_lib,
            "context-prefix" => &m.context_prefix,
            "body" => &m.body,
            "todo" => &m.todo,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Substitute every placeholder in one pass over `template`. Inserted
    /// text is never scanned again; unknown placeholders stay as written.
    fn substitute(&self, template: &str) -> String {
        let mut text = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            text.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after
                .find("}}")
                .and_then(|end| self.value(&after[..end]).map(|value| (end, value)))
            {
                Some((end, value)) => {
                    text.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    text.push_str("{{");
                    rest = after;
                }
            }
        }
        text.push_str(rest);
        text
    }

    /// Apply placeholder substitutions to template content.
    ///
    /// Runs of blank lines left by empty parts collapse to one, and the
    /// result ends with a single newline.
    pub fn apply(&self, template: &str) -> String {
        let text = self.substitute(template);

        let mut out = String::with_capacity(text.len());
        let mut blank_run = 0;
        for line in text.lines() {
            if line.trim().is_empty() {
                blank_run += 1;
                if blank_run > 1 {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');
        out
    }
}
