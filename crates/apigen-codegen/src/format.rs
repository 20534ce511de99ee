//! Documentation rendering.
//!
//! Turns structured doc paragraphs into wrapped comment text with inline
//! markup for cross-references, arguments and literals.

use crate::naming::{Naming, param_name};
use apigen_core::{DocPara, DocSpan, SymbolTable};

/// Characters with a markup meaning in documentation comments.
const SPECIAL: &[char] = &['\\', '/', '\'', '`', '"', '@', '<'];

/// Note appended to the text of values that may be null.
pub const NULL_NOTE: &str = "(can be @Nothing@)";

/// Escape markup characters in plain documentation text.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Join a type signature whose fragments carry trailing `-- ^` comments.
///
/// Every comment starts in the column after the longest fragment; comment
/// text wraps within `width`.
pub fn align_comments(fragments: &[(String, Option<String>)], width: usize) -> Vec<String> {
    let column = fragments
        .iter()
        .map(|(head, _)| head.len())
        .max()
        .unwrap_or(0)
        + 1;
    let comment_width = width.saturating_sub(column + 5).max(20);

    let mut lines = Vec::new();
    for (head, doc) in fragments {
        let doc_lines = doc
            .as_deref()
            .map(|d| wrap(d, comment_width))
            .unwrap_or_default();
        match doc_lines.split_first() {
            None => lines.push(head.clone()),
            Some((first, rest)) => {
                lines.push(format!("{head:<column$}-- ^ {first}"));
                for line in rest {
                    lines.push(format!("{:column$}--   {line}", ""));
                }
            }
        }
    }
    lines
}

/// Renders documentation in the context of one namespace.
pub struct DocFormatter<'a> {
    symbols: &'a SymbolTable,
    naming: &'a Naming,
    width: usize,
    product: &'a str,
}

impl<'a> DocFormatter<'a> {
    pub fn new(symbols: &'a SymbolTable, naming: &'a Naming, width: usize, product: &'a str) -> Self {
        Self {
            symbols,
            naming,
            width,
            product,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Inline text of a span sequence.
    pub fn spans(&self, spans: &[DocSpan]) -> String {
        let mut out = String::new();
        for span in spans {
            match span {
                DocSpan::Text(text) => out.push_str(&escape(text)),
                DocSpan::FuncRef(cname) => {
                    out.push_str(&format!("'{}'", self.naming.function_name(cname)));
                }
                DocSpan::TypeRef(cname) if self.symbols.get(cname).is_some() => {
                    out.push_str(&format!("'{}'", self.naming.type_name(cname)));
                }
                DocSpan::TypeRef(cname) => out.push_str(&format!("@{cname}@")),
                DocSpan::Arg(name) => out.push_str(&format!("@{}@", param_name(name))),
                DocSpan::Literal(text) if text == "NULL" => out.push_str("@Nothing@"),
                DocSpan::Literal(text) => out.push_str(&format!("@{}@", text.replace('@', "\\@"))),
                DocSpan::Emphasis(text) => out.push_str(&format!("/{}/", escape(text))),
            }
        }
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Inline text of a parameter or result description, with the null note
    /// appended when the value may be null.
    pub fn value_doc(&self, spans: &[DocSpan], nullable: bool) -> Option<String> {
        let text = self.spans(spans);
        match (text.is_empty(), nullable) {
            (true, false) => None,
            (true, true) => Some(NULL_NOTE.to_string()),
            (false, false) => Some(text),
            (false, true) => Some(format!("{text} {NULL_NOTE}")),
        }
    }

    /// Text lines of one paragraph, without comment markers.
    fn paragraph(&self, para: &DocPara, width: usize) -> Vec<String> {
        match para {
            DocPara::Text { spans } => wrap(&self.spans(spans), width),
            DocPara::Program { lines } => lines.iter().map(|l| format!("> {l}")).collect(),
            DocPara::ListItem { spans } => hang("* ", wrap(&self.spans(spans), width - 2)),
            DocPara::DefItem { term, spans } => {
                let text = format!("[{}] {}", self.spans(term), self.spans(spans));
                wrap(&text, width)
            }
        }
    }

    /// A declaration's documentation comment, ending with an empty comment
    /// line. Empty when there is nothing to say.
    pub fn declaration(&self, paras: &[DocPara], since: Option<&str>) -> Vec<String> {
        let width = self.width.saturating_sub(5).max(20);
        let mut body: Vec<String> = Vec::new();

        for (i, para) in paras.iter().enumerate() {
            if i > 0 {
                body.push(String::new());
            }
            body.extend(self.paragraph(para, width));
        }
        if let Some(version) = since.filter(|v| !v.is_empty()) {
            body.push(String::new());
            body.push(format!("* Available since {} version {version}", self.product));
        }
        if body.is_empty() {
            return body;
        }

        let mut lines: Vec<String> = body
            .iter()
            .enumerate()
            .map(|(i, text)| match (i, text.is_empty()) {
                (0, true) => "-- |".to_string(),
                (0, false) => format!("-- | {text}"),
                (_, true) => "--".to_string(),
                (_, false) => format!("-- {text}"),
            })
            .collect();
        lines.push("--".to_string());
        lines
    }
}

/// Prefix the first line with `marker` and indent the rest to match.
fn hang(marker: &str, lines: Vec<String>) -> Vec<String> {
    let indent = " ".repeat(marker.len());
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{marker}{line}")
            } else {
                format!("{indent}{line}")
            }
        })
        .collect()
}
