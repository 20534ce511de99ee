//! Assembly of generated entries into module sections.
//!
//! Adjacent entries with the same availability version and deprecation
//! status share one conditional-compilation block.

/// A generated declaration or export line with its availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub text: String,
    /// Version the entry first became available in.
    pub since: Option<String>,
    pub deprecated: bool,
}

impl Entry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            since: None,
            deprecated: false,
        }
    }

    /// Empty versions count as absent.
    pub fn since(mut self, since: Option<&str>) -> Self {
        self.since = since.filter(|v| !v.trim().is_empty()).map(String::from);
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }
}

/// A titled group of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub entries: Vec<Entry>,
}

impl Section {
    pub fn new(title: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            title: title.into(),
            entries,
        }
    }
}

/// A run of adjacent entries sharing availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub since: Option<&'a str>,
    pub deprecated: bool,
    pub entries: Vec<&'a Entry>,
}

/// Split entries into maximal runs of equal `(since, deprecated)`.
pub fn group_adjacent(entries: &[Entry]) -> Vec<Group<'_>> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    for entry in entries {
        match groups.last_mut() {
            Some(group)
                if group.since == entry.since.as_deref() && group.deprecated == entry.deprecated =>
            {
                group.entries.push(entry);
            }
            _ => groups.push(Group {
                since: entry.since.as_deref(),
                deprecated: entry.deprecated,
                entries: vec![entry],
            }),
        }
    }
    groups
}

/// Conditional-compilation wrapping of grouped entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guards<'a> {
    pub version_macro: &'a str,
    pub deprecation_macro: &'a str,
}

impl Guards<'_> {
    /// Version condition of a dotted version, padded to three components.
    pub fn version_condition(&self, since: &str) -> String {
        let mut parts: Vec<&str> = since
            .split('.')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .take(3)
            .collect();
        while parts.len() < 3 {
            parts.push("0");
        }
        format!("#if {}({})", self.version_macro, parts.join(","))
    }

    /// Wrap `text` in the guards its availability needs. The deprecation
    /// guard sits inside the version guard.
    pub fn wrap(&self, since: Option<&str>, deprecated: bool, text: &str) -> String {
        let mut out = text.to_string();
        if deprecated {
            out = format!("#ifndef {}\n{out}\n#endif", self.deprecation_macro);
        }
        if let Some(version) = since {
            out = format!("{}\n{out}\n#endif", self.version_condition(version));
        }
        out
    }

    fn render(&self, entries: &[Entry], separator: &str) -> String {
        group_adjacent(entries)
            .iter()
            .map(|group| {
                let text = group
                    .entries
                    .iter()
                    .map(|e| e.text.as_str())
                    .collect::<Vec<_>>()
                    .join(separator);
                self.wrap(group.since, group.deprecated, &text)
            })
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Horizontal rule above each body section title.
pub const SECTION_RULE: &str = "--------------------";

/// The module body: every non-empty section under a ruled title, entries
/// separated by blank lines.
pub fn assemble_body(sections: &[Section], guards: &Guards<'_>) -> String {
    sections
        .iter()
        .filter(|s| !s.entries.is_empty())
        .map(|s| {
            format!(
                "{SECTION_RULE}\n-- {}\n\n{}",
                s.title,
                guards.render(&s.entries, "\n\n")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The export list: every non-empty section under a `-- *` title, one entry
/// per line.
pub fn assemble_exports(sections: &[Section], guards: &Guards<'_>) -> String {
    sections
        .iter()
        .filter(|s| !s.entries.is_empty())
        .map(|s| format!("-- * {}\n{}", s.title, guards.render(&s.entries, "\n")))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// An export-list line for `name`.
pub fn export_line(name: &str) -> String {
    format!("  {name},")
}
