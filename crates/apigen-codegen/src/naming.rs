//! Naming convention utilities for binding generation.
//!
//! Converts C spellings into target-language identifiers.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `snake_case` | [`to_camel_case`] | `camelCase` |
//! | `snake_case` | [`to_pascal_case`] | `PascalCase` |
//! | `word` | [`capitalize`] | `Word` |
//! | `HBoxSpacing` | [`lower_case_first_word`] | `hBoxSpacing` |
//! | `gtk_button_new` | [`Naming::function_name`] | `buttonNew` |
//! | `const-GtkWidget*` | [`Naming::type_name`] | `Widget` |

use apigen_core::MemberInfo;

/// Reserved words of the target language. Parameters with these names get a
/// trailing underscore.
const RESERVED: &[&str] = &[
    "case", "class", "data", "default", "deriving", "do", "else", "foreign", "if", "import", "in",
    "infix", "infixl", "infixr", "instance", "let", "module", "newtype", "of", "then", "type",
    "where",
];

/// Convert snake_case to camelCase.
///
/// # Examples
///
/// ```
/// use apigen_codegen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("button_set_label"), "buttonSetLabel");
/// assert_eq!(to_camel_case("already"), "already");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push_str(&c.to_uppercase().to_string());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert a string to PascalCase.
///
/// Handles snake_case, kebab-case, and already-capitalized input.
///
/// # Examples
///
/// ```
/// use apigen_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("size_allocate"), "SizeAllocate");
/// assert_eq!(to_pascal_case("focus-in-event"), "FocusInEvent");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_']).map(capitalize).collect()
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the leading word of a PascalCase identifier.
///
/// A leading run of capitals is treated as an acronym: all but its last
/// letter are lowercased when a lowercase letter follows.
///
/// # Examples
///
/// ```
/// use apigen_codegen::naming::lower_case_first_word;
///
/// assert_eq!(lower_case_first_word("ButtonLabel"), "buttonLabel");
/// assert_eq!(lower_case_first_word("HBoxSpacing"), "hBoxSpacing");
/// assert_eq!(lower_case_first_word("URLEntry"), "urlEntry");
/// ```
pub fn lower_case_first_word(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let run = chars.iter().take_while(|c| c.is_uppercase()).count();

    let lowered = match run {
        0 => return s.to_string(),
        n if n == chars.len() => n,
        1 => 1,
        n if chars[n].is_lowercase() => n - 1,
        n => n,
    };

    chars
        .iter()
        .enumerate()
        .flat_map(|(i, c)| {
            if i < lowered {
                c.to_lowercase().collect::<Vec<_>>()
            } else {
                vec![*c]
            }
        })
        .collect()
}

/// Append an underscore to names that collide with reserved words.
pub fn change_illegal_names(name: &str) -> String {
    if RESERVED.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Target name of a C parameter, e.g. `use_underline` becomes `useUnderline`.
pub fn param_name(cname: &str) -> String {
    change_illegal_names(&to_camel_case(cname))
}

/// The bare type name of a C type: qualifiers and pointer stars removed.
pub fn c_base_type(c_type: &str) -> &str {
    let trimmed = c_type.trim();
    let trimmed = trimmed.strip_prefix("const-").unwrap_or(trimmed);
    let trimmed = trimmed.strip_prefix("const ").unwrap_or(trimmed);
    trimmed.trim_end_matches(['*', ' '])
}

/// Number of pointer levels in a C type.
pub fn pointer_depth(c_type: &str) -> usize {
    c_type.chars().filter(|c| *c == '*').count()
}

/// Lookup key of a property: lowercase with separators removed, so
/// `use-underline`, `use_underline` and `UseUnderline` coincide.
pub fn property_key(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Documentation key of a property, in the dashed spelling.
pub fn property_doc_key(name: &str) -> String {
    name.replace('_', "-")
}

/// Documentation key of a signal, in the underscored spelling.
pub fn signal_doc_key(name: &str) -> String {
    name.replace('-', "_")
}

/// Names derived for one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    prefix: String,
    type_prefixes: Vec<String>,
}

impl Naming {
    /// `prefix` is the lowercase C function prefix, e.g. `gtk`.
    pub fn new(prefix: impl Into<String>, type_prefixes: &[String]) -> Self {
        Self {
            prefix: prefix.into(),
            type_prefixes: type_prefixes.to_vec(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Copy of this naming with another function prefix.
    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            type_prefixes: self.type_prefixes.clone(),
        }
    }

    /// The C name without the namespace prefix, if it carries one.
    pub fn strip_prefix<'a>(&self, cname: &'a str) -> Option<&'a str> {
        cname
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|rest| !rest.is_empty())
    }

    /// Restore the namespace prefix of a call name written without it.
    pub fn apply_prefix(&self, short: &str) -> String {
        if self.strip_prefix(short).is_some() {
            short.to_string()
        } else {
            format!("{}_{short}", self.prefix)
        }
    }

    /// Derived target name of a C function.
    pub fn function_name(&self, cname: &str) -> String {
        let stem = self.strip_prefix(cname).unwrap_or(cname);
        change_illegal_names(&to_camel_case(stem))
    }

    /// Target name of a bound function, honouring a rename recorded in an
    /// existing module.
    pub fn binding_name(&self, cname: &str, info: Option<&MemberInfo>) -> String {
        info.and_then(|i| i.rename.clone())
            .unwrap_or_else(|| self.function_name(cname))
    }

    /// Target name of a C type. A configured prefix is stripped only when an
    /// uppercase letter follows it.
    pub fn type_name(&self, c_type: &str) -> String {
        let base = c_base_type(c_type);
        for prefix in &self.type_prefixes {
            if let Some(rest) = base.strip_prefix(prefix.as_str())
                && rest.starts_with(|c: char| c.is_ascii_uppercase())
            {
                return rest.to_string();
            }
        }
        base.to_string()
    }

    /// Name of the attribute binding a property of an object.
    pub fn property_binding_name(&self, object_name: &str, property: &str) -> String {
        lower_case_first_word(&format!("{object_name}{}", to_pascal_case(property)))
    }
}

/// The `on`/`after` connection names of a signal.
pub fn signal_binding_names(signal_cname: &str) -> (String, String) {
    let pascal = to_pascal_case(signal_cname);
    (format!("on{pascal}"), format!("after{pascal}"))
}
