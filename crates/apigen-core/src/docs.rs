//! Structured documentation records
//!
//! Documentation arrives already parsed into paragraphs and spans. Function
//! and signal docs are keyed by C name; property docs use the documentation
//! source's dashed spelling, which the collators normalise.

use serde::{Deserialize, Serialize};

/// Name of the parameter doc entry describing the return value.
pub const RETURNS_DOC: &str = "Returns";

/// Documentation for one module (one object).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDoc {
    /// C name of the documented object, e.g. `GtkButton`.
    pub name: String,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Vec<DocPara>,

    #[serde(default)]
    pub functions: Vec<FuncDoc>,

    #[serde(default)]
    pub properties: Vec<PropDoc>,

    #[serde(default)]
    pub signals: Vec<SignalDoc>,

    #[serde(default)]
    pub since: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDoc {
    pub name: String,

    #[serde(default)]
    pub paragraphs: Vec<DocPara>,

    #[serde(default)]
    pub params: Vec<ParamDoc>,

    #[serde(default)]
    pub since: Option<String>,
}

impl FuncDoc {
    /// Documentation of a C parameter by its C name.
    pub fn param(&self, cname: &str) -> Option<&ParamDoc> {
        self.params.iter().find(|p| p.name == cname)
    }

    /// The "Returns" entry.
    pub fn returns(&self) -> Option<&ParamDoc> {
        self.param(RETURNS_DOC)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDoc {
    pub name: String,

    #[serde(default)]
    pub spans: Vec<DocSpan>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropDoc {
    pub name: String,

    #[serde(default)]
    pub paragraphs: Vec<DocPara>,

    #[serde(default)]
    pub since: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDoc {
    pub name: String,

    #[serde(default)]
    pub paragraphs: Vec<DocPara>,

    #[serde(default)]
    pub since: Option<String>,
}

/// A documentation paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocPara {
    Text { spans: Vec<DocSpan> },
    Program { lines: Vec<String> },
    ListItem { spans: Vec<DocSpan> },
    DefItem { term: Vec<DocSpan>, spans: Vec<DocSpan> },
}

/// An inline documentation span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DocSpan {
    Text(String),
    /// Reference to another function by C name.
    FuncRef(String),
    /// Reference to a type by C name.
    TypeRef(String),
    /// Reference to a parameter of the documented function.
    Arg(String),
    Literal(String),
    Emphasis(String),
}

impl DocSpan {
    pub fn text(s: impl Into<String>) -> Self {
        DocSpan::Text(s.into())
    }
}
