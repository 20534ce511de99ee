//! API model types
//!
//! A language-agnostic view of the C API being wrapped. Records are read once
//! at the start of a run and never mutated; the only derived records are the
//! methods produced by [`Constructor::to_method`] and [`Method::with_self`].

use serde::{Deserialize, Serialize};

/// The C spelling of "no value" in return types.
const VOID: &str = "void";

/// Whether a C type string denotes the unit/void type.
pub fn is_void(c_type: &str) -> bool {
    c_type.trim() == VOID
}

fn default_return_type() -> String {
    VOID.to_string()
}

fn default_true() -> bool {
    true
}

/// A named collection of declarations sharing a C prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Logical name, e.g. `Gtk`.
    pub name: String,

    /// Shared library the symbols live in, e.g. `gtk`.
    pub library: String,

    #[serde(default)]
    pub objects: Vec<Object>,

    #[serde(default)]
    pub enums: Vec<Enum>,

    #[serde(default)]
    pub misc: Vec<Misc>,
}

impl Namespace {
    /// The lowercase prefix of C function names, e.g. `gtk` for `gtk_button_new`.
    pub fn c_prefix(&self) -> String {
        self.name.to_lowercase()
    }

    /// Find an object by its C type name.
    pub fn object(&self, cname: &str) -> Option<&Object> {
        self.objects.iter().find(|o| o.cname == cname)
    }
}

/// An object, interface or struct-like type with members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    pub cname: String,

    #[serde(default)]
    pub parent: Option<String>,

    /// C names of implemented interfaces.
    #[serde(default)]
    pub implements: Vec<String>,

    #[serde(default)]
    pub constructors: Vec<Constructor>,

    #[serde(default)]
    pub methods: Vec<Method>,

    #[serde(default)]
    pub properties: Vec<Property>,

    #[serde(default)]
    pub signals: Vec<Signal>,

    #[serde(default)]
    pub deprecated: bool,
}

impl Object {
    /// The C type of a pointer to an instance, e.g. `GtkButton*`.
    pub fn pointer_type(&self) -> String {
        format!("{}*", self.cname)
    }
}

/// An enumeration or flags type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    pub cname: String,

    #[serde(default)]
    pub variant: EnumVariant,

    #[serde(default)]
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumVariant {
    #[default]
    Plain,
    Flags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub cname: String,

    #[serde(default)]
    pub value: Option<String>,
}

/// A declaration that is neither an object nor an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misc {
    pub name: String,
    pub cname: String,
    pub kind: MiscKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MiscKind {
    Struct,
    Boxed,
    Class,
    Alias,
    Callback,
}

/// A C parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub c_type: String,

    pub name: String,

    /// The `...` marker of a varargs function.
    #[serde(default)]
    pub variadic: bool,
}

impl Parameter {
    pub fn new(c_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            c_type: c_type.into(),
            name: name.into(),
            variadic: false,
        }
    }
}

/// A method, static function, or (after conversion) constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub cname: String,

    #[serde(default = "default_return_type")]
    pub return_type: String,

    /// Explicit parameters. The implicit instance parameter is not listed.
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// Static functions take no instance parameter.
    #[serde(default)]
    pub shared: bool,

    #[serde(default)]
    pub deprecated: bool,
}

impl Method {
    /// Whether any parameter is the varargs marker.
    pub fn is_variadic(&self) -> bool {
        self.parameters.iter().any(|p| p.variadic)
    }

    /// Copy of this method with the implicit `self` parameter spliced in
    /// front, unless the method is shared.
    pub fn with_self(&self, object: &Object) -> Method {
        let mut method = self.clone();
        if !self.shared {
            method
                .parameters
                .insert(0, Parameter::new(object.pointer_type(), "self"));
        }
        method
    }
}

/// A constructor. Converted to a [`Method`] before generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    #[serde(default)]
    pub name: String,

    pub cname: String,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub deprecated: bool,
}

impl Constructor {
    pub fn is_variadic(&self) -> bool {
        self.parameters.iter().any(|p| p.variadic)
    }

    /// Convert to a method returning a pointer to the object.
    ///
    /// Constructors never receive an implicit `self` parameter, so the
    /// result is marked shared.
    pub fn to_method(&self, object: &Object) -> Method {
        Method {
            name: self.name.clone(),
            cname: self.cname.clone(),
            return_type: object.pointer_type(),
            parameters: self.parameters.clone(),
            shared: true,
            deprecated: self.deprecated,
        }
    }
}

/// A property declared in the API model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub cname: String,

    #[serde(rename = "type")]
    pub c_type: String,

    #[serde(default = "default_true")]
    pub readable: bool,

    #[serde(default = "default_true")]
    pub writable: bool,
}

/// A signal. The first parameter is conventionally the emitting object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    pub cname: String,

    #[serde(default = "default_return_type")]
    pub return_type: String,

    #[serde(default)]
    pub parameters: Vec<Parameter>,
}
