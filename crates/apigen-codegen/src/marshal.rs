//! Marshaling of C types into target-language glue.
//!
//! A [`Marshal`] implementation decides, for one C type in one position, the
//! target type, the class constraint it needs, and the code that converts
//! values across the call.
//!
//! # Type Mappings ([`GtkMarshaler`])
//!
//! | C | Target | In | Result |
//! |---|--------|----|--------|
//! | `gboolean` | `Bool` | `fromBool` | `liftM toBool` |
//! | `gint`, `guint`, ... | `Int` | `fromIntegral` | `liftM fromIntegral` |
//! | `gfloat`, `gdouble` | `Float`, `Double` | `realToFrac` | `liftM realToFrac` |
//! | `const-gchar*` | `String` | `withUTFString` | `peekUTFString` |
//! | `gchar*` | `String` | `withUTFString` | `readUTFString` |
//! | enum | `T` | `fromEnum` | `toEnum` |
//! | flags | `[T]` | `fromFlags` | `toFlags` |
//! | object pointer | class-constrained | `toT` | `makeNewObject` / `makeNewGObject` |
//! | numeric pointer | output value | `alloca` + `peek` | |

use crate::naming::{Naming, c_base_type, pointer_depth};
use crate::nullability::Nullability;
use apigen_core::{CSymbol, EnumVariant, GenError, GenResult, SymbolTable, is_void};

/// Data flow of a parameter across the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
    InOut,
}

impl Direction {
    /// Whether the caller supplies a value.
    pub fn is_input(self) -> bool {
        matches!(self, Direction::In | Direction::InOut)
    }

    /// Whether the binding returns a value read back after the call.
    pub fn is_output(self) -> bool {
        matches!(self, Direction::Out | Direction::InOut)
    }
}

/// Code around a C call for one parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glue {
    /// Line opening a scope around the call, e.g. `withUTFString label $ \labelPtr ->`.
    pub wrapper: Option<String>,
    /// Expression passed to the C function.
    pub argument: String,
    /// Statement reading an output back after the call.
    pub read_back: Option<String>,
    /// Expression yielding the output value.
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamMarshal {
    /// Class constraint on a type variable, e.g. `WidgetClass child`.
    pub constraint: Option<String>,
    pub direction: Direction,
    pub hs_type: String,
    pub glue: Glue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMarshal {
    pub hs_type: String,
    /// Line placed in front of the call, e.g. `liftM toBool $`.
    pub wrapper: Option<String>,
    /// Line placed after the call arguments, e.g. `>>= peekUTFString`.
    pub post_call: Option<String>,
}

impl ResultMarshal {
    pub fn unit() -> Self {
        Self {
            hs_type: "()".to_string(),
            wrapper: None,
            post_call: None,
        }
    }

    fn wrapped(hs_type: impl Into<String>, wrapper: impl Into<String>) -> Self {
        Self {
            hs_type: hs_type.into(),
            wrapper: Some(wrapper.into()),
            post_call: None,
        }
    }

    fn plain(hs_type: impl Into<String>) -> Self {
        Self {
            hs_type: hs_type.into(),
            wrapper: None,
            post_call: None,
        }
    }

    pub fn is_unit(&self) -> bool {
        self.hs_type == "()"
    }
}

/// A signal handler argument or result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalMarshal {
    /// Marshaler category used in the connect function name, e.g. `INT`.
    pub category: String,
    pub hs_type: String,
}

/// The value type of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMarshal {
    /// Suffix of the generic property accessors, e.g. `Int` in `objectGetPropertyInt`.
    pub value_kind: String,
    pub hs_type: String,
}

/// Classifies C types for one target language.
///
/// Every method fails with [`GenError::UnsupportedType`] for a type it
/// cannot express. That failure is terminal for the object being generated.
pub trait Marshal {
    /// `name` is the target parameter name; `function` the C function.
    fn param(
        &self,
        symbols: &SymbolTable,
        function: &str,
        name: &str,
        c_type: &str,
    ) -> GenResult<ParamMarshal>;

    fn result(
        &self,
        symbols: &SymbolTable,
        function: &str,
        is_constructor: bool,
        c_type: &str,
    ) -> GenResult<ResultMarshal>;

    /// `owner` is the signal's C name, used in errors.
    fn signal_type(&self, symbols: &SymbolTable, owner: &str, c_type: &str)
    -> GenResult<SignalMarshal>;

    /// `owner` is the property's C name, used in errors.
    fn property_type(
        &self,
        symbols: &SymbolTable,
        owner: &str,
        c_type: &str,
    ) -> GenResult<PropertyMarshal>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Bool,
    Integral,
    Fractional,
}

impl Conversion {
    fn to_c(self) -> &'static str {
        match self {
            Conversion::Bool => "fromBool",
            Conversion::Integral => "fromIntegral",
            Conversion::Fractional => "realToFrac",
        }
    }

    fn from_c(self) -> &'static str {
        match self {
            Conversion::Bool => "toBool",
            Conversion::Integral => "fromIntegral",
            Conversion::Fractional => "realToFrac",
        }
    }
}

struct Primitive {
    c_types: &'static [&'static str],
    hs_type: &'static str,
    conversion: Conversion,
    category: &'static str,
    value_kind: &'static str,
}

const PRIMITIVES: &[Primitive] = &[
    Primitive {
        c_types: &["gboolean"],
        hs_type: "Bool",
        conversion: Conversion::Bool,
        category: "BOOL",
        value_kind: "Bool",
    },
    Primitive {
        c_types: &["gint", "gint8", "gint16", "gint32", "gshort", "int"],
        hs_type: "Int",
        conversion: Conversion::Integral,
        category: "INT",
        value_kind: "Int",
    },
    Primitive {
        c_types: &["guint", "guint8", "guint16", "guint32", "gushort", "guchar"],
        hs_type: "Int",
        conversion: Conversion::Integral,
        category: "UINT",
        value_kind: "UInt",
    },
    Primitive {
        c_types: &["glong", "gssize"],
        hs_type: "Int",
        conversion: Conversion::Integral,
        category: "LONG",
        value_kind: "Long",
    },
    Primitive {
        c_types: &["gulong", "gsize"],
        hs_type: "Int",
        conversion: Conversion::Integral,
        category: "ULONG",
        value_kind: "ULong",
    },
    Primitive {
        c_types: &["gint64", "guint64"],
        hs_type: "Int64",
        conversion: Conversion::Integral,
        category: "INT64",
        value_kind: "Int64",
    },
    Primitive {
        c_types: &["gfloat", "float"],
        hs_type: "Float",
        conversion: Conversion::Fractional,
        category: "FLOAT",
        value_kind: "Float",
    },
    Primitive {
        c_types: &["gdouble", "double"],
        hs_type: "Double",
        conversion: Conversion::Fractional,
        category: "DOUBLE",
        value_kind: "Double",
    },
];

/// Classification of a C type, independent of pointer depth.
#[derive(Clone, Copy)]
enum Kind {
    Primitive(&'static Primitive),
    Char,
    Opaque,
    Enum(EnumVariant),
    Object,
    Record,
    Alias,
    Callback,
    Unknown,
}

fn classify(symbols: &SymbolTable, base: &str) -> Kind {
    if let Some(primitive) = PRIMITIVES.iter().find(|p| p.c_types.contains(&base)) {
        return Kind::Primitive(primitive);
    }
    match base {
        "gchar" | "char" => return Kind::Char,
        "gpointer" | "gconstpointer" | "void" => return Kind::Opaque,
        _ => {}
    }
    match symbols.get(base) {
        Some(CSymbol::EnumType(variant)) => Kind::Enum(*variant),
        Some(CSymbol::ObjectType(_)) => Kind::Object,
        Some(CSymbol::StructType | CSymbol::BoxedType | CSymbol::ClassType) => Kind::Record,
        Some(CSymbol::TypeAlias) => Kind::Alias,
        Some(CSymbol::CallbackType) => Kind::Callback,
        Some(CSymbol::EnumValue) | None => Kind::Unknown,
    }
}

/// Pointer depth that makes a type an opaque pointer (`gpointer` or `void*`).
fn opaque_depth(base: &str) -> usize {
    if base == "void" { 1 } else { 0 }
}

/// Marshaler for Gtk-style C APIs.
pub struct GtkMarshaler<'a> {
    naming: &'a Naming,
    nullability: &'a dyn Nullability,
    floating_root: &'a str,
}

impl<'a> GtkMarshaler<'a> {
    pub fn new(naming: &'a Naming, nullability: &'a dyn Nullability, floating_root: &'a str) -> Self {
        Self {
            naming,
            nullability,
            floating_root,
        }
    }

    fn enum_type(&self, base: &str, variant: EnumVariant) -> String {
        let name = self.naming.type_name(base);
        match variant {
            EnumVariant::Plain => name,
            EnumVariant::Flags => format!("[{name}]"),
        }
    }

    /// Output parameter: storage allocated by the binding and read back.
    fn output_param(&self, name: &str, hs_type: String, read: &str) -> ParamMarshal {
        let ptr = format!("{name}Ptr");
        ParamMarshal {
            constraint: None,
            direction: Direction::Out,
            hs_type,
            glue: Glue {
                wrapper: Some(format!("alloca $ \\{ptr} ->")),
                argument: ptr.clone(),
                read_back: Some(format!("{name} <- peek {ptr}")),
                output: Some(format!("{read} {name}")),
            },
        }
    }

    fn input_param(hs_type: impl Into<String>, argument: String) -> ParamMarshal {
        ParamMarshal {
            constraint: None,
            direction: Direction::In,
            hs_type: hs_type.into(),
            glue: Glue {
                argument,
                ..Default::default()
            },
        }
    }
}

impl Marshal for GtkMarshaler<'_> {
    fn param(
        &self,
        symbols: &SymbolTable,
        function: &str,
        name: &str,
        c_type: &str,
    ) -> GenResult<ParamMarshal> {
        let base = c_base_type(c_type);
        let depth = pointer_depth(c_type);
        let nullable = self.nullability.param_accepts_null(function, name);

        let marshal = match (classify(symbols, base), depth) {
            (Kind::Primitive(p), 0) => Self::input_param(
                p.hs_type,
                format!("({} {name})", p.conversion.to_c()),
            ),
            (Kind::Primitive(p), 1) => {
                self.output_param(name, p.hs_type.to_string(), p.conversion.from_c())
            }
            (Kind::Char, 1) => {
                let ptr = format!("{name}Ptr");
                let (hs_type, wrapper) = if nullable {
                    (
                        "Maybe String",
                        format!("maybeWith withUTFString {name} $ \\{ptr} ->"),
                    )
                } else {
                    ("String", format!("withUTFString {name} $ \\{ptr} ->"))
                };
                ParamMarshal {
                    constraint: None,
                    direction: Direction::In,
                    hs_type: hs_type.to_string(),
                    glue: Glue {
                        wrapper: Some(wrapper),
                        argument: ptr,
                        ..Default::default()
                    },
                }
            }
            (Kind::Opaque, d) if d == opaque_depth(base) => {
                Self::input_param("Ptr ()", format!("(castPtr {name})"))
            }
            (Kind::Enum(variant), 0) => {
                let convert = match variant {
                    EnumVariant::Plain => "fromIntegral . fromEnum",
                    EnumVariant::Flags => "fromIntegral . fromFlags",
                };
                Self::input_param(self.enum_type(base, variant), format!("(({convert}) {name})"))
            }
            (Kind::Enum(EnumVariant::Plain), 1) => {
                self.output_param(name, self.naming.type_name(base), "(toEnum . fromIntegral)")
            }
            (Kind::Object, 1) => {
                let hs = self.naming.type_name(base);
                let (hs_type, argument) = if nullable {
                    (
                        format!("Maybe {name}"),
                        format!("(maybe ({hs} nullForeignPtr) to{hs} {name})"),
                    )
                } else {
                    (name.to_string(), format!("(to{hs} {name})"))
                };
                ParamMarshal {
                    constraint: Some(format!("{hs}Class {name}")),
                    direction: Direction::In,
                    hs_type,
                    glue: Glue {
                        argument,
                        ..Default::default()
                    },
                }
            }
            (Kind::Record, 1) => {
                let hs = self.naming.type_name(base);
                if nullable {
                    Self::input_param(
                        format!("Maybe {hs}"),
                        format!("(fromMaybe ({hs} nullForeignPtr) {name})"),
                    )
                } else {
                    Self::input_param(hs, name.to_string())
                }
            }
            (Kind::Alias | Kind::Callback, 0) => {
                Self::input_param(self.naming.type_name(base), name.to_string())
            }
            _ => return Err(GenError::unsupported(function, c_type)),
        };
        Ok(marshal)
    }

    fn result(
        &self,
        symbols: &SymbolTable,
        function: &str,
        is_constructor: bool,
        c_type: &str,
    ) -> GenResult<ResultMarshal> {
        if is_void(c_type) {
            return Ok(ResultMarshal::unit());
        }
        let base = c_base_type(c_type);
        let depth = pointer_depth(c_type);
        let nullable = self.nullability.result_may_be_null(function);

        let marshal = match (classify(symbols, base), depth) {
            (Kind::Primitive(p), 0) => {
                ResultMarshal::wrapped(p.hs_type, format!("liftM {} $", p.conversion.from_c()))
            }
            (Kind::Char, 1) => {
                let read = if c_type.trim_start().starts_with("const") {
                    "peekUTFString"
                } else {
                    "readUTFString"
                };
                let (hs_type, post_call) = if nullable {
                    ("Maybe String", format!(">>= maybePeek {read}"))
                } else {
                    ("String", format!(">>= {read}"))
                };
                ResultMarshal {
                    hs_type: hs_type.to_string(),
                    wrapper: None,
                    post_call: Some(post_call),
                }
            }
            (Kind::Opaque, d) if d == opaque_depth(base) => {
                ResultMarshal::wrapped("Ptr ()", "liftM castPtr $")
            }
            (Kind::Enum(EnumVariant::Plain), 0) => ResultMarshal::wrapped(
                self.naming.type_name(base),
                "liftM (toEnum . fromIntegral) $",
            ),
            (Kind::Enum(EnumVariant::Flags), 0) => ResultMarshal::wrapped(
                self.enum_type(base, EnumVariant::Flags),
                "liftM (toFlags . fromIntegral) $",
            ),
            (Kind::Object, 1) => {
                let hs = self.naming.type_name(base);
                let floating = symbols.derives_from(base, self.floating_root);
                let helper = match (floating, is_constructor) {
                    (true, _) => "makeNewObject",
                    (false, true) => "constructNewGObject",
                    (false, false) => "makeNewGObject",
                };
                if nullable {
                    ResultMarshal::wrapped(
                        format!("Maybe {hs}"),
                        format!("maybeNull ({helper} mk{hs}) $"),
                    )
                } else {
                    ResultMarshal::wrapped(hs.clone(), format!("{helper} mk{hs} $"))
                }
            }
            (Kind::Record, 1) | (Kind::Alias, 0) => {
                ResultMarshal::plain(self.naming.type_name(base))
            }
            _ => return Err(GenError::unsupported(function, c_type)),
        };
        Ok(marshal)
    }

    fn signal_type(
        &self,
        symbols: &SymbolTable,
        owner: &str,
        c_type: &str,
    ) -> GenResult<SignalMarshal> {
        if is_void(c_type) {
            return Ok(SignalMarshal {
                category: "NONE".to_string(),
                hs_type: "()".to_string(),
            });
        }
        let base = c_base_type(c_type);
        let depth = pointer_depth(c_type);

        let (category, hs_type) = match (classify(symbols, base), depth) {
            (Kind::Primitive(p), 0) => (p.category, p.hs_type.to_string()),
            (Kind::Char, 1) => ("STRING", "String".to_string()),
            (Kind::Opaque, d) if d == opaque_depth(base) => ("POINTER", "Ptr ()".to_string()),
            (Kind::Enum(EnumVariant::Plain), 0) => ("ENUM", self.naming.type_name(base)),
            (Kind::Enum(EnumVariant::Flags), 0) => {
                ("FLAGS", self.enum_type(base, EnumVariant::Flags))
            }
            (Kind::Object, 1) => ("OBJECT", self.naming.type_name(base)),
            (Kind::Record, 1) => ("BOXED", self.naming.type_name(base)),
            (Kind::Alias, 0) => ("POINTER", self.naming.type_name(base)),
            _ => return Err(GenError::unsupported(owner, c_type)),
        };
        Ok(SignalMarshal {
            category: category.to_string(),
            hs_type,
        })
    }

    fn property_type(
        &self,
        symbols: &SymbolTable,
        owner: &str,
        c_type: &str,
    ) -> GenResult<PropertyMarshal> {
        let base = c_base_type(c_type);
        let depth = pointer_depth(c_type);

        let (value_kind, hs_type) = match (classify(symbols, base), depth) {
            (Kind::Primitive(p), 0) => (p.value_kind, p.hs_type.to_string()),
            (Kind::Char, 1) => ("String", "String".to_string()),
            (Kind::Opaque, d) if d == opaque_depth(base) => ("Pointer", "Ptr ()".to_string()),
            (Kind::Enum(EnumVariant::Plain), 0) => ("Enum", self.naming.type_name(base)),
            (Kind::Enum(EnumVariant::Flags), 0) => {
                ("Flags", self.enum_type(base, EnumVariant::Flags))
            }
            (Kind::Object, 1) => ("GObject", self.naming.type_name(base)),
            (Kind::Record, 1) => ("Boxed", self.naming.type_name(base)),
            _ => return Err(GenError::unsupported(owner, c_type)),
        };
        Ok(PropertyMarshal {
            value_kind: value_kind.to_string(),
            hs_type,
        })
    }
}

#[cfg(test)]
#[path = "marshal/marshal_tests.rs"]
mod marshal_tests;
