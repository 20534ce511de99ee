//! Attribute generation for properties.

use crate::collate::{CollatedProperty, PropertySource};
use crate::format::DocFormatter;
use crate::marshal::Marshal;
use crate::naming::Naming;
use apigen_core::{
    DocPara, DocSpan, ExistingModule, GenError, GenResult, MemberInfo, Method, Object, SymbolTable,
    is_void,
};
use std::collections::HashMap;

/// A getter and setter over the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessorPair<'a> {
    pub getter: &'a Method,
    pub setter: &'a Method,
}

/// Find `GetX`/`SetX` method pairs, keyed by `X`, in getter order.
///
/// The getter takes no explicit parameter and returns a value; the setter
/// takes exactly one and returns nothing. Shared functions never pair.
pub fn find_accessor_pairs<'a>(
    methods: impl IntoIterator<Item = &'a Method>,
) -> Vec<(String, AccessorPair<'a>)> {
    let methods: Vec<&'a Method> = methods.into_iter().filter(|m| !m.shared).collect();

    let setters: HashMap<&str, &'a Method> = methods
        .iter()
        .copied()
        .filter(|m| m.parameters.len() == 1 && is_void(&m.return_type))
        .filter_map(|m| {
            m.name
                .strip_prefix("Set")
                .filter(|suffix| !suffix.is_empty())
                .map(|suffix| (suffix, m))
        })
        .collect();

    methods
        .iter()
        .copied()
        .filter(|m| m.parameters.is_empty() && !is_void(&m.return_type))
        .filter_map(|getter| {
            let suffix = getter.name.strip_prefix("Get")?;
            let setter = *setters.get(suffix)?;
            Some((suffix.to_string(), AccessorPair { getter, setter }))
        })
        .collect()
}

/// Generates attribute declarations for the properties of one object.
pub struct PropertyGenerator<'a> {
    symbols: &'a SymbolTable,
    marshal: &'a dyn Marshal,
    formatter: &'a DocFormatter<'a>,
    naming: &'a Naming,
    existing: Option<&'a ExistingModule>,
}

impl<'a> PropertyGenerator<'a> {
    pub fn new(
        symbols: &'a SymbolTable,
        marshal: &'a dyn Marshal,
        formatter: &'a DocFormatter<'a>,
        naming: &'a Naming,
        existing: Option<&'a ExistingModule>,
    ) -> Self {
        Self {
            symbols,
            marshal,
            formatter,
            naming,
            existing,
        }
    }

    fn member_info(&self, cname: &str) -> Option<&'a MemberInfo> {
        self.existing
            .and_then(|module| module.members.iter().find(|m| m.cname == cname))
    }

    fn accessor_name(&self, method: &Method) -> String {
        self.naming
            .binding_name(&method.cname, self.member_info(&method.cname))
    }

    /// Exported name of a property's attribute.
    pub fn binding_name(&self, object: &Object, entry: &CollatedProperty<'_>) -> String {
        self.naming
            .property_binding_name(&object.name, entry.source.name())
    }

    pub fn generate(&self, object: &Object, entry: &CollatedProperty<'_>) -> GenResult<String> {
        let name = self.binding_name(object, entry);
        let object_type = self.naming.type_name(&object.cname);
        let (context, self_type) = if self.symbols.is_object(&object.cname) {
            (format!("{object_type}Class self => "), "self".to_string())
        } else {
            (String::new(), object_type)
        };

        let (readable, writable, value_type, getter, setter) = match &entry.source {
            PropertySource::Declared(property) => {
                let marshal =
                    self.marshal
                        .property_type(self.symbols, &property.cname, &property.c_type)?;
                (
                    property.readable,
                    property.writable,
                    marshal.hs_type,
                    format!("(objectGetProperty{} \"{}\")", marshal.value_kind, property.cname),
                    format!("(objectSetProperty{} \"{}\")", marshal.value_kind, property.cname),
                )
            }
            PropertySource::DeclaredWithAccessors { accessors, .. }
            | PropertySource::Synthesized { accessors, .. } => {
                let result = self.marshal.result(
                    self.symbols,
                    &accessors.getter.cname,
                    false,
                    &accessors.getter.return_type,
                )?;
                (
                    true,
                    true,
                    result.hs_type,
                    self.accessor_name(accessors.getter),
                    self.accessor_name(accessors.setter),
                )
            }
        };

        let (attr, constructor, accessors) = match (readable, writable) {
            (true, true) => ("Attr", "newAttr", vec![getter, setter]),
            (true, false) => ("ReadAttr", "readAttr", vec![getter]),
            (false, true) => ("WriteAttr", "writeAttr", vec![setter]),
            (false, false) => {
                return Err(GenError::Malformed {
                    name: format!("{}:{}", object.cname, entry.source.name()),
                    reason: "property is neither readable nor writable".into(),
                });
            }
        };

        let mut lines = self.doc_lines(entry);
        lines.push(format!(
            "{name} :: {context}{attr} {self_type} {}",
            parenthesize(&value_type)
        ));
        lines.push(format!("{name} = {constructor}"));
        lines.extend(accessors.into_iter().map(|a| format!("  {a}")));
        Ok(lines.join("\n"))
    }

    fn doc_lines(&self, entry: &CollatedProperty<'_>) -> Vec<String> {
        if let PropertySource::Synthesized { accessors, .. } = &entry.source {
            let para = DocPara::Text {
                spans: vec![
                    DocSpan::text("Reads the value with "),
                    DocSpan::FuncRef(accessors.getter.cname.clone()),
                    DocSpan::text(" and writes it with "),
                    DocSpan::FuncRef(accessors.setter.cname.clone()),
                    DocSpan::text("."),
                ],
            };
            return self.formatter.declaration(&[para], None);
        }
        match entry.doc {
            Some(doc) => self
                .formatter
                .declaration(&doc.paragraphs, doc.since.as_deref()),
            None => Vec::new(),
        }
    }
}

/// Wrap a type in parentheses when it is an application of several words.
pub fn parenthesize(hs_type: &str) -> String {
    if hs_type.contains(' ') && !hs_type.starts_with(['(', '[']) {
        format!("({hs_type})")
    } else {
        hs_type.to_string()
    }
}
