//! Member selection and ordering.
//!
//! Each collator pairs API members with their documentation and with the
//! hints of an existing module, drops members that are not bound, and orders
//! the rest. Ordering keys are `(override position, doc position)` in
//! [`OrderMode::PreserveExisting`] and the reverse in
//! [`OrderMode::Documentation`]. Absent positions sort after every present
//! one, and sorting is stable so ties keep declaration order.

use crate::naming::{Naming, property_doc_key, property_key, signal_binding_names, signal_doc_key};
use crate::property::{AccessorPair, find_accessor_pairs};
use apigen_core::{
    ExistingModule, FuncDoc, MemberInfo, Method, Object, PropDoc, Property, Signal, SignalDoc,
};
use std::collections::HashMap;

/// Which position source dominates the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
    /// Existing module body order first, then documentation order.
    PreserveExisting,
    /// Documentation order first, then existing export order.
    Documentation,
}

/// A member with its matched documentation and existing-module hints.
#[derive(Debug, Clone, PartialEq)]
pub struct Collated<'a, M, D> {
    pub member: M,
    pub doc: Option<&'a D>,
    pub info: Option<&'a MemberInfo>,
}

/// Collated functions plus the C names of functions that were not bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Collation<'a, M, D> {
    pub entries: Vec<Collated<'a, M, D>>,
    pub not_bound: Vec<String>,
}

/// Where an emitted property comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertySource<'a> {
    /// Declared in the API model, bound through the generic accessors.
    Declared(&'a Property),
    /// Declared, with a getter/setter pair to bind through.
    DeclaredWithAccessors {
        property: &'a Property,
        accessors: AccessorPair<'a>,
    },
    /// Only a getter/setter pair exists.
    Synthesized {
        name: String,
        accessors: AccessorPair<'a>,
    },
}

impl PropertySource<'_> {
    /// Logical property name, e.g. `Width`.
    pub fn name(&self) -> &str {
        match self {
            PropertySource::Declared(property)
            | PropertySource::DeclaredWithAccessors { property, .. } => &property.name,
            PropertySource::Synthesized { name, .. } => name,
        }
    }

    pub fn accessors(&self) -> Option<&AccessorPair<'_>> {
        match self {
            PropertySource::Declared(_) => None,
            PropertySource::DeclaredWithAccessors { accessors, .. }
            | PropertySource::Synthesized { accessors, .. } => Some(accessors),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollatedProperty<'a> {
    pub source: PropertySource<'a>,
    pub doc: Option<&'a PropDoc>,
}

/// First-occurrence positions of keyed items.
struct Positions<'a, T> {
    map: HashMap<String, (usize, &'a T)>,
    absent: usize,
}

impl<'a, T> Positions<'a, T> {
    fn new(items: &'a [T], key: impl Fn(&T) -> String) -> Self {
        let mut map = HashMap::new();
        for (index, item) in items.iter().enumerate() {
            map.entry(key(item)).or_insert((index, item));
        }
        Self {
            map,
            absent: items.len() + 1,
        }
    }

    fn get(&self, key: &str) -> Option<&'a T> {
        self.map.get(key).map(|(_, item)| *item)
    }

    fn index(&self, key: &str) -> usize {
        self.map.get(key).map_or(self.absent, |(index, _)| *index)
    }
}

/// Positions and hints taken from an optional existing module.
struct Existing<'a> {
    members: Positions<'a, MemberInfo>,
    exports: Positions<'a, String>,
}

impl<'a> Existing<'a> {
    fn new(existing: Option<&'a ExistingModule>) -> Self {
        let (members, exports): (&[MemberInfo], &[String]) = match existing {
            Some(module) => (&module.members, &module.exports),
            None => (&[], &[]),
        };
        Self {
            members: Positions::new(members, |m| m.cname.clone()),
            exports: Positions::new(exports, String::clone),
        }
    }
}

fn order_key(mode: OrderMode, override_index: usize, doc_index: usize) -> (usize, usize) {
    match mode {
        OrderMode::PreserveExisting => (override_index, doc_index),
        OrderMode::Documentation => (doc_index, override_index),
    }
}

fn sorted<K: Ord + Copy, T>(mut keyed: Vec<(K, T)>) -> Vec<T> {
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Override position of a bound function: its body position when preserving
/// an existing module, its export position otherwise.
fn function_override(
    mode: OrderMode,
    existing: &Existing<'_>,
    naming: &Naming,
    cname: &str,
    info: Option<&MemberInfo>,
) -> usize {
    match mode {
        OrderMode::PreserveExisting => existing.members.index(cname),
        OrderMode::Documentation => existing.exports.index(&naming.binding_name(cname, info)),
    }
}

/// Select and order the methods of an object.
///
/// Variadic methods are reported as not bound. Deprecated methods are kept
/// only when the existing module already binds them.
pub fn collate_methods<'a>(
    object: &'a Object,
    docs: &'a [FuncDoc],
    existing: Option<&'a ExistingModule>,
    naming: &Naming,
    mode: OrderMode,
) -> Collation<'a, &'a Method, FuncDoc> {
    let docs = Positions::new(docs, |d| d.name.clone());
    let existing = Existing::new(existing);
    let mut not_bound = Vec::new();
    let mut keyed = Vec::new();

    for method in &object.methods {
        if method.is_variadic() {
            tracing::debug!("{} is variadic and will not be bound", method.cname);
            not_bound.push(method.cname.clone());
            continue;
        }
        let info = existing.members.get(&method.cname);
        if method.deprecated && info.is_none() {
            tracing::debug!("skipping deprecated {}", method.cname);
            continue;
        }
        let key = order_key(
            mode,
            function_override(mode, &existing, naming, &method.cname, info),
            docs.index(&method.cname),
        );
        tracing::trace!(?key, "ordering {}", method.cname);
        keyed.push((
            key,
            Collated {
                member: method,
                doc: docs.get(&method.cname),
                info,
            },
        ));
    }

    Collation {
        entries: sorted(keyed),
        not_bound,
    }
}

/// Select and order the constructors of an object, converted to methods.
pub fn collate_constructors<'a>(
    object: &'a Object,
    docs: &'a [FuncDoc],
    existing: Option<&'a ExistingModule>,
    naming: &Naming,
    mode: OrderMode,
) -> Collation<'a, Method, FuncDoc> {
    let docs = Positions::new(docs, |d| d.name.clone());
    let existing = Existing::new(existing);
    let mut not_bound = Vec::new();
    let mut keyed = Vec::new();

    for ctor in &object.constructors {
        if ctor.is_variadic() {
            tracing::debug!("{} is variadic and will not be bound", ctor.cname);
            not_bound.push(ctor.cname.clone());
            continue;
        }
        let info = existing.members.get(&ctor.cname);
        let key = order_key(
            mode,
            function_override(mode, &existing, naming, &ctor.cname, info),
            docs.index(&ctor.cname),
        );
        tracing::trace!(?key, "ordering {}", ctor.cname);
        keyed.push((
            key,
            Collated {
                member: ctor.to_method(object),
                doc: docs.get(&ctor.cname),
                info,
            },
        ));
    }

    Collation {
        entries: sorted(keyed),
        not_bound,
    }
}

/// Merge declared properties with getter/setter pairs found among `methods`.
///
/// Pairs matching no declared property become synthesized properties, which
/// sort before declared ones in getter order. Declared properties are
/// ordered by documentation and existing exports.
pub fn collate_properties<'a>(
    object: &'a Object,
    methods: &[&'a Method],
    docs: &'a [PropDoc],
    existing: Option<&'a ExistingModule>,
    naming: &Naming,
    mode: OrderMode,
) -> Vec<CollatedProperty<'a>> {
    let docs = Positions::new(docs, |d| property_doc_key(&d.name));
    let existing = Existing::new(existing);
    let mut pairs = find_accessor_pairs(methods.iter().copied());
    let mut keyed = Vec::new();

    for property in &object.properties {
        let keys = [property_key(&property.name), property_key(&property.cname)];
        let paired = pairs
            .iter()
            .position(|(suffix, _)| keys.contains(&property_key(suffix)))
            .map(|index| pairs.remove(index).1);
        let source = match paired {
            Some(accessors) => PropertySource::DeclaredWithAccessors {
                property,
                accessors,
            },
            None => PropertySource::Declared(property),
        };

        let doc_key = property_doc_key(&property.cname);
        let binding = naming.property_binding_name(&object.name, &property.name);
        let (first, second) = order_key(mode, existing.exports.index(&binding), docs.index(&doc_key));
        keyed.push((
            (1, first, second),
            CollatedProperty {
                source,
                doc: docs.get(&doc_key),
            },
        ));
    }

    let synthesized = pairs.into_iter().map(|(name, accessors)| {
        (
            (0, 0, 0),
            CollatedProperty {
                source: PropertySource::Synthesized { name, accessors },
                doc: None,
            },
        )
    });
    let mut all: Vec<_> = synthesized.collect();
    all.extend(keyed);
    sorted(all)
}

/// Pair signals with their documentation and order them.
pub fn collate_signals<'a>(
    object: &'a Object,
    docs: &'a [SignalDoc],
    existing: Option<&'a ExistingModule>,
    mode: OrderMode,
) -> Vec<Collated<'a, &'a Signal, SignalDoc>> {
    let docs = Positions::new(docs, |d| signal_doc_key(&d.name));
    let existing = Existing::new(existing);
    let mut keyed = Vec::new();

    for signal in &object.signals {
        let doc_key = signal_doc_key(&signal.cname);
        let (on_name, _) = signal_binding_names(&signal.cname);
        let key = order_key(mode, existing.exports.index(&on_name), docs.index(&doc_key));
        keyed.push((
            key,
            Collated {
                member: signal,
                doc: docs.get(&doc_key),
                info: None,
            },
        ));
    }

    sorted(keyed)
}

#[cfg(test)]
#[path = "collate/collate_tests.rs"]
mod collate_tests;
