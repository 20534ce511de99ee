//! Classification of every declared C symbol
//!
//! The table is built once per run from all namespaces and is read-only
//! afterwards. Marshaling decisions and doc cross-references consult it.

use crate::error::{GenError, GenResult};
use crate::model::{EnumVariant, MiscKind, Namespace, Object};
use std::collections::{HashMap, HashSet};

/// Classification of a C symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CSymbol {
    EnumType(EnumVariant),
    EnumValue,
    /// An object deriving from the root type. Ancestors self-first, root last.
    ObjectType(Vec<String>),
    StructType,
    BoxedType,
    ClassType,
    TypeAlias,
    CallbackType,
}

/// Lookup from C symbol name to [`CSymbol`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: HashMap<String, CSymbol>,
    /// Objects whose parent chain loops, with the name reached twice.
    cycles: HashMap<String, String>,
}

impl SymbolTable {
    /// Root base type used when none is configured.
    pub const DEFAULT_ROOT: &'static str = "GObject";

    /// Build the table from every namespace of the API model.
    ///
    /// An object is an [`CSymbol::ObjectType`] when `root` appears in its
    /// ancestor chain, otherwise a [`CSymbol::StructType`]. When a symbol is
    /// declared twice the first declaration wins.
    ///
    /// Objects whose parent chain loops are left unclassified and recorded;
    /// [`SymbolTable::check_object`] reports them.
    pub fn build(namespaces: &[Namespace], root: &str) -> Self {
        let mut objects: HashMap<&str, &Object> = HashMap::new();
        for object in namespaces.iter().flat_map(|ns| ns.objects.iter()) {
            objects.entry(object.cname.as_str()).or_insert(object);
        }

        let mut table = SymbolTable::default();

        for ns in namespaces {
            for en in &ns.enums {
                table.insert(&en.cname, CSymbol::EnumType(en.variant));
                for member in &en.members {
                    table.insert(&member.cname, CSymbol::EnumValue);
                }
            }

            for object in &ns.objects {
                let chain = match ancestor_chain(object, &objects, root) {
                    Ok(chain) => chain,
                    Err(repeated) => {
                        tracing::warn!(
                            "inheritance cycle: {} reaches {repeated} twice",
                            object.cname
                        );
                        table
                            .cycles
                            .entry(object.cname.clone())
                            .or_insert(repeated);
                        continue;
                    }
                };
                let symbol = if chain.iter().any(|name| name == root) {
                    CSymbol::ObjectType(chain)
                } else {
                    CSymbol::StructType
                };
                table.insert(&object.cname, symbol);
            }

            for misc in &ns.misc {
                let symbol = match misc.kind {
                    MiscKind::Struct => CSymbol::StructType,
                    MiscKind::Boxed => CSymbol::BoxedType,
                    MiscKind::Class => CSymbol::ClassType,
                    MiscKind::Alias => CSymbol::TypeAlias,
                    MiscKind::Callback => CSymbol::CallbackType,
                };
                table.insert(&misc.cname, symbol);
            }
        }

        tracing::debug!(symbols = table.len(), "built symbol table");
        table
    }

    fn insert(&mut self, cname: &str, symbol: CSymbol) {
        if self.symbols.contains_key(cname) {
            tracing::debug!("duplicate declaration of {cname} ignored");
            return;
        }
        self.symbols.insert(cname.to_string(), symbol);
    }

    pub fn get(&self, cname: &str) -> Option<&CSymbol> {
        self.symbols.get(cname)
    }

    /// Ancestor chain of an object type, self first.
    pub fn ancestors(&self, cname: &str) -> Option<&[String]> {
        match self.symbols.get(cname) {
            Some(CSymbol::ObjectType(chain)) => Some(chain),
            _ => None,
        }
    }

    /// Fails with [`GenError::InheritanceCycle`] when the parent chain of
    /// `cname` loops.
    pub fn check_object(&self, cname: &str) -> GenResult<()> {
        match self.cycles.get(cname) {
            Some(repeated) => Err(GenError::InheritanceCycle {
                object: cname.to_string(),
                repeated: repeated.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn is_object(&self, cname: &str) -> bool {
        self.ancestors(cname).is_some()
    }

    /// Whether `cname` is an object type with `ancestor` in its chain.
    pub fn derives_from(&self, cname: &str, ancestor: &str) -> bool {
        self.ancestors(cname)
            .is_some_and(|chain| chain.iter().any(|a| a == ancestor))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, CSymbol)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (S, CSymbol)>>(iter: I) -> Self {
        let mut table = SymbolTable::default();
        for (name, symbol) in iter {
            let name: String = name.into();
            table.insert(&name, symbol);
        }
        table
    }
}

/// Walk the parent chain of `object` until the root or an unresolved name.
///
/// An unresolved parent ends the chain as a single element. A loop fails
/// with the name that was reached twice.
fn ancestor_chain(
    object: &Object,
    objects: &HashMap<&str, &Object>,
    root: &str,
) -> Result<Vec<String>, String> {
    let mut chain = vec![object.cname.clone()];
    let mut visited: HashSet<&str> = HashSet::from([object.cname.as_str()]);
    let mut current = object;

    while current.cname != root {
        let Some(parent) = current.parent.as_deref() else {
            break;
        };
        if !visited.insert(parent) {
            return Err(parent.to_string());
        }
        chain.push(parent.to_string());
        if parent == root {
            break;
        }
        match objects.get(parent) {
            Some(next) => current = next,
            None => {
                tracing::warn!("parent {parent} of {} is not declared", current.cname);
                break;
            }
        }
    }

    Ok(chain)
}

#[cfg(test)]
#[path = "symbols/symbols_tests.rs"]
mod symbols_tests;
