#![allow(non_snake_case)]

use super::*;
use crate::model::{Enum, EnumMember, Misc};
use test_case::test_case;

fn object(cname: &str, parent: Option<&str>) -> Object {
    Object {
        name: cname.trim_start_matches("Gtk").into(),
        cname: cname.into(),
        parent: parent.map(String::from),
        implements: vec![],
        constructors: vec![],
        methods: vec![],
        properties: vec![],
        signals: vec![],
        deprecated: false,
    }
}

fn namespace(objects: Vec<Object>) -> Namespace {
    Namespace {
        name: "Gtk".into(),
        library: "gtk".into(),
        objects,
        enums: vec![],
        misc: vec![],
    }
}

#[test]
fn SymbolTable___build___object_chain_is_self_first_root_last() {
    let ns = namespace(vec![
        object("GObject", None),
        object("GtkObject", Some("GObject")),
        object("GtkWidget", Some("GtkObject")),
        object("GtkButton", Some("GtkWidget")),
    ]);

    let table = SymbolTable::build(&[ns], "GObject");

    assert_eq!(
        table.ancestors("GtkButton").unwrap(),
        &["GtkButton", "GtkWidget", "GtkObject", "GObject"]
    );
    assert!(table.derives_from("GtkButton", "GtkObject"));
    assert!(!table.derives_from("GtkObject", "GtkWidget"));
}

#[test]
fn SymbolTable___build___chain_resolves_across_namespaces() {
    let gobject = Namespace {
        name: "GLib".into(),
        library: "glib".into(),
        objects: vec![object("GObject", None)],
        enums: vec![],
        misc: vec![],
    };
    let gtk = namespace(vec![object("GtkWidget", Some("GObject"))]);

    let table = SymbolTable::build(&[gtk, gobject], "GObject");

    assert!(table.is_object("GtkWidget"));
    assert!(table.is_object("GObject"));
}

#[test]
fn SymbolTable___build___unresolved_parent_is_terminal_chain_element() {
    let ns = namespace(vec![
        object("GtkObject", Some("GObject")),
        object("GtkThing", Some("GtkMissing")),
    ]);

    let table = SymbolTable::build(&[ns], "GObject");

    assert_eq!(
        table.ancestors("GtkObject").unwrap(),
        &["GtkObject", "GObject"]
    );
    assert_eq!(table.get("GtkThing"), Some(&CSymbol::StructType));
}

#[test]
fn SymbolTable___build___parentless_non_root_is_struct() {
    let ns = namespace(vec![object("GtkBorder", None)]);

    let table = SymbolTable::build(&[ns], "GObject");

    assert_eq!(table.get("GtkBorder"), Some(&CSymbol::StructType));
}

#[test]
fn SymbolTable___build___cycle_fails_only_the_objects_on_it() {
    let ns = namespace(vec![
        object("GtkA", Some("GtkB")),
        object("GtkB", Some("GtkA")),
        object("GtkLabel", Some("GObject")),
    ]);

    let table = SymbolTable::build(&[ns], "GObject");

    let err = table.check_object("GtkA").unwrap_err();
    assert!(matches!(
        err,
        GenError::InheritanceCycle { ref object, ref repeated } if object == "GtkA" && repeated == "GtkA"
    ));
    assert!(table.check_object("GtkB").is_err());
    assert_eq!(table.get("GtkA"), None);
    assert!(table.check_object("GtkLabel").is_ok());
    assert!(table.is_object("GtkLabel"));
}

#[test]
fn SymbolTable___build___descendant_of_a_cycle_fails_too() {
    let ns = namespace(vec![
        object("GtkA", Some("GtkB")),
        object("GtkB", Some("GtkA")),
        object("GtkC", Some("GtkA")),
    ]);

    let table = SymbolTable::build(&[ns], "GObject");

    assert!(matches!(
        table.check_object("GtkC"),
        Err(GenError::InheritanceCycle { ref repeated, .. }) if repeated == "GtkA"
    ));
}

#[test]
fn SymbolTable___build___self_parent_is_a_cycle() {
    let ns = namespace(vec![object("GtkLoop", Some("GtkLoop"))]);

    let table = SymbolTable::build(&[ns], "GObject");

    assert!(matches!(
        table.check_object("GtkLoop"),
        Err(GenError::InheritanceCycle { ref repeated, .. }) if repeated == "GtkLoop"
    ));
}

#[test]
fn SymbolTable___build___classifies_enums_and_values() {
    let mut ns = namespace(vec![]);
    ns.enums.push(Enum {
        name: "AttachOptions".into(),
        cname: "GtkAttachOptions".into(),
        variant: EnumVariant::Flags,
        members: vec![EnumMember {
            name: "Expand".into(),
            cname: "GTK_EXPAND".into(),
            value: None,
        }],
    });

    let table = SymbolTable::build(&[ns], "GObject");

    assert_eq!(
        table.get("GtkAttachOptions"),
        Some(&CSymbol::EnumType(EnumVariant::Flags))
    );
    assert_eq!(table.get("GTK_EXPAND"), Some(&CSymbol::EnumValue));
}

#[test_case(MiscKind::Struct, CSymbol::StructType)]
#[test_case(MiscKind::Boxed, CSymbol::BoxedType)]
#[test_case(MiscKind::Class, CSymbol::ClassType)]
#[test_case(MiscKind::Alias, CSymbol::TypeAlias)]
#[test_case(MiscKind::Callback, CSymbol::CallbackType)]
fn SymbolTable___build___classifies_misc(kind: MiscKind, expected: CSymbol) {
    let mut ns = namespace(vec![]);
    ns.misc.push(Misc {
        name: "Thing".into(),
        cname: "GtkThing".into(),
        kind,
    });

    let table = SymbolTable::build(&[ns], "GObject");

    assert_eq!(table.get("GtkThing"), Some(&expected));
}

#[test]
fn SymbolTable___build___first_declaration_wins() {
    let mut ns = namespace(vec![]);
    ns.misc.push(Misc {
        name: "Thing".into(),
        cname: "GtkThing".into(),
        kind: MiscKind::Boxed,
    });
    ns.misc.push(Misc {
        name: "Thing".into(),
        cname: "GtkThing".into(),
        kind: MiscKind::Alias,
    });

    let table = SymbolTable::build(&[ns], "GObject");

    assert_eq!(table.len(), 1);
    assert_eq!(table.get("GtkThing"), Some(&CSymbol::BoxedType));
}

#[test]
fn SymbolTable___from_iter___collects_entries() {
    let table: SymbolTable = [
        ("GtkWidget", CSymbol::ObjectType(vec!["GtkWidget".into(), "GObject".into()])),
        ("GtkTreeIter", CSymbol::BoxedType),
    ]
    .into_iter()
    .collect();

    assert!(table.is_object("GtkWidget"));
    assert!(!table.is_object("GtkTreeIter"));
    assert!(!table.is_empty());
}
