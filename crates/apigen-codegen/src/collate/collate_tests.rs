#![allow(non_snake_case)]

use super::*;
use apigen_core::{Constructor, Parameter};
use std::borrow::Borrow;

fn naming() -> Naming {
    Naming::new("gtk", &["Gtk".to_string()])
}

fn method(name: &str, cname: &str) -> Method {
    Method {
        name: name.into(),
        cname: cname.into(),
        return_type: "void".into(),
        parameters: vec![],
        shared: false,
        deprecated: false,
    }
}

fn object(methods: Vec<Method>) -> Object {
    Object {
        name: "Button".into(),
        cname: "GtkButton".into(),
        parent: Some("GtkWidget".into()),
        implements: vec![],
        constructors: vec![],
        methods,
        properties: vec![],
        signals: vec![],
        deprecated: false,
    }
}

fn doc(name: &str) -> FuncDoc {
    FuncDoc {
        name: name.into(),
        ..Default::default()
    }
}

fn info(cname: &str) -> MemberInfo {
    MemberInfo {
        cname: cname.into(),
        ..Default::default()
    }
}

fn names<M: Borrow<Method>, D>(collation: &Collation<'_, M, D>) -> Vec<String> {
    collation
        .entries
        .iter()
        .map(|e| e.member.borrow().cname.clone())
        .collect()
}

#[test]
fn collate_methods___variadic_is_not_bound() {
    let mut varargs = method("SetValues", "gtk_button_set_values");
    varargs.parameters.push(Parameter {
        c_type: "...".into(),
        name: "args".into(),
        variadic: true,
    });
    let obj = object(vec![method("Clicked", "gtk_button_clicked"), varargs]);

    let collation = collate_methods(&obj, &[], None, &naming(), OrderMode::PreserveExisting);

    assert_eq!(names(&collation), vec!["gtk_button_clicked"]);
    assert_eq!(collation.not_bound, vec!["gtk_button_set_values"]);
}

#[test]
fn collate_methods___deprecated_kept_only_when_already_bound() {
    let mut old = method("Pressed", "gtk_button_pressed");
    old.deprecated = true;
    let mut older = method("Released", "gtk_button_released");
    older.deprecated = true;
    let obj = object(vec![old, older]);
    let existing = ExistingModule {
        members: vec![info("gtk_button_pressed")],
        ..Default::default()
    };

    let collation = collate_methods(
        &obj,
        &[],
        Some(&existing),
        &naming(),
        OrderMode::PreserveExisting,
    );

    assert_eq!(names(&collation), vec!["gtk_button_pressed"]);
    assert!(collation.entries[0].info.is_some());
    assert!(collation.not_bound.is_empty());
}

#[test]
fn collate_methods___preserve_mode_follows_existing_then_docs() {
    let obj = object(vec![
        method("A", "gtk_button_a"),
        method("B", "gtk_button_b"),
        method("C", "gtk_button_c"),
        method("D", "gtk_button_d"),
    ]);
    let docs = vec![doc("gtk_button_d"), doc("gtk_button_c")];
    let existing = ExistingModule {
        members: vec![info("gtk_button_b"), info("gtk_button_a")],
        ..Default::default()
    };

    let collation = collate_methods(
        &obj,
        &docs,
        Some(&existing),
        &naming(),
        OrderMode::PreserveExisting,
    );

    assert_eq!(
        names(&collation),
        vec!["gtk_button_b", "gtk_button_a", "gtk_button_d", "gtk_button_c"]
    );
    assert_eq!(collation.entries[2].doc.map(|d| d.name.as_str()), Some("gtk_button_d"));
}

#[test]
fn collate_methods___documentation_mode_breaks_ties_by_export_position() {
    let obj = object(vec![
        method("A", "gtk_button_a"),
        method("B", "gtk_button_b"),
        method("C", "gtk_button_c"),
    ]);
    let docs = vec![doc("gtk_button_c")];
    let existing = ExistingModule {
        exports: vec!["buttonB".into(), "buttonA".into()],
        ..Default::default()
    };

    let collation = collate_methods(
        &obj,
        &docs,
        Some(&existing),
        &naming(),
        OrderMode::Documentation,
    );

    assert_eq!(
        names(&collation),
        vec!["gtk_button_c", "gtk_button_b", "gtk_button_a"]
    );
}

#[test]
fn collate_methods___unknown_everywhere_keeps_declaration_order() {
    let obj = object(vec![
        method("Z", "gtk_button_z"),
        method("Y", "gtk_button_y"),
        method("X", "gtk_button_x"),
    ]);

    let collation = collate_methods(&obj, &[], None, &naming(), OrderMode::Documentation);

    assert_eq!(
        names(&collation),
        vec!["gtk_button_z", "gtk_button_y", "gtk_button_x"]
    );
}

#[test]
fn collate_constructors___converts_and_reports_variadic() {
    let mut obj = object(vec![]);
    obj.constructors = vec![
        Constructor {
            name: "New".into(),
            cname: "gtk_button_new".into(),
            parameters: vec![],
            deprecated: true,
        },
        Constructor {
            name: "NewWithItems".into(),
            cname: "gtk_button_new_with_items".into(),
            parameters: vec![Parameter {
                c_type: "...".into(),
                name: "items".into(),
                variadic: true,
            }],
            deprecated: false,
        },
    ];

    let collation = collate_constructors(&obj, &[], None, &naming(), OrderMode::PreserveExisting);

    assert_eq!(names(&collation), vec!["gtk_button_new"]);
    assert_eq!(collation.entries[0].member.return_type, "GtkButton*");
    assert!(collation.entries[0].member.shared);
    assert_eq!(collation.not_bound, vec!["gtk_button_new_with_items"]);
}

fn getter(name: &str, cname: &str) -> Method {
    Method {
        return_type: "gint".into(),
        ..method(name, cname)
    }
}

fn setter(name: &str, cname: &str) -> Method {
    Method {
        parameters: vec![Parameter::new("gint", "value")],
        ..method(name, cname)
    }
}

#[test]
fn collate_properties___accessor_pair_without_declaration_is_synthesized() {
    let mut obj = object(vec![
        getter("GetWidth", "gtk_foo_get_width"),
        setter("SetWidth", "gtk_foo_set_width"),
    ]);
    obj.name = "Foo".into();
    let methods: Vec<&Method> = obj.methods.iter().collect();

    let props = collate_properties(&obj, &methods, &[], None, &naming(), OrderMode::Documentation);

    assert_eq!(props.len(), 1);
    assert_eq!(props[0].source.name(), "Width");
    assert!(matches!(props[0].source, PropertySource::Synthesized { .. }));
    assert!(props[0].doc.is_none());
}

#[test]
fn collate_properties___declared_property_absorbs_matching_pair() {
    let mut obj = object(vec![
        getter("GetUseUnderline", "gtk_button_get_use_underline"),
        setter("SetUseUnderline", "gtk_button_set_use_underline"),
        getter("GetDepth", "gtk_button_get_depth"),
        setter("SetDepth", "gtk_button_set_depth"),
    ]);
    obj.properties = vec![
        Property {
            name: "Label".into(),
            cname: "label".into(),
            c_type: "gchar*".into(),
            readable: true,
            writable: true,
        },
        Property {
            name: "UseUnderline".into(),
            cname: "use-underline".into(),
            c_type: "gboolean".into(),
            readable: true,
            writable: true,
        },
    ];
    let docs = vec![
        PropDoc {
            name: "use-underline".into(),
            ..Default::default()
        },
        PropDoc {
            name: "label".into(),
            ..Default::default()
        },
    ];
    let methods: Vec<&Method> = obj.methods.iter().collect();

    let props = collate_properties(&obj, &methods, &docs, None, &naming(), OrderMode::Documentation);

    let order: Vec<&str> = props.iter().map(|p| p.source.name()).collect();
    assert_eq!(order, vec!["Depth", "UseUnderline", "Label"]);
    assert!(matches!(props[1].source, PropertySource::DeclaredWithAccessors { .. }));
    assert!(matches!(props[2].source, PropertySource::Declared(_)));
    assert_eq!(props[2].doc.map(|d| d.name.as_str()), Some("label"));
}

#[test]
fn collate_properties___one_entry_per_name() {
    let mut obj = object(vec![
        getter("GetWidth", "gtk_foo_get_width"),
        setter("SetWidth", "gtk_foo_set_width"),
    ]);
    obj.properties = vec![Property {
        name: "Width".into(),
        cname: "width".into(),
        c_type: "gint".into(),
        readable: true,
        writable: true,
    }];
    let methods: Vec<&Method> = obj.methods.iter().collect();

    let props = collate_properties(&obj, &methods, &[], None, &naming(), OrderMode::Documentation);

    assert_eq!(props.len(), 1);
    assert!(props[0].source.accessors().is_some());
}

#[test]
fn collate_signals___matches_docs_across_spellings() {
    let mut obj = object(vec![]);
    obj.signals = vec![
        Signal {
            name: "Clicked".into(),
            cname: "clicked".into(),
            return_type: "void".into(),
            parameters: vec![],
        },
        Signal {
            name: "FocusIn".into(),
            cname: "focus-in-event".into(),
            return_type: "gboolean".into(),
            parameters: vec![],
        },
    ];
    let docs = vec![SignalDoc {
        name: "focus_in_event".into(),
        ..Default::default()
    }];

    let signals = collate_signals(&obj, &docs, None, OrderMode::Documentation);

    assert_eq!(signals[0].member.cname, "focus-in-event");
    assert!(signals[0].doc.is_some());
    assert_eq!(signals[1].member.cname, "clicked");
    assert!(signals[1].doc.is_none());
}
