#![allow(non_snake_case)]

use super::*;
use apigen_core::NullabilityConfig;
use test_case::test_case;

fn naming() -> Naming {
    Naming::new("gtk", &["Gtk".to_string(), "G".to_string()])
}

fn symbols() -> SymbolTable {
    [
        (
            "GtkButton",
            CSymbol::ObjectType(vec![
                "GtkButton".into(),
                "GtkWidget".into(),
                "GtkObject".into(),
                "GObject".into(),
            ]),
        ),
        (
            "GtkWidget",
            CSymbol::ObjectType(vec!["GtkWidget".into(), "GtkObject".into(), "GObject".into()]),
        ),
        (
            "GtkAccelGroup",
            CSymbol::ObjectType(vec!["GtkAccelGroup".into(), "GObject".into()]),
        ),
        ("GtkReliefStyle", CSymbol::EnumType(EnumVariant::Plain)),
        ("GtkAttachOptions", CSymbol::EnumType(EnumVariant::Flags)),
        ("GtkTreeIter", CSymbol::BoxedType),
        ("GtkCallback", CSymbol::CallbackType),
    ]
    .into_iter()
    .collect()
}

fn with_marshaler<R>(nulls: &NullabilityConfig, f: impl FnOnce(&GtkMarshaler) -> R) -> R {
    let naming = naming();
    let marshaler = GtkMarshaler::new(&naming, nulls, "GtkObject");
    f(&marshaler)
}

fn param(c_type: &str, name: &str) -> GenResult<ParamMarshal> {
    with_marshaler(&NullabilityConfig::default(), |m| {
        m.param(&symbols(), "gtk_test", name, c_type)
    })
}

fn result(c_type: &str, is_constructor: bool) -> GenResult<ResultMarshal> {
    with_marshaler(&NullabilityConfig::default(), |m| {
        m.result(&symbols(), "gtk_test", is_constructor, c_type)
    })
}

#[test]
fn Direction___flags___classify_data_flow() {
    assert!(Direction::In.is_input() && !Direction::In.is_output());
    assert!(!Direction::Out.is_input() && Direction::Out.is_output());
    assert!(Direction::InOut.is_input() && Direction::InOut.is_output());
}

#[test_case("gboolean", "Bool", "(fromBool visible)")]
#[test_case("gint", "Int", "(fromIntegral visible)")]
#[test_case("guint16", "Int", "(fromIntegral visible)")]
#[test_case("gdouble", "Double", "(realToFrac visible)")]
fn GtkMarshaler___param___converts_primitives(c_type: &str, hs_type: &str, argument: &str) {
    let m = param(c_type, "visible").unwrap();

    assert_eq!(m.direction, Direction::In);
    assert_eq!(m.hs_type, hs_type);
    assert_eq!(m.glue.argument, argument);
    assert!(m.glue.wrapper.is_none());
}

#[test]
fn GtkMarshaler___param___string_opens_a_scope() {
    let m = param("const-gchar*", "label").unwrap();

    assert_eq!(m.hs_type, "String");
    assert_eq!(
        m.glue.wrapper.as_deref(),
        Some("withUTFString label $ \\labelPtr ->")
    );
    assert_eq!(m.glue.argument, "labelPtr");
}

#[test]
fn GtkMarshaler___param___nullable_string_is_maybe() {
    let mut nulls = NullabilityConfig::default();
    nulls
        .params
        .entry("gtk_test".into())
        .or_default()
        .insert("label".into());

    let m = with_marshaler(&nulls, |m| {
        m.param(&symbols(), "gtk_test", "label", "const-gchar*")
    })
    .unwrap();

    assert_eq!(m.hs_type, "Maybe String");
    assert!(m.glue.wrapper.unwrap().starts_with("maybeWith withUTFString"));
}

#[test]
fn GtkMarshaler___param___object_pointer_gets_class_constraint() {
    let m = param("GtkWidget*", "child").unwrap();

    assert_eq!(m.constraint.as_deref(), Some("WidgetClass child"));
    assert_eq!(m.hs_type, "child");
    assert_eq!(m.glue.argument, "(toWidget child)");
}

#[test]
fn GtkMarshaler___param___numeric_pointer_is_output() {
    let m = param("gint*", "width").unwrap();

    assert_eq!(m.direction, Direction::Out);
    assert_eq!(m.hs_type, "Int");
    assert_eq!(m.glue.wrapper.as_deref(), Some("alloca $ \\widthPtr ->"));
    assert_eq!(m.glue.read_back.as_deref(), Some("width <- peek widthPtr"));
    assert_eq!(m.glue.output.as_deref(), Some("fromIntegral width"));
}

#[test_case("GtkReliefStyle", "ReliefStyle", "((fromIntegral . fromEnum) style)")]
#[test_case("GtkAttachOptions", "[AttachOptions]", "((fromIntegral . fromFlags) style)")]
fn GtkMarshaler___param___converts_enums(c_type: &str, hs_type: &str, argument: &str) {
    let m = param(c_type, "style").unwrap();

    assert_eq!(m.hs_type, hs_type);
    assert_eq!(m.glue.argument, argument);
}

#[test_case("GtkWidget**" ; "pointer to object pointer")]
#[test_case("gchar**" ; "string vector")]
#[test_case("GtkUnknown*" ; "undeclared type")]
#[test_case("GtkCallback*" ; "pointer to callback")]
fn GtkMarshaler___param___unknown_shapes_are_unsupported(c_type: &str) {
    let err = param(c_type, "x").unwrap_err();

    assert!(matches!(
        err,
        GenError::UnsupportedType { ref function, .. } if function == "gtk_test"
    ));
}

#[test]
fn GtkMarshaler___result___void_is_unit() {
    let m = result("void", false).unwrap();

    assert!(m.is_unit());
    assert!(m.wrapper.is_none());
}

#[test_case("const-gchar*", ">>= peekUTFString" ; "borrowed string is peeked")]
#[test_case("gchar*", ">>= readUTFString" ; "owned string is read and freed")]
fn GtkMarshaler___result___strings_read_after_call(c_type: &str, post_call: &str) {
    let m = result(c_type, false).unwrap();

    assert_eq!(m.hs_type, "String");
    assert_eq!(m.post_call.as_deref(), Some(post_call));
}

#[test_case("GtkWidget*", false, "makeNewObject mkWidget $" ; "floating descendant")]
#[test_case("GtkAccelGroup*", false, "makeNewGObject mkAccelGroup $" ; "plain object")]
#[test_case("GtkAccelGroup*", true, "constructNewGObject mkAccelGroup $" ; "plain object constructor")]
fn GtkMarshaler___result___objects_pick_reference_helper(
    c_type: &str,
    is_constructor: bool,
    wrapper: &str,
) {
    let m = result(c_type, is_constructor).unwrap();

    assert_eq!(m.wrapper.as_deref(), Some(wrapper));
}

#[test]
fn GtkMarshaler___result___nullable_object_is_maybe() {
    let mut nulls = NullabilityConfig::default();
    nulls.results.insert("gtk_test".into());

    let m = with_marshaler(&nulls, |m| m.result(&symbols(), "gtk_test", false, "GtkWidget*"))
        .unwrap();

    assert_eq!(m.hs_type, "Maybe Widget");
    assert_eq!(m.wrapper.as_deref(), Some("maybeNull (makeNewObject mkWidget) $"));
}

#[test]
fn GtkMarshaler___result___callback_is_unsupported() {
    assert!(result("GtkCallback", false).is_err());
}

#[test_case("gint", "INT", "Int")]
#[test_case("gboolean", "BOOL", "Bool")]
#[test_case("void", "NONE", "()")]
#[test_case("GtkWidget*", "OBJECT", "Widget")]
#[test_case("GtkReliefStyle", "ENUM", "ReliefStyle")]
#[test_case("GtkTreeIter*", "BOXED", "TreeIter")]
fn GtkMarshaler___signal_type___maps_categories(c_type: &str, category: &str, hs_type: &str) {
    let m = with_marshaler(&NullabilityConfig::default(), |m| {
        m.signal_type(&symbols(), "clicked", c_type)
    })
    .unwrap();

    assert_eq!(m.category, category);
    assert_eq!(m.hs_type, hs_type);
}

#[test_case("gint", "Int", "Int")]
#[test_case("const-gchar*", "String", "String")]
#[test_case("GtkWidget*", "GObject", "Widget")]
#[test_case("GtkAttachOptions", "Flags", "[AttachOptions]")]
fn GtkMarshaler___property_type___maps_value_kinds(c_type: &str, kind: &str, hs_type: &str) {
    let m = with_marshaler(&NullabilityConfig::default(), |m| {
        m.property_type(&symbols(), "width", c_type)
    })
    .unwrap();

    assert_eq!(m.value_kind, kind);
    assert_eq!(m.hs_type, hs_type);
}

#[test]
fn GtkMarshaler___property_type___unknown_type_names_property() {
    let err = with_marshaler(&NullabilityConfig::default(), |m| {
        m.property_type(&symbols(), "mystery", "GtkUnknown")
    })
    .unwrap_err();

    assert!(matches!(err, GenError::UnsupportedType { ref function, .. } if function == "mystery"));
}
