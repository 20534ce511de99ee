#![allow(non_snake_case)]

use super::*;

fn info(cname: &str) -> MemberInfo {
    MemberInfo {
        cname: cname.into(),
        ..Default::default()
    }
}

#[test]
fn ExistingModule___member_positions___first_occurrence_wins() {
    let module = ExistingModule {
        members: vec![info("gtk_a"), info("gtk_b"), info("gtk_a")],
        ..Default::default()
    };

    let positions = module.member_positions();

    assert_eq!(positions.len(), 2);
    assert_eq!(positions["gtk_a"].0, 0);
    assert_eq!(positions["gtk_b"].0, 1);
}

#[test]
fn ExistingModule___export_positions___indexes_names() {
    let module = ExistingModule {
        exports: vec!["Button".into(), "buttonNew".into()],
        ..Default::default()
    };

    let positions = module.export_positions();

    assert_eq!(positions["buttonNew"], 1);
    assert!(!positions.contains_key("buttonClicked"));
}

#[test]
fn ExistingModule___deserialize___imports_absent_is_none() {
    let module: ExistingModule = serde_json::from_str(r#"{"members": []}"#).unwrap();

    assert!(module.imports.is_none());
    assert!(module.exports.is_empty());
}
