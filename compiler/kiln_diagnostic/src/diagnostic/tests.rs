use super::*;
use pretty_assertions::assert_eq;

#[test]
fn builder_sets_fields() {
    let diag = Diagnostic::error(ErrorCode::K2004)
        .with_message("property `Name` has a setter")
        .with_location(Some(Location {
            path: "Entity.cs".into(),
            line: 12,
        }))
        .with_note("remove the setter");

    assert!(diag.is_error());
    assert_eq!(diag.code, ErrorCode::K2004);
    assert_eq!(diag.notes, vec!["remove the setter".to_string()]);
    assert_eq!(diag.location.as_ref().map(|l| l.line), Some(12));
}

#[test]
fn embed_uses_scope_and_directive() {
    let diag = Diagnostic::warning(ErrorCode::K1004)
        .with_message("No fields or properties used for equality check.")
        .in_scope(Generator::Equality, "Ns.Box<T>");
    assert_eq!(
        diag.embed(),
        "#warning EqualityGenerator/Ns.Box<T>: No fields or properties used for equality check."
    );
}

#[test]
fn embed_flattens_line_breaks() {
    let diag = Diagnostic::error(ErrorCode::K2006)
        .with_message("first line\nsecond line\r\nthird");
    assert_eq!(diag.embed(), "#error first line second line  third");
}

#[test]
fn severity_and_generator_names() {
    assert_eq!(Severity::Error.to_string(), "error");
    assert_eq!(Severity::Warning.directive(), "#warning");
    assert_eq!(Generator::Immutable.to_string(), "ImmutableGenerator");
    assert_eq!(Generator::Lifecycle.name(), "LifecycleGenerator");
}

#[test]
fn serializes_code_as_string() {
    let diag = Diagnostic::warning(ErrorCode::K1002)
        .with_message("base")
        .in_scope(Generator::Equality, "A");
    let value = serde_json::to_value(&diag).unwrap_or_default();
    assert_eq!(value["code"], "K1002");
    assert_eq!(value["severity"], "warning");
    assert_eq!(value["scope"]["generator"], "EqualityGenerator");
    assert!(value.get("location").is_none());
}
