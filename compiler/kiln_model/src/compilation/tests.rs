use super::*;
use crate::types::TypeDef;

fn input(types: Vec<TypeDef>) -> CompilationInput {
    CompilationInput {
        types,
        ..CompilationInput::default()
    }
}

#[test]
fn core_library_is_merged_by_default() {
    let compilation = Compilation::from_input(input(vec![])).unwrap();
    assert!(compilation.contains("System.Object"));
    assert!(compilation.contains("System.Collections.Immutable.ImmutableList`1"));
    assert!(compilation.require_well_known_types().is_ok());
}

#[test]
fn missing_well_known_type_is_fatal() {
    let compilation = Compilation::from_input(CompilationInput {
        include_core_library: false,
        ..CompilationInput::default()
    })
    .unwrap();

    let err = compilation.require_well_known_types().unwrap_err();
    assert!(matches!(
        err,
        ModelError::MissingWellKnownType {
            name: "System.Object"
        }
    ));
}

#[test]
fn duplicate_declarations_are_rejected() {
    let result = Compilation::from_input(input(vec![
        TypeDef::class("Ns", "A"),
        TypeDef::class("Ns", "A"),
    ]));
    assert!(matches!(result, Err(ModelError::DuplicateType { name }) if name == "Ns.A"));
}

#[test]
fn user_type_cannot_shadow_catalog_type() {
    let result = Compilation::from_input(input(vec![TypeDef::class("System", "String")]));
    assert!(matches!(result, Err(ModelError::DuplicateType { .. })));
}

#[test]
fn source_types_excludes_catalog() {
    let compilation = Compilation::from_input(input(vec![
        TypeDef::class("Ns", "A"),
        TypeDef::class("Ns", "B"),
    ]))
    .unwrap();

    let names: Vec<_> = compilation
        .source_types()
        .map(|(_, def)| def.full_name())
        .collect();
    assert_eq!(names, vec!["Ns.A", "Ns.B"]);
}

#[test]
fn resolve_named_reference() {
    let compilation = Compilation::from_input(input(vec![TypeDef::class("Ns", "A")])).unwrap();
    assert_eq!(
        compilation.resolve(&TypeRef::named("Ns.A")).map(|d| d.name.as_str()),
        Some("A")
    );
    assert!(compilation.resolve(&TypeRef::parameter("T")).is_none());
    assert!(compilation.resolve(&TypeRef::named("Ns.Missing")).is_none());
}

#[test]
fn from_json_reports_parse_errors() {
    let err = Compilation::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ModelError::Json(_)));
}

#[test]
fn from_json_reads_assembly_attributes() {
    let json = r#"{
        "assembly": {
            "name": "Sample",
            "attributes": [ { "class": "Uno.ImmutableGenerationOptionsAttribute" } ]
        },
        "types": [ { "namespace": "Sample", "name": "Entity" } ]
    }"#;
    let compilation = Compilation::from_json(json).unwrap();

    assert_eq!(compilation.assembly().name, "Sample");
    assert_eq!(compilation.assembly_attributes().len(), 1);
    assert!(compilation.contains("Sample.Entity"));
}
