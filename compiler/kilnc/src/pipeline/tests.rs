use super::*;
use kiln_diagnostic::{ErrorCode, Generator};
use kiln_model::vocabulary::{GENERATED_EQUALITY, GENERATED_IMMUTABLE, IMMUTABLE_COPY_IGNORE};
use kiln_model::{
    AttributeData, AttributeValue, CompilationInput, ModelError, PropertyDef, TypeRef,
};
use pretty_assertions::assert_eq;

fn compile(types: Vec<TypeDef>) -> Compilation {
    Compilation::from_input(CompilationInput {
        types,
        ..CompilationInput::default()
    })
    .unwrap()
}

fn product() -> TypeDef {
    TypeDef::class("Shop", "Product")
        .with_attribute(AttributeData::new(GENERATED_IMMUTABLE))
        .with_member(kiln_model::Member::Property(PropertyDef::new(
            "Name",
            TypeRef::named("System.String"),
        )))
}

#[test]
fn equality_units_come_before_immutable_units() {
    let point =
        TypeDef::class("Geo", "Point").with_attribute(AttributeData::new(GENERATED_EQUALITY));
    let compilation = compile(vec![product(), point]);
    let output = generate(&compilation).unwrap();

    let paths: Vec<&str> = output.artifacts.iter().map(|a| a.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "EqualityGenerator/Geo/Point.g.cs",
            "EqualityGenerator/Shop/Product.g.cs",
            "ImmutableGenerator/Shop/Product.g.cs",
        ]
    );
    assert_eq!(output.artifacts[2].generator, Generator::Immutable);
    assert!(!output.has_errors());
}

#[test]
fn per_type_problems_stay_in_their_unit() {
    let mut count = PropertyDef::new("Count", TypeRef::named("System.Int32"));
    count.has_setter = true;
    let broken = TypeDef::class("Shop", "Broken")
        .with_attribute(AttributeData::new(GENERATED_IMMUTABLE))
        .with_member(kiln_model::Member::Property(count));
    let compilation = compile(vec![product(), broken]);
    let output = generate(&compilation).unwrap();

    assert!(output.has_errors());
    let broken = output.artifact("ImmutableGenerator/Shop/Broken.g.cs").unwrap();
    assert!(broken.has_errors());
    let product = output.artifact("ImmutableGenerator/Shop/Product.g.cs").unwrap();
    assert!(product.diagnostics.is_empty());
    assert_eq!(output.tally().errors, broken.diagnostics.iter().filter(|d| d.is_error()).count());
}

#[test]
fn missing_well_known_type_aborts() {
    let compilation = Compilation::from_input(CompilationInput {
        types: vec![product()],
        include_core_library: false,
        ..CompilationInput::default()
    })
    .unwrap();
    let err = generate(&compilation).unwrap_err();
    assert!(matches!(
        err,
        DriverError::Model(ModelError::MissingWellKnownType { .. })
    ));
    assert_eq!(err.code(), Some(ErrorCode::K0001));
}

#[test]
fn invalid_assembly_pattern_aborts() {
    let mut input = CompilationInput {
        types: vec![product()],
        ..CompilationInput::default()
    };
    input.assembly.attributes.push(
        AttributeData::new(IMMUTABLE_COPY_IGNORE)
            .with_arg(AttributeValue::String("(unclosed".to_string())),
    );
    let compilation = Compilation::from_input(input).unwrap();
    let err = generate(&compilation).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::K0002));
}

#[test]
fn runs_are_identical() {
    let compilation = compile(vec![product()]);
    assert_eq!(generate(&compilation).unwrap(), generate(&compilation).unwrap());
}
