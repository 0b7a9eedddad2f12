use super::*;
use crate::types::{AssemblyDecl, CompilationInput, Origin, TypeRef};

fn compile(assembly: Vec<AttributeData>, types: Vec<TypeDef>) -> Compilation {
    Compilation::from_input(CompilationInput {
        assembly: AssemblyDecl {
            name: "Tests".into(),
            attributes: assembly,
        },
        types,
        include_core_library: true,
    })
    .unwrap()
}

fn library_type(namespace: &str, name: &str) -> TypeDef {
    let mut def = TypeDef::class(namespace, name);
    def.origin = Origin::Metadata;
    def
}

#[test]
fn defaults_without_attributes() {
    let config = GenerationConfig::resolve(&compile(vec![], vec![])).unwrap();
    assert_eq!(config.immutable, ImmutableOptions::default());
    assert_eq!(config.capabilities, Capabilities::default());
    assert!(!config.immutability.treat_arrays_as_immutable);
    assert_eq!(config.copy_ignore().len(), DEFAULT_COPY_IGNORE.len());
}

#[test]
fn assembly_options_override_defaults() {
    let options = AttributeData::new(IMMUTABLE_GENERATION_OPTIONS)
        .with_named("TreatArrayAsImmutable", AttributeValue::Bool(true))
        .with_named("GenerateEqualityByDefault", AttributeValue::Bool(false))
        .with_named("GenerateNewtownsoftJsonNetConverters", AttributeValue::Bool(false));
    let config = GenerationConfig::resolve(&compile(vec![options], vec![])).unwrap();

    assert!(config.immutable.treat_array_as_immutable);
    assert!(config.immutability.treat_arrays_as_immutable);
    assert!(!config.immutable.generate_equality_by_default);
    assert!(!config.immutable.generate_json_converters);
    assert!(config.immutable.generate_option_code);
}

#[test]
fn json_and_option_flags_are_independent() {
    let options = AttributeData::new(IMMUTABLE_GENERATION_OPTIONS)
        .with_named("GenerateOptionCode", AttributeValue::Bool(false));
    let compilation = compile(
        vec![options],
        vec![
            library_type("Uno", "Option"),
            library_type("Newtonsoft.Json", "JsonConvert"),
        ],
    );
    let config = GenerationConfig::resolve(&compilation).unwrap();
    let entity = TypeDef::class("Ns", "Entity");

    assert!(!config.option_code_for(&entity));
    assert!(config.json_converters_for(&entity));
}

#[test]
fn abstract_types_get_neither_option_nor_json() {
    let compilation = compile(
        vec![],
        vec![
            library_type("Uno", "Option"),
            library_type("Newtonsoft.Json", "JsonConvert"),
        ],
    );
    let config = GenerationConfig::resolve(&compilation).unwrap();
    let mut entity = TypeDef::class("Ns", "Entity");
    assert!(config.option_code_for(&entity));
    entity.is_abstract = true;
    assert!(!config.option_code_for(&entity));
    assert!(!config.json_converters_for(&entity));
}

#[test]
fn capabilities_follow_referenced_types() {
    let compilation = compile(
        vec![],
        vec![
            library_type("Uno.Equality", "IKeyEquatable"),
            library_type("System.Diagnostics.Contracts", "PureAttribute"),
        ],
    );
    let caps = Capabilities::detect(&compilation);
    assert!(caps.key_equality);
    assert!(caps.pure_attribute);
    assert!(!caps.option_type);
    assert!(!caps.json_net);
}

#[test]
fn treat_as_immutable_builds_allow_list() {
    let attrs = vec![
        AttributeData::new(TREAT_AS_IMMUTABLE)
            .with_arg(AttributeValue::Type(TypeRef::named("Other.Money"))),
        AttributeData::new(TREAT_AS_IMMUTABLE).with_arg(AttributeValue::Type(TypeRef::generic(
            "Other.Box`1",
            vec![TypeRef::parameter("T")],
        ))),
    ];
    let config = GenerationConfig::resolve(&compile(attrs, vec![])).unwrap();
    assert!(config.immutability.allow_list.contains("Other.Money"));
    assert!(config.immutability.allow_list.contains("Other.Box`1"));
}

#[test]
fn assembly_copy_ignore_patterns_are_appended() {
    let attrs = vec![AttributeData::new(IMMUTABLE_COPY_IGNORE)
        .with_arg(AttributeValue::String("^System\\.ComponentModel".into()))];
    let config = GenerationConfig::resolve(&compile(attrs, vec![])).unwrap();
    assert_eq!(config.copy_ignore().len(), 3);
    assert!(config
        .copy_ignore()
        .iter()
        .any(|r| r.is_match("System.ComponentModel.DescriptionAttribute")));
}

#[test]
fn invalid_assembly_pattern_is_fatal() {
    let attrs = vec![AttributeData::new(IMMUTABLE_COPY_IGNORE)
        .with_arg(AttributeValue::String("(unclosed".into()))];
    let err = GenerationConfig::resolve(&compile(attrs, vec![])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { pattern, .. } if pattern == "(unclosed"));
}

#[test]
fn per_type_equality_override() {
    let explicit_off = TypeDef::class("Ns", "Off").with_attribute(
        AttributeData::new(GENERATED_IMMUTABLE).with_named("GenerateEquality", AttributeValue::Bool(false)),
    );
    let inherits = TypeDef::class("Ns", "Default").with_attribute(AttributeData::new(GENERATED_IMMUTABLE));
    let compilation = compile(vec![], vec![explicit_off, inherits]);
    let config = GenerationConfig::resolve(&compilation).unwrap();

    let off = compilation.type_def("Ns.Off").unwrap();
    let default = compilation.type_def("Ns.Default").unwrap();
    assert!(!config.generate_equality_for(&compilation, off));
    assert!(config.generate_equality_for(&compilation, default));
}
