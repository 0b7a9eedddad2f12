use kiln_emit::Artifact;
use kiln_model::vocabulary::EQUALITY_COMPARER_OPTIONS;
use kiln_model::{
    AttributeData, AttributeValue, Compilation, CompilationInput, GenerationConfig, Member,
    PropertyDef, TypeDef, TypeRef,
};

use crate::EqualityGenerator;

fn generate(entity: TypeDef) -> Artifact {
    let compilation = Compilation::from_input(CompilationInput {
        types: vec![entity],
        ..CompilationInput::default()
    })
    .unwrap();
    let config = GenerationConfig::resolve(&compilation).unwrap();
    let generator = EqualityGenerator::new(&compilation, &config, ["Ns.Entity".to_string()]);
    generator.generate(compilation.type_def("Ns.Entity").unwrap())
}

fn entity(member: PropertyDef) -> TypeDef {
    TypeDef::class("Ns", "Entity").with_member(Member::Property(member))
}

fn options(name: &str, value: i64) -> AttributeData {
    AttributeData::new(EQUALITY_COMPARER_OPTIONS).with_named(name, AttributeValue::Int(value))
}

fn string() -> TypeRef {
    TypeRef::named("System.String")
}

/// The `if (...)` condition written for `member`.
fn condition(text: &str, member: &str) -> String {
    let marker = format!("return false; // {member} not equal");
    let end = text.find(&marker).unwrap();
    let start = text[..end].rfind("if (").unwrap();
    let line = &text[start..end];
    line[4..line.find(")\n").unwrap()].to_string()
}

#[test]
fn arrays_are_sorted_by_default() {
    let tags = PropertyDef::new("Tags", TypeRef::array(string()));
    let text = generate(entity(tags)).text;

    assert!(condition(&text, "Tags").starts_with("!global::Uno.Equality.SortedReadonlyCollectionEqualityComparer<"));
    assert!(text.contains("// **Tags** To use an _unsorted_ comparer"));
}

#[test]
fn explicit_mode_overrides_the_array_default() {
    let mut tags = PropertyDef::new("Tags", TypeRef::array(string()));
    tags.attributes = vec![options("CollectionMode", 0)];
    let text = generate(entity(tags)).text;

    assert!(condition(&text, "Tags").starts_with("!global::Uno.Equality.UnsortedReadonlyCollectionEqualityComparer<"));
    assert!(!text.contains("_unsorted_"));
}

#[test]
fn sets_are_unsorted_by_default() {
    let ty = TypeRef::generic("System.Collections.Generic.HashSet`1", vec![string()]);
    let text = generate(entity(PropertyDef::new("Names", ty))).text;

    let condition = condition(&text, "Names");
    assert!(condition.starts_with("!global::Uno.Equality.UnsortedReadonlyCollectionEqualityComparer<"));
    assert!(condition.ends_with(".Default.Equals(Names, other.Names)"));
}

#[test]
fn dictionaries_use_the_dictionary_comparer() {
    let ty = TypeRef::generic(
        "System.Collections.Generic.Dictionary`2",
        vec![string(), TypeRef::named("System.Int32")],
    );
    let text = generate(entity(PropertyDef::new("Counts", ty))).text;

    assert!(condition(&text, "Counts").contains("DictionaryEqualityComparer<"));
    assert!(!condition(&text, "Counts").contains("CollectionEqualityComparer"));
}

#[test]
fn string_modes_pick_the_comparer() {
    let plain = generate(entity(PropertyDef::new("Name", string()))).text;
    assert_eq!(
        condition(&plain, "Name"),
        "!global::System.StringComparer.Ordinal.Equals(Name, other.Name)"
    );
    assert!(plain.contains("// STRING>> String comparison can be tuned"));

    let mut name = PropertyDef::new("Name", string());
    name.attributes = vec![options("StringMode", 1)];
    let ignore_case = generate(entity(name)).text;
    assert_eq!(
        condition(&ignore_case, "Name"),
        "!global::System.StringComparer.OrdinalIgnoreCase.Equals(Name, other.Name)"
    );
    assert!(!ignore_case.contains("// STRING>>"));

    let mut name = PropertyDef::new("Name", string());
    name.attributes = vec![options("StringMode", 2)];
    let empty_is_null = generate(entity(name)).text;
    assert!(condition(&empty_is_null, "Name")
        .starts_with("(string.IsNullOrWhiteSpace(Name) != string.IsNullOrWhiteSpace(other.Name))"));
}

#[test]
fn custom_comparer_wins_over_the_member_type() {
    let mut comparer = PropertyDef::new("Tags_CustomComparer", TypeRef::named("Ns.TagComparer"));
    comparer.is_static = true;
    let entity = entity(PropertyDef::new("Tags", TypeRef::array(string())))
        .with_member(Member::Property(comparer));
    let text = generate(entity).text;

    assert_eq!(condition(&text, "Tags"), "!Tags_CustomComparer.Equals(Tags, other.Tags)");
    assert!(text.contains("// **Tags** using custom comparer provided by `Tags_CustomComparer`\n"));
    assert!(!text.contains("_unsorted_"));
}
