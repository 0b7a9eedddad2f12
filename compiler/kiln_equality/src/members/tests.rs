use super::*;
use kiln_model::vocabulary::{CollectionMode, StringMode};
use kiln_model::{AttributeValue, CompilationInput, FieldDef, Origin, PropertyDef, TypeKind};

fn compile(types: Vec<TypeDef>) -> Compilation {
    Compilation::from_input(CompilationInput {
        types,
        ..CompilationInput::default()
    })
    .unwrap()
}

fn int() -> TypeRef {
    TypeRef::named("System.Int32")
}

fn string() -> TypeRef {
    TypeRef::named("System.String")
}

fn property(name: &str, ty: TypeRef, attributes: Vec<AttributeData>) -> Member {
    let mut p = PropertyDef::new(name, ty);
    p.attributes = attributes;
    Member::Property(p)
}

fn names<'a>(members: &[EqualityMember<'a>]) -> Vec<&'a str> {
    members.iter().map(|m| m.name).collect()
}

#[test]
fn properties_then_fields_in_declaration_order() {
    let mut field = FieldDef::new("_count", int());
    field.is_readonly = true;
    let entity = TypeDef::class("Ns", "Entity")
        .with_member(Member::Field(field))
        .with_member(property("A", int(), vec![]))
        .with_member(property("B", string(), vec![]));
    let compilation = compile(vec![entity]);
    let def = compilation.type_def("Ns.Entity").unwrap();

    let sets = classify(&compilation, def);
    assert_eq!(names(&sets.equality), vec!["A", "B"]);
    assert!(sets.hash.is_empty());
    assert!(sets.key.is_empty());
}

#[test]
fn private_static_write_only_and_indexers_are_skipped() {
    let mut hidden = PropertyDef::new("Hidden", int());
    hidden.accessibility = Accessibility::Private;
    let mut shared = PropertyDef::new("Shared", int());
    shared.is_static = true;
    let mut sink = PropertyDef::new("Sink", int());
    sink.is_write_only = true;
    let mut item = PropertyDef::new("Item", int());
    item.is_indexer = true;
    let mut guarded = FieldDef::new("_guarded", int());
    guarded.accessibility = Accessibility::Protected;

    let entity = TypeDef::class("Ns", "Entity")
        .with_member(Member::Property(hidden))
        .with_member(Member::Property(shared))
        .with_member(Member::Property(sink))
        .with_member(Member::Property(item))
        .with_member(Member::Field(guarded));
    let compilation = compile(vec![entity]);
    let def = compilation.type_def("Ns.Entity").unwrap();

    assert_eq!(names(&classify(&compilation, def).equality), vec!["_guarded"]);
}

#[test]
fn ignore_on_member_or_member_type() {
    let ignored_type =
        TypeDef::class("Ns", "Scratch").with_attribute(AttributeData::new(EQUALITY_IGNORE));
    let entity = TypeDef::class("Ns", "Entity")
        .with_member(property("A", int(), vec![AttributeData::new(EQUALITY_IGNORE)]))
        .with_member(property("B", TypeRef::named("Ns.Scratch"), vec![]))
        .with_member(property("C", int(), vec![]));
    let compilation = compile(vec![ignored_type, entity]);
    let def = compilation.type_def("Ns.Entity").unwrap();

    assert_eq!(names(&classify(&compilation, def).equality), vec!["C"]);
}

#[test]
fn key_members_join_hash_and_key_sets() {
    let entity = TypeDef::class("Ns", "Entity")
        .with_member(property("Id", int(), vec![AttributeData::new(EQUALITY_KEY)]))
        .with_member(property("Code", string(), vec![AttributeData::new(EQUALITY_HASH)]))
        .with_member(property(
            "Alt",
            string(),
            vec![AttributeData::new(DATA_ANNOTATIONS_KEY)],
        ))
        .with_member(property("Note", string(), vec![]));
    let compilation = compile(vec![entity]);
    let def = compilation.type_def("Ns.Entity").unwrap();

    let sets = classify(&compilation, def);
    assert_eq!(names(&sets.equality), vec!["Id", "Code", "Alt", "Note"]);
    assert_eq!(names(&sets.hash), vec!["Id", "Code", "Alt"]);
    assert_eq!(names(&sets.key), vec!["Id", "Alt"]);
    assert!(sets.hash.iter().all(|m| !m.uses_key_equality()));
    assert!(sets.key.iter().all(|m| !m.uses_key_equality()));
}

#[test]
fn auto_key_mode_follows_member_type() {
    let mut key_equatable = TypeDef::class("Uno.Equality", "IKeyEquatable");
    key_equatable.kind = TypeKind::Interface;
    key_equatable.origin = Origin::Metadata;

    let mut keyed = TypeDef::class("Ns", "Keyed");
    keyed.interfaces = vec![TypeRef::named("Uno.Equality.IKeyEquatable")];
    let declares_key = TypeDef::class("Ns", "DeclaresKey").with_member(property(
        "Id",
        int(),
        vec![AttributeData::new(EQUALITY_KEY)],
    ));

    let key = || vec![AttributeData::new(EQUALITY_KEY)];
    let forced = vec![AttributeData::new(EQUALITY_KEY).with_arg(AttributeValue::Int(2))];
    let entity = TypeDef::class("Ns", "Entity")
        .with_member(property("A", TypeRef::named("Ns.Keyed"), key()))
        .with_member(property("B", TypeRef::named("Ns.DeclaresKey"), key()))
        .with_member(property("C", TypeRef::named("Ns.Keyed"), forced))
        .with_member(property("D", string(), key()));
    let compilation = compile(vec![key_equatable, keyed, declares_key, entity]);
    let def = compilation.type_def("Ns.Entity").unwrap();

    let modes: Vec<KeyEqualityMode> = classify(&compilation, def)
        .key
        .iter()
        .map(|m| m.mode)
        .collect();
    assert_eq!(
        modes,
        vec![
            KeyEqualityMode::UseKeyEquality,
            KeyEqualityMode::UseKeyEquality,
            KeyEqualityMode::UseEquality,
            KeyEqualityMode::UseEquality,
        ]
    );
    assert!(has_key_members(&compilation, def));
}

#[test]
fn comparer_options_are_read_per_member() {
    let options = AttributeData::new(EQUALITY_COMPARER_OPTIONS)
        .with_named("CollectionMode", AttributeValue::Int(1))
        .with_named("StringMode", AttributeValue::Int(3));
    let entity = TypeDef::class("Ns", "Entity")
        .with_member(property("A", string(), vec![options]))
        .with_member(property("B", string(), vec![]));
    let compilation = compile(vec![entity]);
    let def = compilation.type_def("Ns.Entity").unwrap();

    let sets = classify(&compilation, def);
    assert_eq!(sets.equality[0].options.collection, Some(CollectionMode::SORTED));
    assert_eq!(sets.equality[0].options.string, StringMode::all());
    assert_eq!(sets.equality[1].options, ComparerOptions::default());
}
