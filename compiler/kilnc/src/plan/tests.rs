use super::*;
use kiln_model::vocabulary::{DISPOSE_METHOD, GENERATED_EQUALITY, GENERATED_IMMUTABLE};
use kiln_model::{AttributeData, AttributeValue, CompilationInput, Member, MethodDef, TypeRef};
use pretty_assertions::assert_eq;

fn compile(types: Vec<TypeDef>) -> Compilation {
    Compilation::from_input(CompilationInput {
        types,
        ..CompilationInput::default()
    })
    .unwrap()
}

fn immutable(namespace: &str, name: &str) -> TypeDef {
    TypeDef::class(namespace, name).with_attribute(AttributeData::new(GENERATED_IMMUTABLE))
}

fn names(compilation: &Compilation, ids: &[TypeId]) -> Vec<String> {
    GenerationPlan::full_names(compilation, ids)
}

fn plan(compilation: &Compilation) -> GenerationPlan {
    let config = GenerationConfig::resolve(compilation).unwrap();
    GenerationPlan::build(compilation, &config)
}

#[test]
fn immutable_targets_order_by_simple_name() {
    let compilation = compile(vec![
        immutable("Zoo", "Alpha"),
        immutable("Shop", "Zeta"),
        immutable("Shop", "Alpha"),
    ]);
    let plan = plan(&compilation);
    assert_eq!(
        names(&compilation, &plan.immutable),
        vec!["Shop.Alpha", "Zoo.Alpha", "Shop.Zeta"]
    );
}

#[test]
fn equality_includes_immutable_entities_unless_opted_out() {
    let raw = TypeDef::class("Shop", "Raw").with_attribute(
        AttributeData::new(GENERATED_IMMUTABLE)
            .with_named("GenerateEquality", AttributeValue::Bool(false)),
    );
    let point =
        TypeDef::class("Geo", "Point").with_attribute(AttributeData::new(GENERATED_EQUALITY));
    let compilation = compile(vec![immutable("Shop", "Item"), raw, point]);
    let plan = plan(&compilation);

    assert_eq!(names(&compilation, &plan.equality), vec!["Shop.Item", "Geo.Point"]);
    assert_eq!(names(&compilation, &plan.immutable), vec!["Shop.Item", "Shop.Raw"]);
}

#[test]
fn derived_entities_inherit_the_request() {
    let mut derived = TypeDef::class("Shop", "Book");
    derived.base_type = Some(TypeRef::named("Shop.Item"));
    let compilation = compile(vec![immutable("Shop", "Item"), derived]);
    let plan = plan(&compilation);
    assert_eq!(names(&compilation, &plan.immutable), vec!["Shop.Book", "Shop.Item"]);
}

#[test]
fn lifecycle_targets_and_empty_plan() {
    let mut release = MethodDef::new("Release");
    release.attributes = vec![AttributeData::new(DISPOSE_METHOD)];
    let service = TypeDef::class("App", "Service").with_member(Member::Method(release));
    let compilation = compile(vec![service]);
    let plan = plan(&compilation);
    assert_eq!(names(&compilation, &plan.lifecycle), vec!["App.Service"]);
    assert_eq!(plan.len(), 1);

    let empty = compile(vec![TypeDef::class("App", "Plain")]);
    assert!(self::plan(&empty).is_empty());
}
