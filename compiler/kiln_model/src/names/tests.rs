use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn generic_def(params: &[&str]) -> TypeDef {
    let mut def = TypeDef::class("My.Namespace", "MyType");
    def.type_parameters = params.iter().map(|p| TypeParameter::new(*p)).collect();
    def
}

#[test]
fn non_generic_names() {
    let names = SymbolNames::of(&TypeDef::class("My.Namespace", "MyType"));

    assert_eq!(names.name, "MyType");
    assert_eq!(names.generic_arguments, "");
    assert_eq!(names.name_with_generics, "MyType");
    assert_eq!(names.definition, "MyType");
    assert_eq!(names.file_path, "My/Namespace/MyType");
    assert_eq!(names.constraints, "");
    assert_eq!(names.full_name_with_generics, "global::My.Namespace.MyType");
}

#[test]
fn generic_names() {
    let names = SymbolNames::of(&generic_def(&["T1", "T2"]));

    assert_eq!(names.generic_arguments, "<T1, T2>");
    assert_eq!(names.name_with_generics, "MyType<T1, T2>");
    assert_eq!(names.name_for_xml, "MyType&lt;T1, T2&gt;");
    assert_eq!(names.definition, "MyType<,>");
    assert_eq!(names.file_safe_name, "MyType_T1_T2");
    assert_eq!(names.file_path, "My/Namespace/MyType_T1_T2");
    assert_eq!(
        names.full_name_with_generics,
        "global::My.Namespace.MyType<T1, T2>"
    );
}

#[test]
fn qualified_drops_global_alias() {
    assert_eq!(
        SymbolNames::of(&generic_def(&["T1", "T2"])).qualified(),
        "My.Namespace.MyType<T1, T2>"
    );
    assert_eq!(SymbolNames::of(&TypeDef::class("", "Loose")).qualified(), "Loose");
}

#[test]
fn single_parameter_definition_has_no_comma() {
    assert_eq!(SymbolNames::of(&generic_def(&["T"])).definition, "MyType<>");
}

#[test]
fn global_namespace_path() {
    let names = SymbolNames::of(&TypeDef::class("", "Loose"));
    assert_eq!(names.file_path, "Loose");
    assert_eq!(names.full_name_with_generics, "global::Loose");
}

#[test]
fn constraints_are_rendered_per_parameter() {
    let mut def = generic_def(&["T", "U", "V"]);
    def.type_parameters[0] = TypeParameter::new("T").with_constraint(TypeRef::named("Ns.IThing"));
    def.type_parameters[1].reference_type = true;
    def.type_parameters[1].constructor = true;

    assert_eq!(
        SymbolNames::of(&def).constraints,
        " where T : global::Ns.IThing where U : class, new()"
    );
}

#[test]
fn display_uses_keywords_and_global_prefix() {
    assert_eq!(display(&TypeRef::named("System.Int32")), "int");
    assert_eq!(display(&TypeRef::named("System.String")), "string");
    assert_eq!(display(&TypeRef::named("System.Guid")), "global::System.Guid");
    assert_eq!(
        display(&TypeRef::generic(
            "System.Collections.Generic.IReadOnlyDictionary`2",
            vec![TypeRef::named("System.String"), TypeRef::parameter("T")],
        )),
        "global::System.Collections.Generic.IReadOnlyDictionary<string, T>"
    );
}

#[test]
fn display_nullable_array_and_tuple() {
    assert_eq!(
        display(&TypeRef::generic(
            "System.Nullable`1",
            vec![TypeRef::named("System.Int64")]
        )),
        "long?"
    );
    assert_eq!(
        display(&TypeRef::Array {
            element: Box::new(TypeRef::named("System.Byte")),
            rank: 2
        }),
        "byte[,]"
    );
    assert_eq!(
        display(&TypeRef::Tuple {
            elements: vec![TypeRef::named("System.Int32"), TypeRef::named("Ns.Thing")]
        }),
        "(int, global::Ns.Thing)"
    );
}

#[test]
fn display_nested_type() {
    assert_eq!(
        display(&TypeRef::named("Ns.Outer+Inner")),
        "global::Ns.Outer.Inner"
    );
}

#[test]
fn friendly_display_drops_namespaces() {
    assert_eq!(
        display_friendly(&TypeRef::generic(
            "System.Collections.Generic.List`1",
            vec![TypeRef::named("Ns.Item")]
        )),
        "List<Item>"
    );
}

proptest! {
    #[test]
    fn file_names_differ_across_arity(arity_a in 0usize..5, arity_b in 0usize..5) {
        prop_assume!(arity_a != arity_b);
        let params_a: Vec<String> = (0..arity_a).map(|i| format!("T{i}")).collect();
        let params_b: Vec<String> = (0..arity_b).map(|i| format!("T{i}")).collect();
        let a = generic_def(&params_a.iter().map(String::as_str).collect::<Vec<_>>());
        let b = generic_def(&params_b.iter().map(String::as_str).collect::<Vec<_>>());

        prop_assert_ne!(SymbolNames::of(&a).file_path, SymbolNames::of(&b).file_path);
    }

    #[test]
    fn names_are_deterministic(ns in "[A-Z][a-z]{0,6}(\\.[A-Z][a-z]{0,6}){0,2}", name in "[A-Z][a-zA-Z0-9]{0,10}") {
        let def = TypeDef::class(ns.clone(), name.clone());
        prop_assert_eq!(SymbolNames::of(&def), SymbolNames::of(&def));
        let expected_path = format!("{}/{}", ns.replace('.', "/"), name);
        prop_assert_eq!(SymbolNames::of(&def).file_path, expected_path);
    }
}
