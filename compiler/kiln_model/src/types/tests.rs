use super::*;
use pretty_assertions::assert_eq;

#[test]
fn full_name_appends_arity_for_generics() {
    let mut def = TypeDef::class("My.App", "Entity");
    assert_eq!(def.full_name(), "My.App.Entity");

    def.type_parameters = vec![TypeParameter::new("T"), TypeParameter::new("U")];
    assert_eq!(def.full_name(), "My.App.Entity`2");
}

#[test]
fn full_name_without_namespace() {
    let def = TypeDef::class("", "Global");
    assert_eq!(def.full_name(), "Global");
}

#[test]
fn self_ref_uses_own_parameters() {
    let mut def = TypeDef::class("Ns", "Box");
    def.type_parameters = vec![TypeParameter::new("T")];
    assert_eq!(
        def.self_ref(),
        TypeRef::generic("Ns.Box`1", vec![TypeRef::parameter("T")])
    );
}

#[test]
fn substitute_replaces_nested_parameters() {
    let params = vec![TypeParameter::new("T"), TypeParameter::new("U")];
    let ty = TypeRef::generic(
        "System.Collections.Generic.IReadOnlyDictionary`2",
        vec![
            TypeRef::parameter("T"),
            TypeRef::array(TypeRef::parameter("U")),
        ],
    );

    let substituted = ty.substitute(
        &params,
        &[TypeRef::named("System.String"), TypeRef::named("System.Int32")],
    );

    assert_eq!(
        substituted,
        TypeRef::generic(
            "System.Collections.Generic.IReadOnlyDictionary`2",
            vec![
                TypeRef::named("System.String"),
                TypeRef::array(TypeRef::named("System.Int32")),
            ],
        )
    );
}

#[test]
fn substitute_leaves_unknown_parameters() {
    let params = vec![TypeParameter::new("T")];
    let ty = TypeRef::parameter("X");
    assert_eq!(ty.substitute(&params, &[TypeRef::named("A")]), ty);
}

#[test]
fn accessibility_orders_from_private_to_public() {
    assert!(Accessibility::Private < Accessibility::Protected);
    assert!(Accessibility::Protected < Accessibility::Internal);
    assert!(Accessibility::Internal < Accessibility::Public);
    assert_eq!(Accessibility::ProtectedInternal.as_csharp(), "protected internal");
}

#[test]
fn attribute_value_accessors() {
    let attr = AttributeData::new("Uno.EqualityKeyAttribute")
        .with_arg(AttributeValue::Enum(EnumValue {
            type_name: "Uno.Equality.KeyEqualityMode".into(),
            value: 2,
            member: Some("UseEquality".into()),
        }))
        .with_named("Flag", AttributeValue::Bool(true));

    assert_eq!(attr.ctor_arg(0).and_then(AttributeValue::as_int), Some(2));
    assert_eq!(attr.named("Flag").and_then(AttributeValue::as_bool), Some(true));
    assert_eq!(attr.named("Missing"), None);
}

#[test]
fn property_defaults_from_json() {
    let json = r#"{ "name": "Count", "type": { "kind": "named", "name": "System.Int32" } }"#;
    let prop: PropertyDef = serde_json::from_str(json).unwrap();

    assert_eq!(prop.accessibility, Accessibility::Public);
    assert!(prop.is_auto);
    assert!(prop.is_read_only());
    assert_eq!(prop.getter_accessibility(), Accessibility::Public);
}

#[test]
fn type_def_from_json() {
    let json = r#"{
        "namespace": "Sample",
        "name": "Point",
        "is_partial": true,
        "attributes": [ { "class": "Uno.GeneratedImmutableAttribute" } ],
        "members": [
            { "member": "property", "name": "X", "type": { "kind": "named", "name": "System.Int32" } },
            { "member": "field", "name": "_cache", "type": { "kind": "array", "element": { "kind": "named", "name": "System.Byte" } } },
            { "member": "method", "name": "GetHash_X", "is_static": true,
              "return_type": { "kind": "named", "name": "System.Int32" },
              "parameters": [ { "name": "value", "type": { "kind": "named", "name": "System.Int32" } } ] }
        ]
    }"#;
    let def: TypeDef = serde_json::from_str(json).unwrap();

    assert_eq!(def.full_name(), "Sample.Point");
    assert_eq!(def.kind, TypeKind::Class);
    assert_eq!(def.origin, Origin::Source);
    assert_eq!(def.properties().count(), 1);
    assert_eq!(def.fields().next().unwrap().accessibility, Accessibility::Private);
    assert_eq!(
        def.fields().next().unwrap().ty,
        TypeRef::array(TypeRef::named("System.Byte"))
    );
    let method = def.methods().next().unwrap();
    assert!(method.is_static);
    assert_eq!(method.parameters.len(), 1);
}

#[test]
fn attribute_values_from_json() {
    let json = r#"{
        "class": "Uno.TreatAsImmutableAttribute",
        "ctor_args": [ { "kind": "type", "value": { "kind": "named", "name": "Vendor.Money" } } ],
        "named_args": [ { "name": "Note", "value": { "kind": "null" } } ]
    }"#;
    let attr: AttributeData = serde_json::from_str(json).unwrap();

    assert_eq!(
        attr.ctor_arg(0).and_then(AttributeValue::as_type),
        Some(&TypeRef::named("Vendor.Money"))
    );
    assert_eq!(attr.named("Note"), Some(&AttributeValue::Null));
}

#[test]
fn type_parameter_constraint_detection() {
    assert!(!TypeParameter::new("T").is_constrained());
    assert!(TypeParameter::new("T")
        .with_constraint(TypeRef::named("Ns.IThing"))
        .is_constrained());
}
