//! Built-in catalog of core library types.
//!
//! Front ends usually serialize only the user's own declarations plus the few
//! referenced third-party types. The generators still reason about framework
//! types (collection interfaces, immutable collections, primitives), so their
//! shapes are provided here and merged into every [`Compilation`] that asks
//! for them.
//!
//! [`Compilation`]: crate::Compilation

use crate::types::{
    Accessibility, MethodDef, Member, Origin, ParameterDef, SpecialType, TypeDef, TypeKind,
    TypeParameter, TypeRef,
};

const GENERIC: &str = "System.Collections.Generic";
const IMMUTABLE: &str = "System.Collections.Immutable";

fn metadata(namespace: &str, name: &str, kind: TypeKind, params: &[&str]) -> TypeDef {
    TypeDef {
        namespace: namespace.to_string(),
        name: name.to_string(),
        type_parameters: params.iter().map(|p| TypeParameter::new(*p)).collect(),
        kind,
        accessibility: Accessibility::Public,
        is_abstract: kind == TypeKind::Interface,
        is_static: false,
        is_sealed: false,
        is_partial: false,
        origin: Origin::Metadata,
        special: None,
        base_type: match kind {
            TypeKind::Class => Some(TypeRef::named("System.Object")),
            TypeKind::Struct => Some(TypeRef::named("System.ValueType")),
            TypeKind::Enum => Some(TypeRef::named("System.Enum")),
            TypeKind::Interface => None,
        },
        interfaces: Vec::new(),
        attributes: Vec::new(),
        members: Vec::new(),
        location: None,
    }
}

fn p(name: &str) -> TypeRef {
    TypeRef::parameter(name)
}

fn g(name: &str, args: &[TypeRef]) -> TypeRef {
    TypeRef::generic(name, args.to_vec())
}

fn kvp(key: TypeRef, value: TypeRef) -> TypeRef {
    g("System.Collections.Generic.KeyValuePair`2", &[key, value])
}

/// `Equals(object)` and `GetHashCode()` overrides for types with value semantics.
fn value_semantics(mut def: TypeDef) -> TypeDef {
    let mut equals = MethodDef::new("Equals");
    equals.accessibility = Accessibility::Public;
    equals.is_override = true;
    equals.return_type = TypeRef::named("System.Boolean");
    equals.parameters = vec![ParameterDef::new("obj", TypeRef::named("System.Object"))];

    let mut hash = MethodDef::new("GetHashCode");
    hash.accessibility = Accessibility::Public;
    hash.is_override = true;
    hash.return_type = TypeRef::named("System.Int32");

    def.members.push(Member::Method(equals));
    def.members.push(Member::Method(hash));
    def
}

fn special(mut def: TypeDef, special: SpecialType) -> TypeDef {
    def.special = Some(special);
    def
}

fn implementing(mut def: TypeDef, interfaces: Vec<TypeRef>) -> TypeDef {
    def.interfaces = interfaces;
    def
}

fn primitive(name: &str, kind: SpecialType) -> TypeDef {
    let def = metadata("System", name, TypeKind::Struct, &[]);
    value_semantics(special(def, kind))
}

/// All catalog types.
pub fn core_library() -> Vec<TypeDef> {
    let mut types = Vec::new();

    let mut object = metadata("System", "Object", TypeKind::Class, &[]);
    object.base_type = None;
    types.push(special(object, SpecialType::Object));

    let mut value_type = metadata("System", "ValueType", TypeKind::Class, &[]);
    value_type.is_abstract = true;
    types.push(value_semantics(special(value_type, SpecialType::ValueType)));

    let mut enum_def = metadata("System", "Enum", TypeKind::Class, &[]);
    enum_def.is_abstract = true;
    enum_def.base_type = Some(TypeRef::named("System.ValueType"));
    types.push(value_semantics(special(enum_def, SpecialType::Enum)));

    let mut array = metadata("System", "Array", TypeKind::Class, &[]);
    array.is_abstract = true;
    array.interfaces = vec![TypeRef::named("System.Collections.ICollection")];
    types.push(special(array, SpecialType::Array));

    types.push(special(
        metadata("System", "Void", TypeKind::Struct, &[]),
        SpecialType::Void,
    ));

    for (name, kind) in [
        ("Boolean", SpecialType::Boolean),
        ("Char", SpecialType::Char),
        ("SByte", SpecialType::SByte),
        ("Byte", SpecialType::Byte),
        ("Int16", SpecialType::Int16),
        ("UInt16", SpecialType::UInt16),
        ("Int32", SpecialType::Int32),
        ("UInt32", SpecialType::UInt32),
        ("Int64", SpecialType::Int64),
        ("UInt64", SpecialType::UInt64),
        ("Decimal", SpecialType::Decimal),
        ("Single", SpecialType::Single),
        ("Double", SpecialType::Double),
        ("IntPtr", SpecialType::IntPtr),
        ("UIntPtr", SpecialType::UIntPtr),
        ("DateTime", SpecialType::DateTime),
    ] {
        types.push(primitive(name, kind));
    }

    let mut string = metadata("System", "String", TypeKind::Class, &[]);
    string.is_sealed = true;
    string.interfaces = vec![g(
        "System.Collections.Generic.IEnumerable`1",
        &[TypeRef::named("System.Char")],
    )];
    types.push(value_semantics(special(string, SpecialType::String)));

    for name in ["DateTimeOffset", "TimeSpan", "Guid"] {
        types.push(value_semantics(metadata("System", name, TypeKind::Struct, &[])));
    }
    for name in ["Uri", "Version", "Type"] {
        types.push(value_semantics(metadata("System", name, TypeKind::Class, &[])));
    }
    let mut attribute = metadata("System", "Attribute", TypeKind::Class, &[]);
    attribute.is_abstract = true;
    types.push(value_semantics(attribute));

    types.push(value_semantics(metadata(
        "System",
        "Nullable",
        TypeKind::Struct,
        &["T"],
    )));
    types.push(metadata(
        "System",
        "IEquatable",
        TypeKind::Interface,
        &["T"],
    ));
    types.push(metadata(
        "System",
        "Func",
        TypeKind::Class,
        &["T", "TResult"],
    ));
    for arity in 1..=3 {
        let params: Vec<String> = (1..=arity).map(|i| format!("T{i}")).collect();
        let params: Vec<&str> = params.iter().map(String::as_str).collect();
        types.push(value_semantics(metadata(
            "System",
            "Tuple",
            TypeKind::Class,
            &params,
        )));
    }

    // Non-generic collections
    types.push(metadata(
        "System.Collections",
        "IEnumerable",
        TypeKind::Interface,
        &[],
    ));
    types.push(implementing(
        metadata("System.Collections", "ICollection", TypeKind::Interface, &[]),
        vec![TypeRef::named("System.Collections.IEnumerable")],
    ));

    // Generic collection interfaces
    let enumerable = |t: TypeRef| g("System.Collections.Generic.IEnumerable`1", &[t]);
    types.push(implementing(
        metadata(GENERIC, "IEnumerable", TypeKind::Interface, &["T"]),
        vec![TypeRef::named("System.Collections.IEnumerable")],
    ));
    types.push(implementing(
        metadata(GENERIC, "ICollection", TypeKind::Interface, &["T"]),
        vec![enumerable(p("T"))],
    ));
    types.push(implementing(
        metadata(GENERIC, "IList", TypeKind::Interface, &["T"]),
        vec![g("System.Collections.Generic.ICollection`1", &[p("T")])],
    ));
    types.push(implementing(
        metadata(GENERIC, "ISet", TypeKind::Interface, &["T"]),
        vec![g("System.Collections.Generic.ICollection`1", &[p("T")])],
    ));
    types.push(implementing(
        metadata(GENERIC, "IReadOnlyCollection", TypeKind::Interface, &["T"]),
        vec![enumerable(p("T"))],
    ));
    types.push(implementing(
        metadata(GENERIC, "IReadOnlyList", TypeKind::Interface, &["T"]),
        vec![g(
            "System.Collections.Generic.IReadOnlyCollection`1",
            &[p("T")],
        )],
    ));
    types.push(implementing(
        metadata(GENERIC, "IDictionary", TypeKind::Interface, &["TKey", "TValue"]),
        vec![g(
            "System.Collections.Generic.ICollection`1",
            &[kvp(p("TKey"), p("TValue"))],
        )],
    ));
    types.push(implementing(
        metadata(
            GENERIC,
            "IReadOnlyDictionary",
            TypeKind::Interface,
            &["TKey", "TValue"],
        ),
        vec![g(
            "System.Collections.Generic.IReadOnlyCollection`1",
            &[kvp(p("TKey"), p("TValue"))],
        )],
    ));
    types.push(metadata(
        GENERIC,
        "IEqualityComparer",
        TypeKind::Interface,
        &["T"],
    ));
    types.push(metadata(
        GENERIC,
        "KeyValuePair",
        TypeKind::Struct,
        &["TKey", "TValue"],
    ));

    // Mutable generic collections
    types.push(implementing(
        metadata(GENERIC, "List", TypeKind::Class, &["T"]),
        vec![
            g("System.Collections.Generic.IList`1", &[p("T")]),
            g("System.Collections.Generic.IReadOnlyList`1", &[p("T")]),
            TypeRef::named("System.Collections.ICollection"),
        ],
    ));
    types.push(implementing(
        metadata(GENERIC, "HashSet", TypeKind::Class, &["T"]),
        vec![
            g("System.Collections.Generic.ISet`1", &[p("T")]),
            g("System.Collections.Generic.IReadOnlyCollection`1", &[p("T")]),
        ],
    ));
    types.push(implementing(
        metadata(GENERIC, "Dictionary", TypeKind::Class, &["TKey", "TValue"]),
        vec![
            g(
                "System.Collections.Generic.IDictionary`2",
                &[p("TKey"), p("TValue")],
            ),
            g(
                "System.Collections.Generic.IReadOnlyDictionary`2",
                &[p("TKey"), p("TValue")],
            ),
            TypeRef::named("System.Collections.ICollection"),
        ],
    ));

    // Immutable collection interfaces
    types.push(implementing(
        metadata(IMMUTABLE, "IImmutableList", TypeKind::Interface, &["T"]),
        vec![g("System.Collections.Generic.IReadOnlyList`1", &[p("T")])],
    ));
    types.push(implementing(
        metadata(IMMUTABLE, "IImmutableSet", TypeKind::Interface, &["T"]),
        vec![g(
            "System.Collections.Generic.IReadOnlyCollection`1",
            &[p("T")],
        )],
    ));
    for name in ["IImmutableQueue", "IImmutableStack"] {
        types.push(implementing(
            metadata(IMMUTABLE, name, TypeKind::Interface, &["T"]),
            vec![enumerable(p("T"))],
        ));
    }
    types.push(implementing(
        metadata(
            IMMUTABLE,
            "IImmutableDictionary",
            TypeKind::Interface,
            &["TKey", "TValue"],
        ),
        vec![g(
            "System.Collections.Generic.IReadOnlyDictionary`2",
            &[p("TKey"), p("TValue")],
        )],
    ));

    // Immutable collections
    types.push(value_semantics(implementing(
        metadata(IMMUTABLE, "ImmutableArray", TypeKind::Struct, &["T"]),
        vec![
            g("System.Collections.Immutable.IImmutableList`1", &[p("T")]),
            g("System.Collections.Generic.IList`1", &[p("T")]),
        ],
    )));
    types.push(implementing(
        metadata(IMMUTABLE, "ImmutableList", TypeKind::Class, &["T"]),
        vec![
            g("System.Collections.Immutable.IImmutableList`1", &[p("T")]),
            g("System.Collections.Generic.IList`1", &[p("T")]),
        ],
    ));
    for name in ["ImmutableHashSet", "ImmutableSortedSet"] {
        types.push(implementing(
            metadata(IMMUTABLE, name, TypeKind::Class, &["T"]),
            vec![
                g("System.Collections.Immutable.IImmutableSet`1", &[p("T")]),
                g("System.Collections.Generic.ISet`1", &[p("T")]),
            ],
        ));
    }
    types.push(implementing(
        metadata(IMMUTABLE, "ImmutableQueue", TypeKind::Class, &["T"]),
        vec![g(
            "System.Collections.Immutable.IImmutableQueue`1",
            &[p("T")],
        )],
    ));
    types.push(implementing(
        metadata(IMMUTABLE, "ImmutableStack", TypeKind::Class, &["T"]),
        vec![g(
            "System.Collections.Immutable.IImmutableStack`1",
            &[p("T")],
        )],
    ));
    for name in ["ImmutableDictionary", "ImmutableSortedDictionary"] {
        types.push(implementing(
            metadata(IMMUTABLE, name, TypeKind::Class, &["TKey", "TValue"]),
            vec![
                g(
                    "System.Collections.Immutable.IImmutableDictionary`2",
                    &[p("TKey"), p("TValue")],
                ),
                g(
                    "System.Collections.Generic.IDictionary`2",
                    &[p("TKey"), p("TValue")],
                ),
            ],
        ));
    }

    types
}
