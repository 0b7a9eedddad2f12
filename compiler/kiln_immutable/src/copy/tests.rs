use super::*;
use kiln_model::vocabulary::DEFAULT_COPY_IGNORE;
use pretty_assertions::assert_eq;

fn patterns(sources: &[&str]) -> Vec<Regex> {
    sources.iter().map(|p| Regex::new(p).unwrap()).collect()
}

#[test]
fn renders_bare_attribute() {
    let attribute = AttributeData::new("System.ComponentModel.DataAnnotations.RequiredAttribute");
    assert_eq!(
        render_attribute(&attribute),
        "System.ComponentModel.DataAnnotations.RequiredAttribute"
    );
}

#[test]
fn renders_arguments_in_order() {
    let attribute = AttributeData::new("Docs.NoteAttribute")
        .with_arg(AttributeValue::Int(3))
        .with_arg(AttributeValue::String("say \"hi\"\n".to_string()))
        .with_arg(AttributeValue::Null)
        .with_named("Visible", AttributeValue::Bool(true));
    assert_eq!(
        render_attribute(&attribute),
        r#"Docs.NoteAttribute(3, "say \"hi\"\n", null, Visible = true)"#
    );
}

#[test]
fn renders_types_enums_and_arrays() {
    let attribute = AttributeData::new("Outer+NestedAttribute")
        .with_arg(AttributeValue::Type(TypeRef::generic(
            "System.Collections.Generic.List`1",
            vec![TypeRef::named("System.Int32")],
        )))
        .with_arg(AttributeValue::Enum(EnumValue {
            type_name: "Docs.Level".to_string(),
            value: 2,
            member: Some("High".to_string()),
        }))
        .with_arg(AttributeValue::Enum(EnumValue {
            type_name: "Docs.Level".to_string(),
            value: 9,
            member: None,
        }))
        .with_arg(AttributeValue::Array(Vec::new()))
        .with_arg(AttributeValue::Array(vec![
            AttributeValue::Int(1),
            AttributeValue::Int(2),
        ]));
    assert_eq!(
        render_attribute(&attribute),
        "Outer.NestedAttribute(typeof(global::System.Collections.Generic.List<int>), \
         global::Docs.Level.High, (global::Docs.Level)9, new object[0], new[] { 1, 2 })"
    );
}

#[test]
fn default_patterns_drop_generator_markers() {
    let defaults = patterns(DEFAULT_COPY_IGNORE);
    let copy = CopyIgnore::new(&defaults, Vec::new());
    let attributes = vec![
        AttributeData::new("Uno.ImmutableAttribute"),
        AttributeData::new("Uno.EqualityHashAttribute"),
        AttributeData::new("Docs.TagAttribute").with_arg(AttributeValue::String("a".to_string())),
    ];
    assert_eq!(
        copy.copied(&attributes, &[]),
        vec![r#"[global::Docs.TagAttribute("a")]"#.to_string()]
    );
}

#[test]
fn type_and_property_patterns_add_up() {
    let defaults = patterns(DEFAULT_COPY_IGNORE);
    let copy = CopyIgnore::new(&defaults, patterns(&[r"^Docs\.Tag"]));
    let tag = AttributeData::new("Docs.TagAttribute");
    let note = AttributeData::new("Docs.NoteAttribute");
    let json = AttributeData::new("Newtonsoft.Json.JsonPropertyAttribute");

    assert!(copy.is_ignored(&tag, &[]));
    assert!(!copy.is_ignored(&note, &[]));
    assert!(copy.is_ignored(&note, &patterns(&["Note"])));
    assert_eq!(
        copy.copied(&[tag, note, json], &[]),
        vec![
            "[global::Docs.NoteAttribute]".to_string(),
            "[global::Newtonsoft.Json.JsonPropertyAttribute]".to_string(),
        ]
    );
}

#[test]
fn patterns_match_rendered_arguments() {
    let copy = CopyIgnore::new(&[], patterns(&[r"Level = 2\)$"]));
    let low = AttributeData::new("Docs.RankAttribute").with_named("Level", AttributeValue::Int(1));
    let high = AttributeData::new("Docs.RankAttribute").with_named("Level", AttributeValue::Int(2));
    assert!(!copy.is_ignored(&low, &[]));
    assert!(copy.is_ignored(&high, &[]));
}
