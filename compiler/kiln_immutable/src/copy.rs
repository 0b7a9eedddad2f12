//! Attribute copying from entity properties to builder properties.
//!
//! Every attribute of an entity property is repeated on the matching
//! builder property, unless one of the copy-ignore patterns in scope
//! matches its rendered text (`Ns.NameAttribute(args, Named = value)`).
//! Patterns come from the assembly (built-in defaults first), the type and
//! the property itself.

use kiln_model::names::display;
use kiln_model::{AttributeData, AttributeValue, EnumValue, TypeRef};
use regex::Regex;

/// Copy-ignore patterns of one type: assembly and type scope.
#[derive(Debug)]
pub struct CopyIgnore<'a> {
    assembly: &'a [Regex],
    type_level: Vec<Regex>,
}

impl<'a> CopyIgnore<'a> {
    pub fn new(assembly: &'a [Regex], type_level: Vec<Regex>) -> Self {
        CopyIgnore {
            assembly,
            type_level,
        }
    }

    /// Whether `attribute` stays off the builder. `property_level` holds
    /// the patterns declared on the property itself.
    pub fn is_ignored(&self, attribute: &AttributeData, property_level: &[Regex]) -> bool {
        let rendered = render_attribute(attribute);
        self.assembly
            .iter()
            .chain(&self.type_level)
            .chain(property_level)
            .any(|pattern| pattern.is_match(&rendered))
    }

    /// Attribute lines for the builder property, in declaration order.
    pub fn copied(&self, attributes: &[AttributeData], property_level: &[Regex]) -> Vec<String> {
        attributes
            .iter()
            .filter(|a| !self.is_ignored(a, property_level))
            .map(|a| format!("[global::{}]", render_attribute(a)))
            .collect()
    }
}

/// `Ns.NameAttribute`, or `Ns.NameAttribute(1, "x", Flag = true)` with arguments.
pub fn render_attribute(attribute: &AttributeData) -> String {
    let class = attribute.class.replace('+', ".");
    let args: Vec<String> = attribute
        .ctor_args
        .iter()
        .map(render_value)
        .chain(
            attribute
                .named_args
                .iter()
                .map(|a| format!("{} = {}", a.name, render_value(&a.value))),
        )
        .collect();
    if args.is_empty() {
        class
    } else {
        format!("{class}({})", args.join(", "))
    }
}

fn render_value(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Null => "null".to_string(),
        AttributeValue::Bool(b) => b.to_string(),
        AttributeValue::Int(i) => i.to_string(),
        AttributeValue::String(s) => format!("\"{}\"", escape(s)),
        AttributeValue::Type(ty) => format!("typeof({})", display(ty)),
        AttributeValue::Enum(e) => render_enum(e),
        AttributeValue::Array(items) if items.is_empty() => "new object[0]".to_string(),
        AttributeValue::Array(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("new[] {{ {} }}", items.join(", "))
        }
    }
}

fn render_enum(value: &EnumValue) -> String {
    let ty = display(&TypeRef::named(value.type_name.clone()));
    match &value.member {
        Some(member) => format!("{ty}.{member}"),
        None => format!("({ty}){}", value.value),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
