//! Attribute vocabulary recognized by the generators.
//!
//! Attributes are matched by metadata name. The flag enums mirror the
//! runtime support library's enums value for value, since their numeric
//! values are what the front end serializes.

use bitflags::bitflags;

use crate::types::{AttributeData, AttributeValue};

pub const GENERATED_EQUALITY: &str = "Uno.GeneratedEqualityAttribute";
pub const EQUALITY_IGNORE: &str = "Uno.EqualityIgnoreAttribute";
pub const EQUALITY_HASH: &str = "Uno.EqualityHashAttribute";
pub const EQUALITY_KEY: &str = "Uno.EqualityKeyAttribute";
pub const DATA_ANNOTATIONS_KEY: &str = "System.ComponentModel.DataAnnotations.KeyAttribute";
pub const EQUALITY_COMPARER_OPTIONS: &str = "Uno.Equality.EqualityComparerOptionsAttribute";

pub const GENERATED_IMMUTABLE: &str = "Uno.GeneratedImmutableAttribute";
pub const IMMUTABLE: &str = "Uno.ImmutableAttribute";
pub const IMMUTABLE_BUILDER: &str = "Uno.ImmutableBuilderAttribute";
pub const IMMUTABLE_COPY_IGNORE: &str = "Uno.ImmutableAttributeCopyIgnoreAttribute";
pub const IMMUTABLE_GENERATION_OPTIONS: &str = "Uno.ImmutableGenerationOptionsAttribute";
pub const TREAT_AS_IMMUTABLE: &str = "Uno.TreatAsImmutableAttribute";

pub const CONSTRUCTOR_METHOD: &str = "Uno.ConstructorMethodAttribute";
pub const DISPOSE_METHOD: &str = "Uno.DisposeMethodAttribute";
pub const FINALIZER_METHOD: &str = "Uno.FinalizerMethodAttribute";

/// Types whose presence in the compilation switches optional features on.
pub const KEY_EQUATABLE: &str = "Uno.Equality.IKeyEquatable";
pub const KEY_EQUATABLE_GENERIC: &str = "Uno.Equality.IKeyEquatable`1";
pub const OPTION: &str = "Uno.Option";
pub const JSON_CONVERT: &str = "Newtonsoft.Json.JsonConvert";
pub const PURE_ATTRIBUTE: &str = "System.Diagnostics.Contracts.PureAttribute";

/// Default copy-ignore patterns: generator markers never move to builders.
pub const DEFAULT_COPY_IGNORE: &[&str] = &[r"^Uno\.Immutable", r"^Uno\.Equality"];

bitflags! {
    /// `CollectionComparerMode`; `Default` and `Unsorted` are both zero.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct CollectionMode: u8 {
        const SORTED = 1;
        const NULL_IS_EMPTY = 2;
    }
}

bitflags! {
    /// `StringComparerMode`; `Default` is ordinal, null distinct from empty.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StringMode: u8 {
        const IGNORE_CASE = 1;
        const EMPTY_EQUALS_NULL = 2;
    }
}

/// How an `[EqualityKey]` member takes part in key equality.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyEqualityMode {
    /// Key equality when the member type supports it, plain equality otherwise.
    #[default]
    Auto,
    UseKeyEquality,
    UseEquality,
}

impl KeyEqualityMode {
    pub fn from_value(value: i64) -> Self {
        match value {
            1 => KeyEqualityMode::UseKeyEquality,
            2 => KeyEqualityMode::UseEquality,
            _ => KeyEqualityMode::Auto,
        }
    }

    /// Mode declared by an `[EqualityKey]` attribute; `Auto` when omitted.
    pub fn of(attribute: &AttributeData) -> Self {
        attribute
            .ctor_arg(0)
            .and_then(AttributeValue::as_int)
            .map_or(KeyEqualityMode::Auto, Self::from_value)
    }
}

/// Per-member `[EqualityComparerOptions]` settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComparerOptions {
    /// `None` when `CollectionMode` was not given explicitly.
    pub collection: Option<CollectionMode>,
    pub string: StringMode,
}

impl ComparerOptions {
    pub fn of(attribute: Option<&AttributeData>) -> Self {
        let Some(attribute) = attribute else {
            return ComparerOptions::default();
        };
        let flags = |name: &str| {
            attribute
                .named(name)
                .and_then(AttributeValue::as_int)
                .map(|v| u8::try_from(v).unwrap_or_default())
        };
        ComparerOptions {
            collection: flags("CollectionMode").map(CollectionMode::from_bits_truncate),
            string: flags("StringMode")
                .map(StringMode::from_bits_truncate)
                .unwrap_or_default(),
        }
    }
}

/// First attribute of the given class.
pub fn find_attribute<'a>(attributes: &'a [AttributeData], class: &str) -> Option<&'a AttributeData> {
    attributes.iter().find(|a| a.class == class)
}

pub fn has_attribute(attributes: &[AttributeData], class: &str) -> bool {
    find_attribute(attributes, class).is_some()
}
