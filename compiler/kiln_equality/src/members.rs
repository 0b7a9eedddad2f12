//! Member classification.
//!
//! Every instance property and field that is readable from inside the type
//! takes part in equality unless it, or the definition of its type, is
//! marked `[EqualityIgnore]`. `[EqualityKey]` (or the data annotations
//! `[Key]`) adds the member to both the hash and the key sets;
//! `[EqualityHash]` adds it to the hash set only.

use kiln_model::vocabulary::{
    find_attribute, has_attribute, ComparerOptions, KeyEqualityMode, DATA_ANNOTATIONS_KEY,
    EQUALITY_COMPARER_OPTIONS, EQUALITY_HASH, EQUALITY_IGNORE, EQUALITY_KEY,
};
use kiln_model::{
    Accessibility, AttributeData, Compilation, Location, Member, MemberQuery, TypeDef,
    TypeParameter, TypeRef,
};

/// A member as seen by the equality generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EqualityMember<'a> {
    pub name: &'a str,
    pub ty: &'a TypeRef,
    /// Always resolved: never [`KeyEqualityMode::Auto`].
    pub mode: KeyEqualityMode,
    pub options: ComparerOptions,
    pub location: Option<&'a Location>,
}

impl EqualityMember<'_> {
    pub fn uses_key_equality(&self) -> bool {
        self.mode == KeyEqualityMode::UseKeyEquality
    }
}

/// The three member sets of one type, each in declaration order
/// (properties first, then fields).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberSets<'a> {
    pub equality: Vec<EqualityMember<'a>>,
    pub hash: Vec<EqualityMember<'a>>,
    pub key: Vec<EqualityMember<'a>>,
}

/// Classify the members declared on `def` itself. Inherited members are
/// covered by chaining into the base implementation.
pub fn classify<'a>(compilation: &'a Compilation, def: &'a TypeDef) -> MemberSets<'a> {
    let mut sets = MemberSets::default();
    let query = MemberQuery::properties().at_least(Accessibility::PrivateProtected);
    let properties = compilation.enumerate_members(def, query);
    let query = MemberQuery::fields().at_least(Accessibility::PrivateProtected);
    let fields = compilation.enumerate_members(def, query);

    for declared in properties.iter().chain(&fields) {
        let (ty, location) = match declared.member {
            Member::Property(p) if p.is_write_only || p.is_indexer => continue,
            Member::Property(p) => (&p.ty, p.location.as_ref()),
            Member::Field(f) => (&f.ty, f.location.as_ref()),
            Member::Method(_) => continue,
        };
        let attributes = declared.member.attributes();
        if has_attribute(attributes, EQUALITY_IGNORE) || is_ignored_type(compilation, ty) {
            tracing::debug!(member = declared.member.name(), "ignored for equality");
            continue;
        }

        let member = EqualityMember {
            name: declared.member.name(),
            ty,
            mode: KeyEqualityMode::UseEquality,
            options: ComparerOptions::of(find_attribute(attributes, EQUALITY_COMPARER_OPTIONS)),
            location,
        };

        if let Some(mode) = key_mode(attributes) {
            let mode = match mode {
                KeyEqualityMode::Auto
                    if is_type_key_equatable(compilation, ty, &def.type_parameters) =>
                {
                    KeyEqualityMode::UseKeyEquality
                }
                KeyEqualityMode::Auto => KeyEqualityMode::UseEquality,
                explicit => explicit,
            };
            sets.hash.push(member.clone());
            sets.key.push(EqualityMember {
                mode,
                ..member.clone()
            });
        } else if has_attribute(attributes, EQUALITY_HASH) {
            sets.hash.push(member.clone());
        }
        sets.equality.push(member);
    }
    sets
}

/// Whether `def` declares at least one key member.
pub fn has_key_members(compilation: &Compilation, def: &TypeDef) -> bool {
    !classify(compilation, def).key.is_empty()
}

/// Whether values of `ty` can be compared with `KeyEquals`: the type
/// implements `IKeyEquatable`, or declares a key property and so will
/// implement it once generated.
pub fn is_type_key_equatable(
    compilation: &Compilation,
    ty: &TypeRef,
    scope: &[TypeParameter],
) -> bool {
    compilation.is_key_equatable(ty, scope)
        || compilation
            .resolve(ty)
            .is_some_and(|def| def.properties().any(|p| key_mode(&p.attributes).is_some()))
}

fn key_mode(attributes: &[AttributeData]) -> Option<KeyEqualityMode> {
    find_attribute(attributes, EQUALITY_KEY)
        .map(KeyEqualityMode::of)
        .or_else(|| has_attribute(attributes, DATA_ANNOTATIONS_KEY).then_some(KeyEqualityMode::Auto))
}

fn is_ignored_type(compilation: &Compilation, ty: &TypeRef) -> bool {
    compilation
        .resolve(ty)
        .is_some_and(|def| has_attribute(&def.attributes, EQUALITY_IGNORE))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
