//! Structural immutability check.
//!
//! A type is immutable when it is a scalar, a string or an enum, when it
//! carries an immutability marker, when it is allow-listed, or when it is a
//! well-known read-only shape whose type arguments are themselves
//! immutable. Arrays only count when the caller opts in.
//!
//! The walk memoizes every visited reference. A reference met again while
//! it is still being checked is assumed immutable, which is what makes
//! self-referential constraints such as `T : IComparable<T>` terminate.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::compilation::Compilation;
use crate::types::{SpecialType, TypeKind, TypeParameter, TypeRef};
use crate::vocabulary::{GENERATED_IMMUTABLE, IMMUTABLE};

/// Framework types known to be immutable regardless of arguments.
const IMMUTABLE_LEAVES: &[&str] = &[
    "System.Attribute",
    "System.DateTime",
    "System.DateTimeOffset",
    "System.TimeSpan",
    "System.Type",
    "System.Uri",
    "System.Version",
    "System.Guid",
];

/// Read-only wrappers: immutable when every type argument is.
const IMMUTABLE_WRAPPERS: &[&str] = &[
    "System.Collections.Generic.IReadOnlyList`1",
    "System.Collections.Generic.IReadOnlyCollection`1",
    "System.Nullable`1",
    "System.Tuple`1",
    "System.Tuple`2",
    "System.Tuple`3",
    "System.Collections.Immutable.IImmutableList`1",
    "System.Collections.Immutable.IImmutableQueue`1",
    "System.Collections.Immutable.IImmutableSet`1",
    "System.Collections.Immutable.IImmutableStack`1",
    "System.Collections.Immutable.ImmutableArray`1",
    "System.Collections.Immutable.ImmutableHashSet`1",
    "System.Collections.Immutable.ImmutableList`1",
    "System.Collections.Immutable.ImmutableQueue`1",
    "System.Collections.Immutable.ImmutableSortedSet`1",
    "System.Collections.Immutable.ImmutableStack`1",
    "System.Collections.Immutable.IImmutableDictionary`2",
    "System.Collections.Immutable.ImmutableDictionary`2",
    "System.Collections.Immutable.ImmutableSortedDictionary`2",
];

/// Knobs for [`Compilation::is_immutable`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImmutabilityRules {
    pub treat_arrays_as_immutable: bool,
    /// Definition names declared immutable with `TreatAsImmutable`.
    pub allow_list: FxHashSet<String>,
}

impl ImmutabilityRules {
    pub fn allows(&self, ty: &TypeRef) -> bool {
        ty.definition_name()
            .is_some_and(|name| self.allow_list.contains(name))
    }
}

impl Compilation {
    /// Whether `ty` is transitively immutable. Generic parameters are looked
    /// up in `scope` and are immutable when one of their constraint types is.
    pub fn is_immutable(
        &self,
        ty: &TypeRef,
        scope: &[TypeParameter],
        rules: &ImmutabilityRules,
    ) -> bool {
        let mut seen = FxHashMap::default();
        self.immutable_walk(ty, scope, rules, &mut seen)
    }

    /// Whether the definition behind `ty` carries `[Immutable]` or
    /// `[GeneratedImmutable]`, possibly through a base type.
    pub fn is_marked_immutable(&self, ty: &TypeRef) -> bool {
        self.resolve(ty).is_some_and(|def| {
            self.has_attribute_flattened(def, IMMUTABLE)
                || self.has_attribute_flattened(def, GENERATED_IMMUTABLE)
        })
    }

    fn immutable_walk(
        &self,
        ty: &TypeRef,
        scope: &[TypeParameter],
        rules: &ImmutabilityRules,
        seen: &mut FxHashMap<TypeRef, bool>,
    ) -> bool {
        if let Some(&known) = seen.get(ty) {
            return known;
        }
        seen.insert(ty.clone(), true);
        let immutable = self.immutable_step(ty, scope, rules, seen);
        seen.insert(ty.clone(), immutable);
        immutable
    }

    fn immutable_step(
        &self,
        ty: &TypeRef,
        scope: &[TypeParameter],
        rules: &ImmutabilityRules,
        seen: &mut FxHashMap<TypeRef, bool>,
    ) -> bool {
        match ty {
            TypeRef::Parameter { name } => scope
                .iter()
                .find(|p| &p.name == name)
                .is_some_and(|param| {
                    param
                        .constraints
                        .iter()
                        .any(|c| self.immutable_walk(c, scope, rules, seen))
                }),
            TypeRef::Array { element, .. } => {
                rules.treat_arrays_as_immutable && self.immutable_walk(element, scope, rules, seen)
            }
            TypeRef::Tuple { elements } => elements
                .iter()
                .all(|e| self.immutable_walk(e, scope, rules, seen)),
            TypeRef::Named { name, args } => {
                if rules.allows(ty) || self.is_marked_immutable(ty) {
                    return true;
                }
                if IMMUTABLE_LEAVES.contains(&name.as_str()) {
                    return true;
                }
                if let Some(def) = self.resolve(ty) {
                    if def.kind == TypeKind::Enum
                        || matches!(
                            def.special,
                            Some(SpecialType::String | SpecialType::DateTime | SpecialType::Enum)
                        )
                        || def.special.is_some_and(SpecialType::is_scalar)
                    {
                        return true;
                    }
                }
                IMMUTABLE_WRAPPERS.contains(&name.as_str())
                    && args
                        .iter()
                        .all(|a| self.immutable_walk(a, scope, rules, seen))
            }
        }
    }
}
