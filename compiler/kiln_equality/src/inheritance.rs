//! Base type equality detection.

use kiln_model::names::display_friendly;
use kiln_model::vocabulary::GENERATED_EQUALITY;
use kiln_model::{Origin, TypeDef};

use crate::members::has_key_members;
use crate::EqualityGenerator;

const ROOTS: &[&str] = &["System.Object", "System.ValueType"];

/// What the generated code may assume about the base type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseEquality {
    /// Short display name, for messages.
    pub name: String,
    pub overrides_equals: bool,
    pub overrides_hash: bool,
    /// Some level of the base chain implements key equality, or will once
    /// generated in this pass.
    pub key_equatable: bool,
}

impl EqualityGenerator<'_> {
    /// Whether equality code for `def` is produced by this pass: a source
    /// type that is a planned target or carries `[GeneratedEquality]`.
    pub fn will_generate(&self, def: &TypeDef) -> bool {
        def.origin == Origin::Source
            && (self.targets.contains(&def.full_name())
                || self
                    .compilation
                    .has_attribute_flattened(def, GENERATED_EQUALITY))
    }

    /// `None` when `def` derives directly from the root object type (or
    /// `ValueType` for structs). An unresolved base is reported as one that
    /// overrides nothing.
    pub fn base_equality(&self, def: &TypeDef) -> Option<BaseEquality> {
        let base_ref = def.base_type.as_ref()?;
        if ROOTS.iter().any(|root| base_ref.is_named(root)) {
            return None;
        }
        let name = display_friendly(base_ref);
        let Some(base) = self.compilation.resolve(base_ref) else {
            tracing::debug!(base = %name, "base type unresolved");
            return Some(BaseEquality {
                name,
                overrides_equals: false,
                overrides_hash: false,
                key_equatable: false,
            });
        };

        let generated = self.will_generate(base);
        let base_equality = BaseEquality {
            name,
            overrides_equals: generated || self.compilation.overrides_method(base, "Equals", 1),
            overrides_hash: generated
                || self.compilation.overrides_method(base, "GetHashCode", 0),
            key_equatable: std::iter::once(base)
                .chain(self.compilation.base_chain(base))
                .any(|level| self.is_level_key_equatable(level)),
        };
        tracing::debug!(
            base = %base_equality.name,
            generated,
            overrides_equals = base_equality.overrides_equals,
            overrides_hash = base_equality.overrides_hash,
            key_equatable = base_equality.key_equatable,
            "base equality resolved"
        );
        Some(base_equality)
    }

    fn is_level_key_equatable(&self, level: &TypeDef) -> bool {
        if ROOTS.contains(&level.full_name().as_str()) {
            return false;
        }
        self.compilation
            .is_key_equatable(&level.self_ref(), &level.type_parameters)
            || (self.config.capabilities.key_equality
                && self.will_generate(level)
                && has_key_members(self.compilation, level))
    }
}
