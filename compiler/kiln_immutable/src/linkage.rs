//! Base type linkage.
//!
//! A generated builder derives from its base's builder exactly when the
//! entity derives from an immutable base. The linkage is resolved once per
//! type, before emission, into a plain record.

use kiln_model::names::display;
use kiln_model::vocabulary::{find_attribute, IMMUTABLE_BUILDER};
use kiln_model::{AttributeValue, PropertyDef, TypeDef, TypeRef};

use crate::ImmutableGenerator;

/// Bases that never carry generated state.
const ROOTS: &[&str] = &["System.Object", "System.ValueType"];

/// What an entity's generated code derives from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BaseTypeLinkage {
    /// No base other than `System.Object`.
    Root,
    Linked {
        /// Entity base, as written in code.
        entity: String,
        /// Builder base, as written in code: from `[ImmutableBuilder]` on a
        /// compiled base, or the nested `Builder` of a base generated in
        /// this pass.
        builder: String,
        /// Names of the base chain's builder properties, which this
        /// level's builder properties shadow.
        inherited: Vec<String>,
    },
    /// The base is immutable but its builder cannot be located.
    MissingBuilder { base: String },
    /// The base is not an immutable type at all.
    NotImmutable { base: String },
}

impl BaseTypeLinkage {
    pub fn is_linked(&self) -> bool {
        matches!(self, BaseTypeLinkage::Linked { .. })
    }

    /// Builder base class, when there is one.
    pub fn builder_base(&self) -> Option<&str> {
        match self {
            BaseTypeLinkage::Linked { builder, .. } => Some(builder),
            _ => None,
        }
    }

    /// Whether a property called `name` already exists on a base builder.
    pub fn shadows(&self, name: &str) -> bool {
        match self {
            BaseTypeLinkage::Linked { inherited, .. } => inherited.iter().any(|n| n == name),
            _ => false,
        }
    }
}

impl ImmutableGenerator<'_> {
    pub fn linkage(&self, def: &TypeDef) -> BaseTypeLinkage {
        let Some(base_ref) = def.base_type.as_ref() else {
            return BaseTypeLinkage::Root;
        };
        if ROOTS.iter().any(|root| base_ref.is_named(root)) {
            return BaseTypeLinkage::Root;
        }
        let entity = display(base_ref);
        let Some(base) = self.compilation.resolve(base_ref) else {
            tracing::debug!(base = %entity, "base type unresolved");
            return BaseTypeLinkage::MissingBuilder { base: entity };
        };

        let builder = if let Some(builder) = find_attribute(&base.attributes, IMMUTABLE_BUILDER)
            .and_then(|a| a.ctor_arg(0))
            .and_then(AttributeValue::as_type)
        {
            Some(builder_spelling(base, base_ref, builder))
        } else if self.targets.contains(&base.full_name()) {
            Some(format!("{entity}.Builder"))
        } else {
            None
        };

        let linkage = match builder {
            Some(builder) => BaseTypeLinkage::Linked {
                inherited: self.inherited_properties(base),
                entity,
                builder,
            },
            None if self.compilation.is_marked_immutable(base_ref) => {
                BaseTypeLinkage::MissingBuilder { base: entity }
            }
            None => BaseTypeLinkage::NotImmutable { base: entity },
        };
        tracing::debug!(?linkage, "base linkage resolved");
        linkage
    }

    fn inherited_properties(&self, base: &TypeDef) -> Vec<String> {
        std::iter::once(base)
            .chain(self.compilation.base_chain(base))
            .flat_map(|level| level.properties())
            .filter(|p| is_builder_state(p))
            .map(|p| p.name.clone())
            .collect()
    }
}

/// Instance, read-only auto-properties: the state a builder carries.
pub(crate) fn is_builder_state(property: &PropertyDef) -> bool {
    !property.is_static
        && property.is_read_only()
        && property.is_auto
        && !property.is_indexer
        && !property.is_write_only
        && !property.is_implicit
}

/// A builder nested in the base is spelled through the constructed base so
/// its type arguments carry over.
fn builder_spelling(base: &TypeDef, base_ref: &TypeRef, builder: &TypeRef) -> String {
    let nested = builder
        .definition_name()
        .and_then(|name| name.strip_prefix(base.full_name().as_str()))
        .and_then(|rest| rest.strip_prefix('+'));
    match nested {
        Some(member) => format!("{}.{member}", display(base_ref)),
        None => display(builder),
    }
}
