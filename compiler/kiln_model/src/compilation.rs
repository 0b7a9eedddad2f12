//! The resolved compilation: every known type, indexed for lookup.
//!
//! # Design
//!
//! - Types are stored once in a `Vec` and addressed by [`TypeId`]
//! - `FxHashMap` indexes metadata names for O(1) resolution
//! - Iteration follows input order, which makes generation deterministic

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::corlib::core_library;
use crate::types::{AssemblyDecl, AttributeData, CompilationInput, Origin, TypeDef, TypeRef};

/// Index of a type definition inside a [`Compilation`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Types that every generator relies on. Missing any of them means the
/// input is not a usable compilation.
pub const WELL_KNOWN_TYPES: &[&str] = &[
    "System.Object",
    "System.ValueType",
    "System.Boolean",
    "System.Int32",
    "System.String",
    "System.Enum",
    "System.Array",
    "System.Collections.ICollection",
    "System.IEquatable`1",
];

/// Errors raised while loading or validating a compilation.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read program model: {0}")]
    Json(#[from] serde_json::Error),

    #[error("type `{name}` is declared more than once")]
    DuplicateType { name: String },

    #[error("required well-known type `{name}` is missing from the compilation")]
    MissingWellKnownType { name: &'static str },
}

/// A fully resolved program.
#[derive(Clone, Debug, Default)]
pub struct Compilation {
    assembly: AssemblyDecl,
    types: Vec<TypeDef>,
    by_name: FxHashMap<String, TypeId>,
}

impl Compilation {
    /// Build a compilation from deserialized input.
    ///
    /// Catalog types are added first so that a user declaration with the
    /// same name is reported as a duplicate instead of silently winning.
    pub fn from_input(input: CompilationInput) -> Result<Self, ModelError> {
        let mut compilation = Compilation {
            assembly: input.assembly,
            types: Vec::new(),
            by_name: FxHashMap::default(),
        };
        if input.include_core_library {
            for def in core_library() {
                compilation.insert(def)?;
            }
        }
        for def in input.types {
            compilation.insert(def)?;
        }
        tracing::debug!(
            types = compilation.types.len(),
            assembly = %compilation.assembly.name,
            "compilation loaded"
        );
        Ok(compilation)
    }

    /// Parse the JSON program model.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let input: CompilationInput = serde_json::from_str(text)?;
        Self::from_input(input)
    }

    fn insert(&mut self, def: TypeDef) -> Result<TypeId, ModelError> {
        let name = def.full_name();
        if self.by_name.contains_key(&name) {
            return Err(ModelError::DuplicateType { name });
        }
        let id = TypeId(u32::try_from(self.types.len()).unwrap_or(u32::MAX));
        self.types.push(def);
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Fail when any of [`WELL_KNOWN_TYPES`] cannot be resolved.
    pub fn require_well_known_types(&self) -> Result<(), ModelError> {
        for name in WELL_KNOWN_TYPES {
            if !self.contains(name) {
                return Err(ModelError::MissingWellKnownType { name });
            }
        }
        Ok(())
    }

    pub fn assembly(&self) -> &AssemblyDecl {
        &self.assembly
    }

    pub fn assembly_attributes(&self) -> &[AttributeData] {
        &self.assembly.attributes
    }

    pub fn get(&self, id: TypeId) -> &TypeDef {
        &self.types[id.index()]
    }

    pub fn lookup(&self, full_name: &str) -> Option<TypeId> {
        self.by_name.get(full_name).copied()
    }

    pub fn type_def(&self, full_name: &str) -> Option<&TypeDef> {
        self.lookup(full_name).map(|id| self.get(id))
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.by_name.contains_key(full_name)
    }

    /// Definition of a named type reference; `None` for arrays, tuples,
    /// parameters and unresolved names.
    pub fn resolve(&self, ty: &TypeRef) -> Option<&TypeDef> {
        ty.definition_name().and_then(|name| self.type_def(name))
    }

    /// All types in insertion order.
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, def)| (TypeId(u32::try_from(i).unwrap_or(u32::MAX)), def))
    }

    /// Types declared in the sources being compiled.
    pub fn source_types(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types().filter(|(_, def)| def.origin == Origin::Source)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
