//! Resolved program model for the kiln code generators.
//!
//! The front end hands kiln a fully resolved symbol graph (types, members,
//! attributes, generic constraints, locations). This crate owns that model
//! and the queries every generator shares:
//!
//! - [`Compilation`]: indexed type registry, with the core library merged in
//! - [`SymbolNames`]: generics-aware name projections for code and file names
//! - introspection: base chains, supertypes, collection shapes, extension points
//! - [`Compilation::is_immutable`]: the structural immutability check
//! - [`GenerationConfig`]: assembly defaults plus per-type overrides
//!
//! Generators only ever see this crate's types; how the front end derived
//! flags such as "is an auto-property" is not visible here.

mod compilation;
pub mod config;
mod corlib;
mod immutability;
mod introspect;
pub mod names;
mod types;
pub mod vocabulary;

pub use compilation::{Compilation, ModelError, TypeId, WELL_KNOWN_TYPES};
pub use config::{Capabilities, ConfigError, GenerationConfig, ImmutableOptions};
pub use corlib::core_library;
pub use immutability::ImmutabilityRules;
pub use introspect::{
    CollectionShape, CustomComparer, CustomHashMethod, DeclaredMember, DictionaryShape,
    MemberQuery,
};
pub use names::SymbolNames;
pub use types::{
    Accessibility, AssemblyDecl, AttributeData, AttributeValue, CompilationInput, EnumValue,
    FieldDef, Location, Member, MethodDef, NamedArgument, Origin, ParameterDef, PropertyDef,
    SpecialType, TypeDef, TypeKind, TypeParameter, TypeRef,
};
