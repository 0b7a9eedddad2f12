//! Lifecycle generator.
//!
//! Chains the methods a class marks `[ConstructorMethod]`, `[DisposeMethod]`
//! and `[FinalizerMethod]`:
//!
//! - a private `Initialize(...)` calling the constructor methods, with their
//!   parameters merged by name; every real constructor calls it
//! - a `Dispose` hook running the dispose methods after the base type's
//! - a finalizer chain through `OnFinalizing()`, base levels first
//!
//! Methods with an unusable signature are reported in the unit and left out
//! of the chains.

mod dispose;
mod generator;
mod methods;

pub use dispose::DisposeStrategy;
pub use generator::LifecycleGenerator;
pub use methods::{
    declares, declares_lifecycle, merge_parameters, LifecycleKind, LifecycleMethods,
    MergedParameter, ParameterConflict,
};
