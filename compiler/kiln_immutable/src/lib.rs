//! Immutable entity and builder generator.
//!
//! Every partial class marked `[GeneratedImmutable]` gets:
//!
//! - a `Default` instance and a constructor taking its builder
//! - a nested, mutable `Builder` recording sparse overrides over an
//!   original instance, with fluent `With<P>` methods
//! - implicit conversions between the entity and its builder
//! - entity-level `With<P>` extensions
//! - Option and Json.NET support when those libraries are referenced
//!
//! Validation problems (mutable member types, setters, a base without a
//! builder) are embedded in the unit as `#error` directives; generation
//! itself always completes.

mod builder;
mod copy;
mod extensions;
mod generator;
mod linkage;
mod validate;

pub use copy::{render_attribute, CopyIgnore};
pub use generator::ImmutableGenerator;
pub use linkage::BaseTypeLinkage;
