//! Equality generator.
//!
//! For every partial class or struct asking for generated equality, emits
//! `Equals`, `GetHashCode`, `==`/`!=` and, when key members are declared,
//! `KeyEquals`/`GetKeyHashCode`.
//!
//! - [`classify`]: the equality, hash and key member sets
//! - [`EqualityGenerator::base_equality`]: what the base type contributes
//! - [`EqualityGenerator::generate`]: the generated unit, with every
//!   problem embedded as a `#warning`
//!
//! Problems never stop generation. A type that cannot be handled well
//! still gets a unit; the warnings in it explain what to fix.

mod compare;
mod generator;
mod hash;
mod inheritance;
mod members;

pub use generator::EqualityGenerator;
pub use hash::{prime_for, PRIMES, SEED};
pub use inheritance::BaseEquality;
pub use members::{classify, has_key_members, is_type_key_equatable, EqualityMember, MemberSets};
