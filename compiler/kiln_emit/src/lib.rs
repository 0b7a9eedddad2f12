//! Source emission shared by the kiln generators.
//!
//! [`CodeWriter`] builds C# text with deterministic indentation and line
//! endings; [`Artifact`] pairs that text with its output path and the
//! diagnostics embedded in it.

mod artifact;
mod writer;

pub use artifact::{artifact_path, begin_unit, Artifact};
pub use writer::CodeWriter;
