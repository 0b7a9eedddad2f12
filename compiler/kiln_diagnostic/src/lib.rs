//! Diagnostics for the kiln code generators.
//!
//! Problems found while generating a type are values, not Rust errors: they
//! are embedded in that type's generated unit as `#error`/`#warning` lines,
//! logged through `tracing`, and handed to the driver for a summary.
//!
//! - [`ErrorCode`]: stable `K####` identifiers, grouped by phase
//! - [`Diagnostic`]: code, severity, message, scope and location
//! - [`DiagnosticSink`]: per-type collector with the logging side channel
//! - [`emitter`]: terminal and JSON output for the driver
//! - [`ErrorDocs`]: `--explain` texts

mod diagnostic;
pub mod emitter;
mod error_code;
mod errors;
mod queue;

pub use diagnostic::{Diagnostic, Generator, Scope, Severity};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
pub use queue::{DiagnosticSink, Tally};
