//! Command handlers for the `kiln` CLI.

mod explain;
mod generate;

pub use explain::explain;
pub use generate::{
    emit_diagnostics, run_generate, GenerateOptions, GenerateRun, OutputFormat,
    DEFAULT_OUTPUT_DIR,
};
