//! The kiln driver.
//!
//! ```text
//! model.json ──► Compilation ──► GenerationConfig + GenerationPlan
//!                                     │
//!            ┌────────────────────────┼────────────────────────┐
//!            ▼                        ▼                        ▼
//!      EqualityGenerator      ImmutableGenerator      LifecycleGenerator
//!            └────────────────────────┼────────────────────────┘
//!                                     ▼
//!                         Vec<Artifact> ──► files / --check
//! ```
//!
//! Each generator visits its targets in parallel; the artifact list keeps
//! plan order, so a run is byte-for-byte reproducible.

pub mod commands;
mod error;
mod output;
mod pipeline;
mod plan;

use std::sync::Once;

pub use error::DriverError;
pub use output::{artifact_file, check_artifacts, write_artifacts, Drift};
pub use pipeline::{generate, load_model, GenerationOutput};
pub use plan::GenerationPlan;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=kiln_immutable=debug`
/// or `RUST_LOG=kilnc=trace`. Output goes to stderr so that `--format=json`
/// keeps stdout clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
