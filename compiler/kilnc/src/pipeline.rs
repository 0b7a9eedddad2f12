//! One generation run over a loaded compilation.

use std::fs;
use std::path::Path;

use kiln_diagnostic::{Diagnostic, Tally};
use kiln_emit::Artifact;
use kiln_equality::EqualityGenerator;
use kiln_immutable::ImmutableGenerator;
use kiln_lifecycle::LifecycleGenerator;
use kiln_model::{Compilation, GenerationConfig, TypeDef, TypeId};
use rayon::prelude::*;

use crate::{DriverError, GenerationPlan};

/// Read and resolve a JSON program model.
pub fn load_model(path: &Path) -> Result<Compilation, DriverError> {
    let text = fs::read_to_string(path).map_err(|e| DriverError::io(path, e))?;
    Ok(Compilation::from_json(&text)?)
}

/// Every unit of one run, equality units first, then immutable, then
/// lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationOutput {
    pub artifacts: Vec<Artifact>,
}

impl GenerationOutput {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.artifacts.iter().flat_map(|a| &a.diagnostics)
    }

    pub fn tally(&self) -> Tally {
        Tally::of(self.diagnostics())
    }

    /// Whether any unit carries an embedded `#error`.
    pub fn has_errors(&self) -> bool {
        self.artifacts.iter().any(Artifact::has_errors)
    }

    pub fn artifact(&self, path: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.path == path)
    }
}

/// Run every generator over `compilation`.
///
/// Fails only when the compilation cannot be generated from at all: a
/// missing well-known type or an invalid assembly-level pattern.
#[tracing::instrument(level = "debug", skip_all)]
pub fn generate(compilation: &Compilation) -> Result<GenerationOutput, DriverError> {
    compilation.require_well_known_types()?;
    let config = GenerationConfig::resolve(compilation)?;
    let plan = GenerationPlan::build(compilation, &config);
    tracing::debug!(
        equality = plan.equality.len(),
        immutable = plan.immutable.len(),
        lifecycle = plan.lifecycle.len(),
        "generation plan"
    );

    let equality = EqualityGenerator::new(
        compilation,
        &config,
        GenerationPlan::full_names(compilation, &plan.equality),
    );
    let immutable = ImmutableGenerator::new(
        compilation,
        &config,
        GenerationPlan::full_names(compilation, &plan.immutable),
    );
    let lifecycle = LifecycleGenerator::new(compilation);

    let mut artifacts = Vec::with_capacity(plan.len());
    artifacts.extend(run(compilation, &plan.equality, |def| equality.generate(def)));
    artifacts.extend(run(compilation, &plan.immutable, |def| immutable.generate(def)));
    artifacts.extend(run(compilation, &plan.lifecycle, |def| lifecycle.generate(def)));

    let output = GenerationOutput { artifacts };
    let tally = output.tally();
    tracing::info!(
        artifacts = output.artifacts.len(),
        errors = tally.errors,
        warnings = tally.warnings,
        "generation finished"
    );
    Ok(output)
}

/// Generate `ids` in parallel; the result keeps the order of `ids`.
fn run<F>(compilation: &Compilation, ids: &[TypeId], generate: F) -> Vec<Artifact>
where
    F: Fn(&TypeDef) -> Artifact + Sync,
{
    ids.par_iter()
        .map(|&id| generate(compilation.get(id)))
        .collect()
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
