//! Which types each generator visits.

use kiln_equality::EqualityGenerator;
use kiln_immutable::ImmutableGenerator;
use kiln_lifecycle::LifecycleGenerator;
use kiln_model::{Compilation, GenerationConfig, TypeDef, TypeId};
use rustc_hash::FxHashSet;

/// Targets of one run, per generator, each list ordered by simple name
/// then full name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationPlan {
    /// `[GeneratedEquality]` types, plus immutable entities whose equality
    /// is generated with them.
    pub equality: Vec<TypeId>,
    pub immutable: Vec<TypeId>,
    pub lifecycle: Vec<TypeId>,
}

impl GenerationPlan {
    pub fn build(compilation: &Compilation, config: &GenerationConfig) -> Self {
        let immutable = ordered(compilation, |def| {
            ImmutableGenerator::is_requested(compilation, def)
        });
        let with_equality: FxHashSet<TypeId> = immutable
            .iter()
            .copied()
            .filter(|&id| config.generate_equality_for(compilation, compilation.get(id)))
            .collect();
        let equality = ordered_ids(compilation, |id, def| {
            with_equality.contains(&id) || EqualityGenerator::is_requested(compilation, def)
        });
        let lifecycle = ordered(compilation, LifecycleGenerator::is_requested);

        GenerationPlan {
            equality,
            immutable,
            lifecycle,
        }
    }

    pub fn len(&self) -> usize {
        self.equality.len() + self.immutable.len() + self.lifecycle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full names of `ids`, the form generators take their target sets in.
    pub fn full_names(compilation: &Compilation, ids: &[TypeId]) -> Vec<String> {
        ids.iter().map(|&id| compilation.get(id).full_name()).collect()
    }
}

fn ordered(compilation: &Compilation, keep: impl Fn(&TypeDef) -> bool) -> Vec<TypeId> {
    ordered_ids(compilation, |_, def| keep(def))
}

fn ordered_ids(compilation: &Compilation, keep: impl Fn(TypeId, &TypeDef) -> bool) -> Vec<TypeId> {
    let mut ids: Vec<TypeId> = compilation
        .source_types()
        .filter(|&(id, def)| keep(id, def))
        .map(|(id, _)| id)
        .collect();
    ids.sort_by_cached_key(|&id| {
        let def = compilation.get(id);
        (def.name.clone(), def.full_name())
    });
    ids
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
