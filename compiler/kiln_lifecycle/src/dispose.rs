//! How a class with dispose methods hooks into disposal.
//!
//! The base chain is searched twice, nearest base first: once for the
//! `Dispose(bool)` pattern (a base generated in this pass counts, since it
//! receives one), then for a plain `Dispose()`. A class with neither in its
//! chain implements `IDisposable` itself.

use kiln_model::names::display;
use kiln_model::{MethodDef, Origin, TypeDef};

use crate::methods::{declares, LifecycleKind};
use crate::LifecycleGenerator;

const DISPOSABLE: &str = "System.IDisposable";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisposeStrategy {
    /// Implement `IDisposable` and the `Dispose(bool)` pattern.
    Root,
    /// Override `Dispose(bool)` of `base`.
    PatternOnBase { base: String },
    /// Override the virtual `Dispose()` of `base`.
    VirtualOnBase { base: String },
    /// `base` has a `Dispose` that cannot be overridden.
    NotOverridable { base: String },
}

impl LifecycleGenerator<'_> {
    pub fn dispose_strategy(&self, def: &TypeDef) -> DisposeStrategy {
        let chain = self.compilation.base_chain(def);

        for base in &chain {
            let generated = base.origin == Origin::Source && declares(base, LifecycleKind::Dispose);
            if generated {
                return DisposeStrategy::PatternOnBase {
                    base: display(&base.self_ref()),
                };
            }
            if let Some(pattern) = base.methods().find(|m| is_dispose_pattern(m)) {
                let base = display(&base.self_ref());
                return if is_overridable(pattern) {
                    DisposeStrategy::PatternOnBase { base }
                } else {
                    DisposeStrategy::NotOverridable { base }
                };
            }
        }

        for base in &chain {
            if let Some(dispose) = base.methods().find(|m| is_plain_dispose(m)) {
                let base = display(&base.self_ref());
                return if dispose.explicit_interface.is_none() && is_overridable(dispose) {
                    DisposeStrategy::VirtualOnBase { base }
                } else {
                    DisposeStrategy::NotOverridable { base }
                };
            }
        }

        DisposeStrategy::Root
    }

    /// Nearest base that gets a generated `OnFinalizing()` in this pass.
    pub fn finalizer_base<'c>(&'c self, def: &'c TypeDef) -> Option<&'c TypeDef> {
        self.compilation
            .base_chain(def)
            .into_iter()
            .find(|base| base.origin == Origin::Source && declares(base, LifecycleKind::Finalizer))
    }
}

/// `Dispose(bool)`.
fn is_dispose_pattern(method: &MethodDef) -> bool {
    method.name == "Dispose"
        && !method.is_static
        && method.parameters.len() == 1
        && method.parameters[0].ty.is_named("System.Boolean")
}

/// `Dispose()`, declared normally or as `IDisposable.Dispose()`.
fn is_plain_dispose(method: &MethodDef) -> bool {
    let explicit = method
        .explicit_interface
        .as_ref()
        .is_some_and(|iface| iface.is_named(DISPOSABLE));
    let named = method.name == "Dispose" || method.name == "System.IDisposable.Dispose";
    named
        && !method.is_static
        && method.parameters.is_empty()
        && (explicit || method.explicit_interface.is_none())
}

fn is_overridable(method: &MethodDef) -> bool {
    (method.is_virtual || method.is_abstract || method.is_override) && !method.is_sealed
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
