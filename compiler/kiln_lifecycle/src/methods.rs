//! Lifecycle-marked methods of one class, and the parameter list of the
//! `Initialize` method built from its constructor methods.

use kiln_model::vocabulary::{has_attribute, CONSTRUCTOR_METHOD, DISPOSE_METHOD, FINALIZER_METHOD};
use kiln_model::{MethodDef, TypeDef, TypeRef};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleKind {
    Constructor,
    Dispose,
    Finalizer,
}

impl LifecycleKind {
    pub const ALL: [LifecycleKind; 3] = [
        LifecycleKind::Constructor,
        LifecycleKind::Dispose,
        LifecycleKind::Finalizer,
    ];

    /// Metadata name of the marker attribute.
    pub fn marker(self) -> &'static str {
        match self {
            LifecycleKind::Constructor => CONSTRUCTOR_METHOD,
            LifecycleKind::Dispose => DISPOSE_METHOD,
            LifecycleKind::Finalizer => FINALIZER_METHOD,
        }
    }

    /// The marker as written in C#.
    pub fn label(self) -> &'static str {
        match self {
            LifecycleKind::Constructor => "[ConstructorMethod]",
            LifecycleKind::Dispose => "[DisposeMethod]",
            LifecycleKind::Finalizer => "[FinalizerMethod]",
        }
    }

    pub fn marks(self, method: &MethodDef) -> bool {
        has_attribute(&method.attributes, self.marker())
    }
}

/// Whether `def` declares a method marked `kind`.
pub fn declares(def: &TypeDef, kind: LifecycleKind) -> bool {
    def.methods().any(|m| kind.marks(m))
}

pub fn declares_lifecycle(def: &TypeDef) -> bool {
    LifecycleKind::ALL.iter().any(|kind| declares(def, *kind))
}

/// The lifecycle methods of one class, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LifecycleMethods<'a> {
    pub constructors: Vec<&'a MethodDef>,
    pub disposes: Vec<&'a MethodDef>,
    pub finalizers: Vec<&'a MethodDef>,
}

impl<'a> LifecycleMethods<'a> {
    pub fn of(def: &'a TypeDef) -> Self {
        let collect = |kind: LifecycleKind| def.methods().filter(|m| kind.marks(m)).collect();
        LifecycleMethods {
            constructors: collect(LifecycleKind::Constructor),
            disposes: collect(LifecycleKind::Dispose),
            finalizers: collect(LifecycleKind::Finalizer),
        }
    }

    pub fn get(&self, kind: LifecycleKind) -> &[&'a MethodDef] {
        match kind {
            LifecycleKind::Constructor => &self.constructors,
            LifecycleKind::Dispose => &self.disposes,
            LifecycleKind::Finalizer => &self.finalizers,
        }
    }

    pub fn get_mut(&mut self, kind: LifecycleKind) -> &mut Vec<&'a MethodDef> {
        match kind {
            LifecycleKind::Constructor => &mut self.constructors,
            LifecycleKind::Dispose => &mut self.disposes,
            LifecycleKind::Finalizer => &mut self.finalizers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty() && self.disposes.is_empty() && self.finalizers.is_empty()
    }
}

/// One parameter of `Initialize`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MergedParameter<'a> {
    pub name: &'a str,
    pub ty: &'a TypeRef,
    pub default_value: Option<&'a str>,
}

/// Two constructor methods using one parameter name differently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterConflict<'a> {
    pub name: &'a str,
    /// Method that introduced the parameter.
    pub first: &'a MethodDef,
    /// Method that disagrees with it.
    pub second: &'a MethodDef,
}

/// Merge the parameters of `constructors` by name.
///
/// Required parameters come first, then optional ones, each group in
/// order of first appearance. Calls use named arguments, so the order is
/// free. A parameter whose type or default value differs from the first
/// declaration is a conflict; the first declaration is kept.
pub fn merge_parameters<'a>(
    constructors: &[&'a MethodDef],
) -> (Vec<MergedParameter<'a>>, Vec<ParameterConflict<'a>>) {
    let mut merged: Vec<(MergedParameter<'a>, &'a MethodDef)> = Vec::new();
    let mut conflicts = Vec::new();

    for &method in constructors {
        for param in &method.parameters {
            let candidate = MergedParameter {
                name: &param.name,
                ty: &param.ty,
                default_value: param.default_value.as_deref(),
            };
            match merged.iter().find(|(p, _)| p.name == candidate.name) {
                Some(&(existing, _)) if existing == candidate => {}
                Some(&(_, first)) => conflicts.push(ParameterConflict {
                    name: candidate.name,
                    first,
                    second: method,
                }),
                None => merged.push((candidate, method)),
            }
        }
    }

    let (required, optional): (Vec<_>, Vec<_>) = merged
        .into_iter()
        .map(|(p, _)| p)
        .partition(|p| p.default_value.is_none());
    (required.into_iter().chain(optional).collect(), conflicts)
}
