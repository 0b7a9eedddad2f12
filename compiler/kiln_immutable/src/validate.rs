//! Validation of immutable entities.
//!
//! Every problem is reported, none stops generation:
//!
//! - the type must be a `partial` class
//! - an immutable base must come with a locatable builder
//! - instance properties may not have setters, and indexers are rejected
//! - instance fields must be `readonly`
//! - the type of every property, readonly field and base type argument
//!   must be immutable, type arguments included
//!
//! Generic parameters are accepted only through a constraint that is
//! itself immutable. The type walk keeps a visited set, so a constraint
//! such as `T : IComparable<T>` is looked at once.

use std::collections::VecDeque;

use kiln_diagnostic::{Diagnostic, ErrorCode};
use kiln_model::names::display_friendly;
use kiln_model::vocabulary::{has_attribute, IMMUTABLE_BUILDER};
use kiln_model::{Location, TypeKind, TypeRef};
use rustc_hash::FxHashSet;

use crate::generator::TypeContext;
use crate::linkage::BaseTypeLinkage;

impl TypeContext<'_> {
    pub(crate) fn validate(&mut self) {
        let def = self.def;
        let n = self.names.qualified().to_string();

        if !def.is_partial {
            let message = format!("You should add the partial modifier to the class {n}.");
            self.report(Diagnostic::warning(ErrorCode::K2001).with_message(message), None);
        }
        if def.kind != TypeKind::Class {
            let message = format!("Type {n} **MUST** be a class, not a struct.");
            self.report(Diagnostic::error(ErrorCode::K2002).with_message(message), None);
        }
        match &self.linkage {
            BaseTypeLinkage::MissingBuilder { base } => {
                let message = format!(
                    "The builder of base type {base} cannot be found. Generate the base in this \
                     compilation or mark it [ImmutableBuilder(typeof(...))]."
                );
                self.report(Diagnostic::error(ErrorCode::K2003).with_message(message), None);
            }
            BaseTypeLinkage::NotImmutable { base } => {
                let message = format!("Type {n} **MUST** derive from an immutable class, not {base}.");
                self.report(Diagnostic::error(ErrorCode::K2010).with_message(message), None);
            }
            BaseTypeLinkage::Root | BaseTypeLinkage::Linked { .. } => {}
        }

        for property in def.properties().filter(|p| !p.is_static) {
            let location = property.location.as_ref();
            if property.is_indexer {
                let message = format!(
                    "Indexer {n}.{} is not supported. You must remove it for immutable generation.",
                    property.name
                );
                self.report(Diagnostic::error(ErrorCode::K2009).with_message(message), location);
                continue;
            }
            if property.has_setter {
                let message = format!(
                    "Non-static property {n}.{} cannot have a setter, even a private one. \
                     You must remove it for immutable generation.",
                    property.name
                );
                self.report(Diagnostic::error(ErrorCode::K2004).with_message(message), location);
            }
            self.check_type(&property.ty, format!("Property {n}.{}", property.name), location);
        }

        if let Some(base) = &def.base_type {
            for arg in base.args() {
                if def.is_abstract && matches!(arg, TypeRef::Parameter { .. }) {
                    continue;
                }
                let source = format!("Type argument {}", display_friendly(arg));
                self.check_type(arg, source, None);
            }
        }

        for field in def.fields().filter(|f| !f.is_static && !f.is_implicit) {
            let location = field.location.as_ref();
            if field.is_readonly {
                self.check_type(&field.ty, format!("Field {n}.{}", field.name), location);
            } else {
                let message = format!(
                    "Immutable type {n} cannot have a non-static field {}. \
                     You must make it readonly or remove it for immutable generation.",
                    field.name
                );
                self.report(Diagnostic::error(ErrorCode::K2005).with_message(message), location);
            }
        }
    }

    /// Report every part of `ty` that is not immutable: the type itself,
    /// then its type arguments and array elements, then the constraints of
    /// generic parameters.
    fn check_type(&mut self, ty: &TypeRef, source: String, location: Option<&Location>) {
        let compilation = self.compilation();
        let config = self.generator.config;
        let def = self.def;
        let rules = &config.immutability;
        let scope = &def.type_parameters;
        let mut visited = FxHashSet::default();
        let mut work = VecDeque::from([(ty.clone(), source)]);

        while let Some((ty, source)) = work.pop_front() {
            if !visited.insert(ty.clone()) {
                continue;
            }
            if let TypeRef::Parameter { name } = &ty {
                match scope.iter().find(|p| &p.name == name) {
                    Some(param) if !param.constraints.is_empty() => {
                        for constraint in &param.constraints {
                            let source = format!(
                                "{source} (constraint {name} : {})",
                                display_friendly(constraint)
                            );
                            work.push_back((constraint.clone(), source));
                        }
                    }
                    _ => {
                        let message = format!(
                            "{source} is of generic type {name} which isn't restricted to an \
                             immutable type. Add a constraint to an immutable type."
                        );
                        self.report(Diagnostic::error(ErrorCode::K2007).with_message(message), location);
                    }
                }
                continue;
            }

            let friendly = display_friendly(&ty);
            let is_builder = compilation
                .resolve(&ty)
                .is_some_and(|resolved| has_attribute(&resolved.attributes, IMMUTABLE_BUILDER));
            if is_builder {
                let message = format!(
                    "{source} type {friendly} is a builder. It cannot be used in an immutable entity."
                );
                self.report(Diagnostic::error(ErrorCode::K2008).with_message(message), location);
            } else if !compilation.is_immutable(&ty, scope, rules) {
                let message = if matches!(ty, TypeRef::Array { .. }) && !rules.treat_arrays_as_immutable {
                    format!(
                        "{source} type {friendly} is an array, which is not immutable. Arrays can be \
                         treated as immutable with \
                         [assembly: Uno.ImmutableGenerationOptions(TreatArrayAsImmutable = true)]."
                    )
                } else {
                    format!(
                        "{source} type {friendly} is not immutable. It cannot be used in an immutable entity."
                    )
                };
                let diagnostic = Diagnostic::error(ErrorCode::K2006).with_message(message);
                self.report(diagnostic, location);
            }

            let nested = match &ty {
                TypeRef::Named { args, .. } => args.clone(),
                TypeRef::Tuple { elements } => elements.clone(),
                TypeRef::Array { element, .. } => vec![element.as_ref().clone()],
                TypeRef::Parameter { .. } => Vec::new(),
            };
            for arg in nested {
                let source = format!("{source} (argument type {})", display_friendly(&arg));
                work.push_back((arg, source));
            }
        }
    }
}
