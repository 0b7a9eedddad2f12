//! Per-class lifecycle unit: `Initialize`, the dispose hook and the
//! finalizer chain.

use kiln_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode, Generator};
use kiln_emit::{begin_unit, Artifact, CodeWriter};
use kiln_model::names::display;
use kiln_model::{Compilation, Location, MethodDef, Origin, SymbolNames, TypeDef, TypeKind};

use crate::dispose::DisposeStrategy;
use crate::methods::{
    declares_lifecycle, merge_parameters, LifecycleKind, LifecycleMethods, MergedParameter,
};

pub struct LifecycleGenerator<'a> {
    pub(crate) compilation: &'a Compilation,
}

impl<'a> LifecycleGenerator<'a> {
    pub fn new(compilation: &'a Compilation) -> Self {
        LifecycleGenerator { compilation }
    }

    /// Source classes declaring at least one lifecycle method.
    pub fn is_requested(def: &TypeDef) -> bool {
        def.origin == Origin::Source && def.kind == TypeKind::Class && declares_lifecycle(def)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(ty = %def.full_name()))]
    pub fn generate(&self, def: &TypeDef) -> Artifact {
        let names = SymbolNames::of(def);
        let mut cx = LevelContext {
            def,
            names: &names,
            methods: LifecycleMethods::of(def),
            parameters: Vec::new(),
            dispose: None,
            finalizer_is_root: true,
            sink: DiagnosticSink::new(Generator::Lifecycle, names.qualified()),
        };
        cx.validate();

        if !cx.methods.disposes.is_empty() {
            let strategy = self.dispose_strategy(def);
            tracing::debug!(?strategy, "dispose strategy");
            if let DisposeStrategy::NotOverridable { base } = &strategy {
                let message = format!(
                    "The Dispose method of base type {base} is not virtual and it does not \
                     implement the Dispose(bool) pattern: the {} methods of {} cannot be called.",
                    LifecycleKind::Dispose.label(),
                    names.qualified()
                );
                cx.report(Diagnostic::error(ErrorCode::K3005).with_message(message), None);
            }
            cx.dispose = Some(strategy);
        }
        cx.finalizer_is_root = self.finalizer_base(def).is_none();

        let mut w = begin_unit(Generator::Lifecycle, &["System"]);
        for diagnostic in cx.sink.diagnostics() {
            w.diagnostic(diagnostic);
        }
        if !cx.sink.diagnostics().is_empty() {
            w.blank();
        }
        w.namespace(&def.namespace, |w| cx.write_class(w));

        let text = w.finish();
        Artifact::new(
            Generator::Lifecycle,
            &names,
            text,
            cx.sink.into_diagnostics(),
        )
    }
}

struct LevelContext<'c> {
    def: &'c TypeDef,
    names: &'c SymbolNames,
    /// Valid methods only; rejected ones are reported and dropped.
    methods: LifecycleMethods<'c>,
    parameters: Vec<MergedParameter<'c>>,
    dispose: Option<DisposeStrategy>,
    finalizer_is_root: bool,
    sink: DiagnosticSink,
}

impl<'c> LevelContext<'c> {
    fn report(&mut self, diagnostic: Diagnostic, location: Option<&Location>) {
        let location = location.or(self.def.location.as_ref()).cloned();
        self.sink.report(diagnostic.with_location(location));
    }

    fn validate(&mut self) {
        let n = self.names.qualified().to_string();
        if !self.def.is_partial {
            let message = format!("You should add the partial modifier to the class {n}.");
            self.report(Diagnostic::warning(ErrorCode::K3001).with_message(message), None);
        }

        for kind in LifecycleKind::ALL {
            let declared = std::mem::take(self.methods.get_mut(kind));
            let mut kept = Vec::with_capacity(declared.len());
            for method in declared {
                if let Some(diagnostic) = rejection(kind, method, &n) {
                    self.report(diagnostic, method.location.as_ref());
                } else {
                    kept.push(method);
                }
            }
            *self.methods.get_mut(kind) = kept;
        }

        let (parameters, conflicts) = merge_parameters(&self.methods.constructors);
        for conflict in conflicts {
            let message = format!(
                "Parameter '{}' of {}.{} does not match the parameter with the same name of {}.{}: \
                 {} methods sharing a parameter name must agree on its type and default value.",
                conflict.name,
                n,
                conflict.second.name,
                n,
                conflict.first.name,
                LifecycleKind::Constructor.label()
            );
            self.report(
                Diagnostic::error(ErrorCode::K3002).with_message(message),
                conflict.second.location.as_ref(),
            );
        }
        self.parameters = parameters;
    }

    fn write_class(&self, w: &mut CodeWriter) {
        let implements = if self.dispose == Some(DisposeStrategy::Root) {
            " : global::System.IDisposable"
        } else {
            ""
        };
        let header = format!(
            "{} partial class {}{implements}",
            self.def.accessibility.as_csharp(),
            self.names.name_with_generics
        );
        w.block(header, |w| {
            let mut first = true;
            let mut separate = |w: &mut CodeWriter| {
                if !first {
                    w.blank();
                }
                first = false;
            };
            if !self.methods.constructors.is_empty() {
                separate(w);
                self.write_initialize(w);
            }
            if let Some(strategy) = &self.dispose {
                if !matches!(strategy, DisposeStrategy::NotOverridable { .. }) {
                    separate(w);
                    self.write_dispose(w, strategy);
                }
            }
            if !self.methods.finalizers.is_empty() {
                separate(w);
                self.write_finalizer(w);
            }
        });
    }

    fn write_initialize(&self, w: &mut CodeWriter) {
        let x = &self.names.name_for_xml;
        let parameters: Vec<String> = self
            .parameters
            .iter()
            .map(|p| match p.default_value {
                Some(default) => format!("{} {} = {default}", display(p.ty), p.name),
                None => format!("{} {}", display(p.ty), p.name),
            })
            .collect();

        w.line("/// <summary>");
        w.line(format!(
            "/// Runs the {} methods of {x}, in declaration order.",
            LifecycleKind::Constructor.label()
        ));
        w.line("/// </summary>");
        w.line("/// <remarks>");
        w.line(format!("/// Every constructor of {x} must call this method."));
        w.line("/// </remarks>");
        w.block(format!("private void Initialize({})", parameters.join(", ")), |w| {
            for method in &self.methods.constructors {
                let args: Vec<String> = method
                    .parameters
                    .iter()
                    .map(|p| format!("{0}: {0}", p.name))
                    .collect();
                w.line(invocation(method, &args.join(", ")));
            }
        });
    }

    fn write_dispose(&self, w: &mut CodeWriter, strategy: &DisposeStrategy) {
        let x = &self.names.name_for_xml;
        let label = LifecycleKind::Dispose.label();
        match strategy {
            DisposeStrategy::Root => {
                w.line("/// <inheritdoc />");
                w.block("public void Dispose()", |w| w.line("Dispose(true);"));
                w.blank();
                w.line("/// <summary>");
                w.line(format!(
                    "/// Runs the {label} methods of {x} when <paramref name=\"disposing\"/> is true."
                ));
                w.line("/// </summary>");
                let modifiers = if self.def.is_sealed {
                    "private"
                } else {
                    "protected virtual"
                };
                w.block(format!("{modifiers} void Dispose(bool disposing)"), |w| {
                    self.write_dispose_calls(w);
                });
            }
            DisposeStrategy::PatternOnBase { .. } => {
                w.line("/// <summary>");
                w.line(format!(
                    "/// Disposes the base type first, then runs the {label} methods of {x}."
                ));
                w.line("/// </summary>");
                w.block("protected override void Dispose(bool disposing)", |w| {
                    w.line("base.Dispose(disposing);");
                    self.write_dispose_calls(w);
                });
            }
            DisposeStrategy::VirtualOnBase { .. } => {
                w.line("/// <summary>");
                w.line(format!(
                    "/// Disposes the base type first, then runs the {label} methods of {x}."
                ));
                w.line("/// </summary>");
                w.block("public override void Dispose()", |w| {
                    w.line("base.Dispose();");
                    for method in &self.methods.disposes {
                        w.line(invocation(method, ""));
                    }
                });
            }
            DisposeStrategy::NotOverridable { .. } => {}
        }
    }

    fn write_dispose_calls(&self, w: &mut CodeWriter) {
        w.block("if (disposing)", |w| {
            for method in &self.methods.disposes {
                w.line(invocation(method, ""));
            }
        });
    }

    fn write_finalizer(&self, w: &mut CodeWriter) {
        let x = &self.names.name_for_xml;
        let summary = |w: &mut CodeWriter| {
            w.line("/// <summary>");
            w.line(format!(
                "/// Runs the {} methods of {x}, after those of the base types.",
                LifecycleKind::Finalizer.label()
            ));
            w.line("/// </summary>");
        };

        if self.finalizer_is_root {
            w.block(format!("~{}()", self.names.name), |w| w.line("OnFinalizing();"));
            w.blank();
            summary(w);
            let modifiers = if self.def.is_sealed {
                "private"
            } else {
                "protected virtual"
            };
            w.block(format!("{modifiers} void OnFinalizing()"), |w| {
                for method in &self.methods.finalizers {
                    w.line(invocation(method, ""));
                }
            });
        } else {
            summary(w);
            w.block("protected override void OnFinalizing()", |w| {
                w.line("base.OnFinalizing();");
                for method in &self.methods.finalizers {
                    w.line(invocation(method, ""));
                }
            });
        }
    }
}

/// Why `method` cannot be called as a `kind` method, if it cannot.
fn rejection(kind: LifecycleKind, method: &MethodDef, owner: &str) -> Option<Diagnostic> {
    let label = kind.label();
    if method.is_static {
        let message = format!(
            "{label} method {owner}.{} is static. Lifecycle methods must be instance methods.",
            method.name
        );
        return Some(Diagnostic::error(ErrorCode::K3004).with_message(message));
    }
    if kind == LifecycleKind::Constructor {
        return None;
    }
    if !method.parameters.is_empty() {
        let message = format!(
            "{label} method {owner}.{} must not have any parameter.",
            method.name
        );
        return Some(Diagnostic::error(ErrorCode::K3003).with_message(message));
    }
    if !method.return_type.is_named("System.Void") {
        let message = format!("{label} method {owner}.{} must return void.", method.name);
        return Some(Diagnostic::error(ErrorCode::K3003).with_message(message));
    }
    None
}

/// `this.Method(args);`, or a call through the interface for explicit
/// implementations.
fn invocation(method: &MethodDef, args: &str) -> String {
    match &method.explicit_interface {
        Some(iface) => {
            let name = method.name.rsplit('.').next().unwrap_or(&method.name);
            format!("(({})this).{name}({args});", display(iface))
        }
        None => format!("this.{}({args});", method.name),
    }
}
