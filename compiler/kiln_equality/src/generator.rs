//! Per-type equality unit.
//!
//! The unit reopens the partial type and adds, in order: the static and
//! instance `Equals` overloads, the private `InnerEquals` walk, the `==`
//! and `!=` operators, the memoized `GetHashCode`, and, when key members
//! exist here or in a base, the `KeyEquals`/`GetKeyHashCode` shadow.

use kiln_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode, Generator};
use kiln_emit::{begin_unit, Artifact, CodeWriter};
use kiln_model::vocabulary::GENERATED_EQUALITY;
use kiln_model::{
    Capabilities, Compilation, GenerationConfig, Location, Origin, SymbolNames, TypeDef, TypeKind,
};
use rustc_hash::FxHashSet;

use crate::inheritance::BaseEquality;
use crate::members::{classify, EqualityMember};

/// Equality generator for one compilation.
pub struct EqualityGenerator<'a> {
    pub(crate) compilation: &'a Compilation,
    pub(crate) config: &'a GenerationConfig,
    /// Full names of every type this pass generates equality for. A base
    /// in this set is known to get `Equals`/`GetHashCode` overrides even
    /// though the model does not show them yet.
    pub(crate) targets: FxHashSet<String>,
}

impl<'a> EqualityGenerator<'a> {
    pub fn new(
        compilation: &'a Compilation,
        config: &'a GenerationConfig,
        targets: impl IntoIterator<Item = String>,
    ) -> Self {
        EqualityGenerator {
            compilation,
            config,
            targets: targets.into_iter().collect(),
        }
    }

    /// Source classes and structs carrying `[GeneratedEquality]`, directly
    /// or through a base.
    pub fn is_requested(compilation: &Compilation, def: &TypeDef) -> bool {
        def.origin == Origin::Source
            && matches!(def.kind, TypeKind::Class | TypeKind::Struct)
            && compilation.has_attribute_flattened(def, GENERATED_EQUALITY)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(ty = %def.full_name()))]
    pub fn generate(&self, def: &TypeDef) -> Artifact {
        let mut cx = TypeContext::new(self, def);
        let mut w = begin_unit(Generator::Equality, &["System"]);
        w.namespace(&def.namespace, |w| cx.write_type(w));

        let TypeContext { names, sink, .. } = cx;
        Artifact::new(
            Generator::Equality,
            &names,
            w.finish(),
            sink.into_diagnostics(),
        )
    }
}

/// State of one `generate` call.
pub(crate) struct TypeContext<'c> {
    pub(crate) generator: &'c EqualityGenerator<'c>,
    pub(crate) def: &'c TypeDef,
    pub(crate) names: SymbolNames,
    sink: DiagnosticSink,
    /// Members already reported as unusable for hashing.
    pub(crate) unhashable: FxHashSet<&'c str>,
}

impl<'c> TypeContext<'c> {
    fn new(generator: &'c EqualityGenerator<'c>, def: &'c TypeDef) -> Self {
        let names = SymbolNames::of(def);
        TypeContext {
            generator,
            def,
            sink: DiagnosticSink::new(Generator::Equality, names.qualified()),
            names,
            unhashable: FxHashSet::default(),
        }
    }

    pub(crate) fn compilation(&self) -> &'c Compilation {
        self.generator.compilation
    }

    fn capabilities(&self) -> Capabilities {
        self.generator.config.capabilities
    }

    /// Report a warning and embed it at the current position.
    pub(crate) fn warn(
        &mut self,
        w: &mut CodeWriter,
        code: ErrorCode,
        message: impl Into<String>,
        location: Option<&Location>,
    ) {
        let location = location.or(self.def.location.as_ref()).cloned();
        let diagnostic = Diagnostic::warning(code)
            .with_message(message)
            .with_location(location);
        w.diagnostic(self.sink.report(diagnostic));
    }

    fn pure(&self, w: &mut CodeWriter) {
        if self.capabilities().pure_attribute {
            w.line("[global::System.Diagnostics.Contracts.Pure]");
        }
    }

    fn is_class(&self) -> bool {
        self.def.is_reference_type()
    }

    fn write_type(&mut self, w: &mut CodeWriter) {
        let def = self.def;
        if !def.is_partial {
            let message = format!(
                "The type {} must be partial to receive generated equality members.",
                self.names.qualified()
            );
            self.warn(w, ErrorCode::K1001, message, None);
        }

        let base = self.generator.base_equality(def);
        let members = classify(self.compilation(), def);
        let wants_key = base.as_ref().is_some_and(|b| b.key_equatable) || !members.key.is_empty();
        let generate_key = wants_key && self.capabilities().key_equality;
        tracing::debug!(
            equality = members.equality.len(),
            hash = members.hash.len(),
            key = members.key.len(),
            generate_key,
            "members classified"
        );

        let n = self.names.name_with_generics.clone();
        let kind = if self.is_class() { "class" } else { "struct" };
        let mut header = format!(
            "{} partial {kind} {n} : global::System.IEquatable<{n}>",
            def.accessibility.as_csharp()
        );
        if generate_key {
            header.push_str(&format!(
                ", global::Uno.Equality.IKeyEquatable<{n}>, global::Uno.Equality.IKeyEquatable"
            ));
        }

        w.block(header, |w| {
            if wants_key && !generate_key {
                self.warn(
                    w,
                    ErrorCode::K1006,
                    "Key members are declared but Uno.Equality.IKeyEquatable is not referenced; \
                     key equality is not generated.",
                    None,
                );
            }
            self.write_equals(w, base.as_ref(), &members.equality);
            w.blank();
            self.write_operators(w);
            w.blank();
            self.write_hash(w, base.as_ref(), &members.hash);
            if generate_key {
                w.blank();
                self.write_key_equality(w, base.as_ref(), &members.key);
            }
        });
    }

    fn write_equals(
        &mut self,
        w: &mut CodeWriter,
        base: Option<&BaseEquality>,
        members: &[EqualityMember<'c>],
    ) {
        let n = self.names.name_with_generics.clone();
        let is_class = self.is_class();

        w.line("/// <summary>");
        w.line(format!(
            "/// Checks two instances of {} for equality.",
            self.names.name_for_xml
        ));
        w.line("/// </summary>");
        w.line("/// <remarks>");
        w.line("/// You can also simply use the overriden '==' and '!=' operators.");
        w.line("/// </remarks>");
        self.pure(w);
        w.block(format!("public static bool Equals({n} a, {n} b)"), |w| {
            if is_class {
                w.line("if (ReferenceEquals(a, b)) return true; // Same instance or both null");
                w.block("if (ReferenceEquals(null, a))", |w| {
                    w.line("return ReferenceEquals(null, b);");
                });
                w.line("return !ReferenceEquals(null, b) && a.InnerEquals(b);");
            } else {
                w.line("return a.InnerEquals(b);");
            }
        });
        w.blank();

        w.line("/// <inheritdoc />");
        self.pure(w);
        w.block(
            format!("public bool Equals({n} other) // Implementation of `IEquatable<{n}>.Equals()`"),
            |w| {
                if is_class {
                    w.line("if (ReferenceEquals(this, other)) return true;");
                    w.line("if (ReferenceEquals(null, other)) return false;");
                }
                w.line("return InnerEquals(other);");
            },
        );
        w.blank();

        w.line("/// <inheritdoc />");
        self.pure(w);
        w.block(
            "public override bool Equals(object other) // This one from `System.Object.Equals()`",
            |w| {
                if is_class {
                    w.line(format!("return Equals(other as {n});"));
                } else {
                    w.line(format!("return other is {n} ? Equals(({n})other) : false;"));
                }
            },
        );
        w.blank();

        w.region(
            "\"InnerEquals\" Method -- THIS IS WHERE EQUALITY IS CHECKED",
            |w| {
                w.line("// private method doing the real .Equals() job");
                w.block(format!("private bool InnerEquals({n} other)"), |w| {
                    w.line("if (other.GetType() != GetType()) return false;");
                    w.line("if (other.GetHashCode() != GetHashCode()) return false;");
                    let base_call = match base {
                        Some(b) if b.overrides_equals => Some("base.Equals(other)"),
                        Some(b) => {
                            let message = format!(
                                "Base type {} does not override .Equals() method. \
                                 It could lead to erroneous results.",
                                b.name
                            );
                            self.warn(w, ErrorCode::K1002, message, None);
                            None
                        }
                        None => None,
                    };
                    self.write_equal_logic(w, members, base_call);
                });
            },
        );
    }

    fn write_operators(&self, w: &mut CodeWriter) {
        let n = &self.names.name_with_generics;
        w.line("/// <summary>");
        w.line("/// Equality operator, same as the static Equals().");
        w.line("/// </summary>");
        self.pure(w);
        w.block(format!("public static bool operator ==({n} a, {n} b)"), |w| {
            w.line("return Equals(a, b);");
        });
        w.blank();
        w.line("/// <summary>");
        w.line("/// Inequality operator, negation of the static Equals().");
        w.line("/// </summary>");
        self.pure(w);
        w.block(format!("public static bool operator !=({n} a, {n} b)"), |w| {
            w.line("return !Equals(a, b);");
        });
    }

    fn write_hash(
        &mut self,
        w: &mut CodeWriter,
        base: Option<&BaseEquality>,
        members: &[EqualityMember<'c>],
    ) {
        w.region(
            "\".GetHashCode()\" Section -- THIS IS WHERE HASH CODE IS COMPUTED",
            |w| {
                w.line("/// <inheritdoc />");
                w.block("public override int GetHashCode()", |w| {
                    w.line("#pragma warning disable CS0171");
                    w.line(
                        "return _computedHashCode ?? (int)(_computedHashCode = ComputeHashCode());",
                    );
                    w.line("#pragma warning restore CS0171");
                });
                w.blank();
                w.line("private int? _computedHashCode;");
                w.blank();
                w.block("private int ComputeHashCode()", |w| {
                    let base_call = match base {
                        Some(b) if b.overrides_hash => Some("base.GetHashCode()"),
                        Some(b) => {
                            let message = format!(
                                "Base type {} does not override .GetHashCode() method. \
                                 It could lead to erroneous results.",
                                b.name
                            );
                            self.warn(w, ErrorCode::K1003, message, None);
                            None
                        }
                        None => None,
                    };
                    self.write_hash_logic(w, members, base_call);
                });
            },
        );
    }

    fn write_key_equality(
        &mut self,
        w: &mut CodeWriter,
        base: Option<&BaseEquality>,
        members: &[EqualityMember<'c>],
    ) {
        let n = self.names.name_with_generics.clone();
        let is_class = self.is_class();
        let base_key = base.is_some_and(|b| b.key_equatable);

        w.region(
            "\"Key Equality\" Section -- THIS IS WHERE KEY EQUALS IS DONE + KEY HASH CODE IS COMPUTED",
            |w| {
                w.line("/// <inheritdoc />");
                self.pure(w);
                w.block("public bool KeyEquals(object other)", |w| {
                    if is_class {
                        w.line(format!("return KeyEquals(other as {n});"));
                    } else {
                        w.line(format!("return other is {n} ? KeyEquals(({n})other) : false;"));
                    }
                });
                w.blank();

                w.line("/// <inheritdoc />");
                self.pure(w);
                w.block(format!("public bool KeyEquals({n} other)"), |w| {
                    if is_class {
                        w.line("if (ReferenceEquals(this, other)) return true;");
                        w.line("if (ReferenceEquals(null, other)) return false;");
                    }
                    w.line("return InnerKeyEquals(other);");
                });
                w.blank();

                w.line("// private method doing the real .KeyEquals() job");
                w.block(format!("private bool InnerKeyEquals({n} other)"), |w| {
                    w.line("if (other.GetKeyHashCode() != GetKeyHashCode()) return false;");
                    let base_call = base_key.then_some("base.KeyEquals(other)");
                    self.write_equal_logic(w, members, base_call);
                });
                w.blank();

                w.line("/// <inheritdoc />");
                w.block("public int GetKeyHashCode()", |w| {
                    w.line("#pragma warning disable CS0171");
                    w.line(
                        "return _computedKeyHashCode ?? (int)(_computedKeyHashCode = ComputeKeyHashCode());",
                    );
                    w.line("#pragma warning restore CS0171");
                });
                w.blank();
                w.line("private int? _computedKeyHashCode;");
                w.blank();
                w.block("private int ComputeKeyHashCode()", |w| {
                    let base_call = base_key.then_some("base.GetKeyHashCode()");
                    self.write_hash_logic(w, members, base_call);
                });
            },
        );
    }
}
