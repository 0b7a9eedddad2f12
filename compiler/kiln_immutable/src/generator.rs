//! Per-type immutable unit.
//!
//! Validation runs first and only reports; its diagnostics are embedded at
//! the top of the unit. Emission then always produces the full entity and
//! builder, so a broken type fails where it is used rather than silently
//! disappearing.

use kiln_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode, Generator};
use kiln_emit::{begin_unit, Artifact, CodeWriter};
use kiln_model::config::copy_ignore_patterns;
use kiln_model::names::display;
use kiln_model::vocabulary::{GENERATED_IMMUTABLE, IMMUTABLE};
use kiln_model::{
    AttributeData, Compilation, GenerationConfig, Location, Origin, SymbolNames, TypeDef, TypeKind,
};
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::copy::CopyIgnore;
use crate::linkage::{is_builder_state, BaseTypeLinkage};

/// Immutable generator for one compilation.
pub struct ImmutableGenerator<'a> {
    pub(crate) compilation: &'a Compilation,
    pub(crate) config: &'a GenerationConfig,
    /// Full names of every type this pass generates. A base in this set
    /// gets its builder from this pass.
    pub(crate) targets: FxHashSet<String>,
}

impl<'a> ImmutableGenerator<'a> {
    pub fn new(
        compilation: &'a Compilation,
        config: &'a GenerationConfig,
        targets: impl IntoIterator<Item = String>,
    ) -> Self {
        ImmutableGenerator {
            compilation,
            config,
            targets: targets.into_iter().collect(),
        }
    }

    /// Source classes and structs carrying `[GeneratedImmutable]`, directly
    /// or through a base. Structs are accepted here so that they get a unit
    /// explaining why they cannot be immutable entities.
    pub fn is_requested(compilation: &Compilation, def: &TypeDef) -> bool {
        def.origin == Origin::Source
            && matches!(def.kind, TypeKind::Class | TypeKind::Struct)
            && compilation.has_attribute_flattened(def, GENERATED_IMMUTABLE)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(ty = %def.full_name()))]
    pub fn generate(&self, def: &TypeDef) -> Artifact {
        let mut cx = TypeContext::new(self, def);
        cx.validate();
        cx.collect_properties();
        tracing::debug!(
            properties = cx.properties.len(),
            option = cx.option_code,
            json = cx.json,
            equality = cx.equality,
            "entity prepared"
        );

        let mut w = begin_unit(Generator::Immutable, &["System"]);
        for diagnostic in cx.sink.diagnostics() {
            w.diagnostic(diagnostic);
        }
        if !cx.sink.diagnostics().is_empty() {
            w.blank();
        }
        w.namespace(&def.namespace, |w| cx.write_unit(w));

        let TypeContext { names, sink, .. } = cx;
        Artifact::new(
            Generator::Immutable,
            &names,
            w.finish(),
            sink.into_diagnostics(),
        )
    }
}

/// One builder property, ready to emit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BuilderProperty<'a> {
    pub(crate) name: &'a str,
    /// Type as written in code.
    pub(crate) ty: String,
    /// Hides a property of a base builder.
    pub(crate) is_new: bool,
    /// Attribute lines copied from the entity property.
    pub(crate) attributes: Vec<String>,
}

/// State of one `generate` call.
pub(crate) struct TypeContext<'c> {
    pub(crate) generator: &'c ImmutableGenerator<'c>,
    pub(crate) def: &'c TypeDef,
    pub(crate) names: SymbolNames,
    pub(crate) linkage: BaseTypeLinkage,
    pub(crate) properties: Vec<BuilderProperty<'c>>,
    pub(crate) option_code: bool,
    pub(crate) json: bool,
    pub(crate) equality: bool,
    pub(crate) sink: DiagnosticSink,
}

impl<'c> TypeContext<'c> {
    fn new(generator: &'c ImmutableGenerator<'c>, def: &'c TypeDef) -> Self {
        let names = SymbolNames::of(def);
        let config = generator.config;
        TypeContext {
            generator,
            def,
            sink: DiagnosticSink::new(Generator::Immutable, names.qualified()),
            names,
            linkage: generator.linkage(def),
            properties: Vec::new(),
            option_code: config.option_code_for(def),
            json: config.json_converters_for(def),
            equality: config.generate_equality_for(generator.compilation, def),
        }
    }

    pub(crate) fn compilation(&self) -> &'c Compilation {
        self.generator.compilation
    }

    /// Report at `location`, or at the type's declaration.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic, location: Option<&Location>) {
        let location = location.or(self.def.location.as_ref()).cloned();
        self.sink.report(diagnostic.with_location(location));
    }

    pub(crate) fn is_abstract(&self) -> bool {
        self.def.is_abstract
    }

    /// `new ` when a base entity or builder already declares the member.
    pub(crate) fn new_modifier(&self) -> &'static str {
        if self.linkage.is_linked() {
            "new "
        } else {
            ""
        }
    }

    pub(crate) fn pure(&self, w: &mut CodeWriter) {
        if self.generator.config.capabilities.pure_attribute {
            w.line("[global::System.Diagnostics.Contracts.Pure]");
        }
    }

    fn collect_properties(&mut self) {
        let def = self.def;
        let config = self.generator.config;
        let type_level = self.patterns(&def.attributes, None);
        let copy = CopyIgnore::new(config.copy_ignore(), type_level);

        let mut properties = Vec::new();
        for property in def.properties().filter(|p| is_builder_state(p)) {
            let own = self.patterns(&property.attributes, property.location.as_ref());
            properties.push(BuilderProperty {
                name: &property.name,
                ty: display(&property.ty),
                is_new: self.linkage.shadows(&property.name),
                attributes: copy.copied(&property.attributes, &own),
            });
        }
        self.properties = properties;
    }

    /// Copy-ignore patterns declared on a type or property. An invalid
    /// pattern is reported and the scope contributes none.
    fn patterns(&mut self, attributes: &[AttributeData], location: Option<&Location>) -> Vec<Regex> {
        match copy_ignore_patterns(attributes) {
            Ok(patterns) => patterns,
            Err(err) => {
                let diagnostic = Diagnostic::error(ErrorCode::K0002).with_message(err.to_string());
                self.report(diagnostic, location);
                Vec::new()
            }
        }
    }

    fn write_unit(&self, w: &mut CodeWriter) {
        self.write_entity_attributes(w);
        let abstract_clause = if self.is_abstract() { "abstract " } else { "" };
        let header = format!(
            "{} {abstract_clause}partial class {}",
            self.def.accessibility.as_csharp(),
            self.names.name_with_generics
        );
        w.block(header, |w| {
            if !self.is_abstract() {
                self.write_default(w);
                w.blank();
            }
            self.write_builder(w);
            if self.option_code {
                w.blank();
                self.write_option_region(w);
            }
            w.blank();
            self.write_constructors(w);
            if !self.is_abstract() {
                w.blank();
                self.write_conversions(w);
            }
        });
        w.blank();
        self.write_extensions(w);
        if self.json {
            w.blank();
            self.write_json_converter(w);
        }
    }

    fn write_entity_attributes(&self, w: &mut CodeWriter) {
        let names = &self.names;
        if self.compilation().has_attribute_flattened(self.def, IMMUTABLE) {
            w.line("// Note: The attribute [Uno.Immutable] is already present on the class");
        } else {
            w.line("[global::Uno.Immutable] // Mark this class as Immutable for analyzers requiring it.");
        }
        if self.equality {
            w.line(
                "[global::Uno.GeneratedEquality] // Set [GeneratedImmutable(GenerateEquality = false)] to opt out.",
            );
        }
        if self.json {
            w.line(format!(
                "[global::Newtonsoft.Json.JsonConverter(typeof({}BuilderJsonConverterTo{}))]",
                names.name, names.definition
            ));
        }
        w.line(format!(
            "[global::Uno.ImmutableBuilder(typeof({}.Builder))] // Other generators can use this to find the builder.",
            names.definition
        ));
    }

    fn write_default(&self, w: &mut CodeWriter) {
        let n = &self.names.name_with_generics;
        w.line("/// <summary>");
        w.line("/// Default instance with only property initializers set.");
        w.line("/// </summary>");
        w.line(format!(
            "public static readonly {}{n} Default = new {n}();",
            self.new_modifier()
        ));
    }

    fn write_constructors(&self, w: &mut CodeWriter) {
        let names = &self.names;
        w.line("// Default constructor, declared here so application code cannot define one.");
        w.line("// New instances are created through the builder.");
        w.line(format!("protected {}() {{}}", names.name));
        w.blank();

        w.line("/// <summary>");
        w.line(format!(
            "/// Construct a new immutable instance of {} from a builder.",
            names.name_for_xml
        ));
        w.line("/// </summary>");
        w.line("/// <remarks>");
        w.line("/// Application code should prefer the implicit conversion, which calls this constructor.");
        w.line("/// </remarks>");
        w.line(format!(
            "/// <param name=\"builder\">The builder for {}.</param>",
            names.name_for_xml
        ));
        let chaining = if self.linkage.is_linked() {
            " : base(builder)"
        } else {
            ""
        };
        w.block(format!("public {}(Builder builder){chaining}", names.name), |w| {
            w.line("if (builder == null) throw new global::System.ArgumentNullException(nameof(builder));");
            for property in &self.properties {
                w.line(format!("{0} = builder.{0};", property.name));
            }
        });
    }

    fn write_conversions(&self, w: &mut CodeWriter) {
        let n = &self.names.name_with_generics;
        w.line(format!(
            "// Implicit cast from {n} to Builder: creates a new builder over this instance."
        ));
        w.block(
            format!("public static implicit operator Builder({n} original)"),
            |w| w.line("return new Builder(original);"),
        );
        w.blank();
        w.line(format!(
            "// Implicit cast from Builder to {n}: builds (or reuses) the immutable instance."
        ));
        w.block(
            format!("public static implicit operator {n}(Builder builder)"),
            |w| w.line("return builder.ToImmutable();"),
        );
    }
}
