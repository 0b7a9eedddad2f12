//! The nested `Builder` class and the Option region.
//!
//! A builder holds sparse overrides over `_original`: one backing field and
//! one "is set" flag per property. A setter compares the new value with the
//! ORIGINAL entity's value; setting a value back clears the override.
//! Every setter drops the memoized `_cachedResult`. The generated builder
//! has no synchronization and is documented as single-writer.

use kiln_emit::CodeWriter;

use crate::generator::{BuilderProperty, TypeContext};

impl TypeContext<'_> {
    pub(crate) fn write_builder(&self, w: &mut CodeWriter) {
        let names = &self.names;
        let n = &names.name_with_generics;
        let x = &names.name_for_xml;
        let first = self
            .properties
            .first()
            .map_or_else(|| format!("{}Property", names.name), |p| p.name.to_string());

        w.line("/// <summary>");
        w.line(format!("/// Stateful builder to construct immutable instance(s) of {x}."));
        w.line("/// </summary>");
        w.line("/// <remarks>");
        w.line("/// This builder is mutable. Change its properties directly or with the");
        w.line("/// .WithXXX() methods. It can still be changed after `.ToImmutable()`:");
        w.line("/// the next call simply builds a new version from the current state.");
        w.line("/// **THE BUILDER IS NOT THREAD-SAFE** (it shouldn't be accessed concurrently from many threads)");
        w.line("/// </remarks>");
        w.line("/// <example>");
        w.line(format!(
            "/// {x}.Builder b = my{}Instance.With{first}([{first} value]);",
            names.name
        ));
        w.line(format!(
            "/// {x} my{}Instance = new {x}.Builder {{ {first} = [{first} value], ... }};",
            names.name
        ));
        w.line("/// </example>");

        let abstract_clause = if self.is_abstract() { "abstract " } else { "" };
        let mut bases: Vec<String> = self
            .linkage
            .builder_base()
            .map(str::to_string)
            .into_iter()
            .collect();
        if !self.is_abstract() {
            bases.push(format!("global::Uno.IImmutableBuilder<{n}>"));
        }
        let inheritance = if bases.is_empty() {
            String::new()
        } else {
            format!(" : {}", bases.join(", "))
        };
        let header = format!(
            "{} {abstract_clause}{}partial class Builder{inheritance}",
            self.def.accessibility.as_csharp(),
            self.new_modifier()
        );

        w.block(header, |w| {
            self.write_builder_constructors(w);
            for property in &self.properties {
                w.blank();
                self.write_builder_property(w, property);
            }
            w.blank();
            if self.is_abstract() {
                w.line(format!("// Since {n} is abstract, there is no .ToImmutable():"));
                w.line("// it is implemented by the builders of derived classes.");
            } else {
                self.write_to_immutable(w);
            }
            if !self.properties.is_empty() {
                w.blank();
                self.write_builder_withs(w);
            }
        });
    }

    fn write_builder_constructors(&self, w: &mut CodeWriter) {
        let n = &self.names.name_with_generics;
        if self.linkage.is_linked() {
            if self.is_abstract() {
                w.block(format!("protected Builder({n} original) : base(original)"), |w| {
                    w.line("// Abstract: `_original` is assigned and null-checked by the base builder.");
                });
            } else {
                w.block(
                    format!("public Builder({n} original) : base(original ?? {n}.Default)"),
                    |w| w.line("// `_original` is assigned in the base builder."),
                );
                w.blank();
                w.block(format!("public Builder() : base({n}.Default)"), |w| {
                    w.line("// `_original` is assigned in the base builder.");
                });
            }
            return;
        }

        w.line("// Dirty means there's a difference from `_original`.");
        w.line("protected bool _isDirty = false;");
        w.blank();
        w.line("// This is the original entity. Never null.");
        w.line(format!("protected internal readonly {n} _original;"));
        w.blank();
        w.line("// Cached version of the generated entity (flushed when the builder is updated)");
        w.line(format!("protected {n} _cachedResult = default({n});"));
        w.blank();
        if self.is_abstract() {
            w.block(format!("protected Builder({n} original)"), |w| {
                w.line("_original = original ?? throw new global::System.ArgumentNullException(nameof(original));");
            });
        } else {
            w.block(format!("public Builder({n} original)"), |w| {
                w.line(format!("_original = original ?? {n}.Default;"));
            });
            w.blank();
            w.block("public Builder()", |w| {
                w.line(format!("_original = {n}.Default;"));
            });
        }
    }

    fn write_builder_property(&self, w: &mut CodeWriter, property: &BuilderProperty<'_>) {
        let n = &self.names.name_with_generics;
        let p = property.name;
        let t = &property.ty;
        let new = if property.is_new { "new " } else { "" };

        w.line(format!("// Backing field for property {p}."));
        w.line(format!("private {t} _{p};"));
        w.blank();
        w.line(format!("// If the property {p} has been set in the builder."));
        w.line("// `false` means it hasn't been set, or has been set back to the value of `_original`.");
        w.line(format!("private bool _is{p}Set = false;"));
        w.blank();
        w.line("/// <summary>");
        w.line(format!("/// Get/Set the current builder value for {p}."));
        w.line("/// </summary>");
        for attribute in &property.attributes {
            w.line(attribute);
        }
        w.block(format!("public {new}{t} {p}"), |w| {
            w.line(format!("get => _is{p}Set ? _{p} : (({n})_original).{p};"));
            w.block("set", |w| {
                w.line(format!("var originalValue = (({n})_original).{p};"));
                w.line(format!(
                    "var isSameAsOriginal = global::System.Collections.Generic.EqualityComparer<{t}>.Default.Equals(originalValue, value);"
                ));
                w.block("if (isSameAsOriginal)", |w| {
                    w.line(format!("// Property {p} has been set back to original value"));
                    w.line(format!("_is{p}Set = false;"));
                    w.line(format!(
                        "_{p} = default({t}); // dereference to prevent any leak (when it's a reference type)"
                    ));
                });
                w.block("else", |w| {
                    w.line(format!("_is{p}Set = true;"));
                    w.line(format!("_{p} = value;"));
                    w.line("_isDirty = true;");
                });
                w.line("_cachedResult = null;");
            });
        });
    }

    fn write_to_immutable(&self, w: &mut CodeWriter) {
        let names = &self.names;
        let n = &names.name_with_generics;
        let built = format!("new{}", names.name);

        w.line("/// <summary>");
        w.line(format!("/// Create an immutable instance of {}.", names.name_for_xml));
        w.line("/// </summary>");
        w.line("/// <remarks>");
        w.line("/// Returns the original when nothing changed in the builder, or when the changes");
        w.line("/// amount to the original values. Repeated calls without changes return the same instance.");
        w.line("/// **THIS METHOD IS NOT THREAD-SAFE** (it shouldn't be accessed concurrently from many threads)");
        w.line("/// </remarks>");
        self.pure(w);
        w.block(format!("public {}{n} ToImmutable()", self.new_modifier()), |w| {
            w.line(format!("var cachedResult = _cachedResult as {n};"));
            w.block("if (!ReferenceEquals(cachedResult, null))", |w| {
                w.line("return cachedResult; // already computed, no need to redo this.");
            });
            w.blank();
            w.block("if (_isDirty)", |w| {
                w.line(format!("var {built} = new {n}(this);"));
                w.block(format!("if (!Equals({built}, _original))"), |w| {
                    w.line(format!("return ({n})(_cachedResult = {built});"));
                });
            });
            w.line(format!("return ({n})(_cachedResult = _original);"));
        });
    }

    fn write_builder_withs(&self, w: &mut CodeWriter) {
        let names = &self.names;
        let n = &names.name_with_generics;
        let x = &names.name_for_xml;
        let region = format!(".WithXXX() methods on {n}.Builder");

        w.region(&region, |w| {
            for (index, property) in self.properties.iter().enumerate() {
                let p = property.name;
                let t = &property.ty;
                let new = if property.is_new { "new " } else { "" };
                if index > 0 {
                    w.blank();
                }
                w.line("/// <summary>");
                w.line(format!("/// Set property {p} in a fluent declaration."));
                w.line("/// </summary>");
                w.line("/// <remarks>");
                w.line("/// **THIS METHOD IS NOT THREAD-SAFE** (it shouldn't be accessed concurrently from many threads)");
                w.line("/// </remarks>");
                w.line("/// <example>");
                w.line(format!("/// {t} new{p}Value = [...];"));
                w.line(format!("/// {x} instance = builder.With{p}(new{p}Value);"));
                w.line("/// </example>");
                w.block(format!("public {new}Builder With{p}({t} value)"), |w| {
                    w.line(format!("{p} = value;"));
                    w.line("return this;");
                });
                w.blank();
                w.line("/// <summary>");
                w.line(format!(
                    "/// Set property {p} in a fluent declaration by projecting the previous value."
                ));
                w.line("/// </summary>");
                w.line("/// <remarks>");
                w.line("/// **THIS METHOD IS NOT THREAD-SAFE** (it shouldn't be accessed concurrently from many threads)");
                w.line("/// The selector is called immediately.");
                w.line("/// </remarks>");
                w.block(
                    format!("public {new}Builder With{p}(Func<{t}, {t}> valueSelector)"),
                    |w| {
                        w.line(format!("{p} = valueSelector({p});"));
                        w.line("return this;");
                    },
                );
            }
        });
    }

    pub(crate) fn write_option_region(&self, w: &mut CodeWriter) {
        let names = &self.names;
        let n = &names.name_with_generics;
        let x = &names.name_for_xml;
        let new = self.new_modifier();
        let option = format!("global::Uno.Option<{n}>");
        let region = format!("Uno.Option<{n}>'s specific code");

        w.region(&region, |w| {
            w.line(format!(
                "public static readonly {new}{option} None = global::Uno.Option.None<{n}>();"
            ));
            w.blank();
            w.block("partial class Builder", |w| {
                w.line("// Set by FromOption(None). Any setter, base levels included, marks the");
                w.line("// builder dirty, which turns the result back into Some.");
                w.line("private bool _isNone;");
                w.blank();
                w.block(format!("public static {new}Builder FromOption({option} original)"), |w| {
                    w.block("if (original.MatchSome(out var o))", |w| {
                        w.line("return new Builder(o);");
                    });
                    w.line("return new Builder() { _isNone = true };");
                });
                w.blank();
                w.line("/// <summary>");
                w.line(format!(
                    "/// Get an Option&lt;{x}&gt; for the current state of the builder"
                ));
                w.line("/// </summary>");
                w.line("/// <remarks>");
                w.line(format!("/// Will return {x}.None or Option.Some(ToImmutable());"));
                w.line("/// </remarks>");
                self.pure(w);
                w.block(format!("public {new}{option} ToOptionImmutable()"), |w| {
                    w.line(format!(
                        "return _isNone && !_isDirty ? {n}.None : global::Uno.Option.Some(ToImmutable());"
                    ));
                });
                w.blank();
                w.line(format!("// Implicit cast from Option<{n}> to Builder"));
                w.block(
                    format!("public static implicit operator Builder({option} original)"),
                    |w| w.line("return Builder.FromOption(original);"),
                );
                w.blank();
                w.line(format!("// Implicit cast from Builder to Option<{n}>"));
                w.block(
                    format!("public static implicit operator {option}(Builder builder)"),
                    |w| w.line("return builder.ToOptionImmutable();"),
                );
            });
        });
    }
}
