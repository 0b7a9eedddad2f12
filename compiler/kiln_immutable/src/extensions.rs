//! Code emitted next to the entity: the `<Name>Extensions` class with the
//! entity-level `With<P>` helpers, and the Json.NET converter.

use kiln_emit::CodeWriter;

use crate::generator::TypeContext;

impl TypeContext<'_> {
    pub(crate) fn write_extensions(&self, w: &mut CodeWriter) {
        let names = &self.names;
        let header = format!(
            "{} static partial class {}Extensions",
            self.def.accessibility.as_csharp(),
            names.name
        );
        w.block(header, |w| {
            if self.properties.is_empty() || self.is_abstract() {
                return;
            }
            let region = format!(".WithXXX() methods on {}", names.name_with_generics);
            w.region(&region, |w| {
                for (index, property) in self.properties.iter().enumerate() {
                    if index > 0 {
                        w.blank();
                    }
                    self.write_entity_withs(w, property.name, &property.ty);
                }
            });
        });
    }

    fn write_entity_withs(&self, w: &mut CodeWriter, p: &str, t: &str) {
        let names = &self.names;
        let n = &names.name_with_generics;
        let x = &names.name_for_xml;
        let generics = &names.generic_arguments;
        let constraints = &names.constraints;
        let builder = format!("{n}.Builder");

        w.line("/// <summary>");
        w.line(format!("/// Set property {p} in a fluent declaration."));
        w.line("/// </summary>");
        w.line("/// <remarks>");
        w.line(format!(
            "/// The return value is a builder which can be casted implicitly to {x} or used to make more changes."
        ));
        w.line("/// **THIS METHOD IS NOT THREAD-SAFE** (it shouldn't be accessed concurrently from many threads)");
        w.line("/// </remarks>");
        w.line("/// <example>");
        w.line(format!("/// {x} original = {x}.Default; // first immutable instance"));
        w.line(format!("/// {t} new{p}Value = [...];"));
        w.line(format!(
            "/// {x} modified = original.With{p}(new{p}Value); // create a new modified immutable instance"
        ));
        w.line("/// </example>");
        self.pure(w);
        w.block(
            format!("public static {builder} With{p}{generics}(this {n} entity, {t} value){constraints}"),
            |w| w.line(format!("return new {builder}(entity).With{p}(value);")),
        );
        w.blank();

        w.line("/// <summary>");
        w.line(format!(
            "/// Set property {p} in a fluent declaration by projecting the previous value."
        ));
        w.line("/// </summary>");
        w.line("/// <remarks>");
        w.line("/// The selector is called immediately.");
        w.line("/// </remarks>");
        self.pure(w);
        w.block(
            format!(
                "public static {builder} With{p}{generics}(this {n} entity, Func<{t}, {t}> valueSelector){constraints}"
            ),
            |w| w.line(format!("return new {builder}(entity).With{p}(valueSelector);")),
        );

        if !self.option_code {
            return;
        }
        let option = format!("global::Uno.Option<{n}>");
        w.blank();
        w.line("/// <summary>");
        w.line(format!("/// Set property {p} on an optional {x}."));
        w.line("/// </summary>");
        w.line("/// <remarks>");
        w.line(format!(
            "/// When the entity is Option.None&lt;{x}&gt;, the result is the same as {x}.Default.With{p}(value)."
        ));
        w.line("/// </remarks>");
        self.pure(w);
        w.block(
            format!(
                "public static {builder} With{p}{generics}(this {option} optionEntity, {t} value){constraints}"
            ),
            |w| w.line(format!("return {builder}.FromOption(optionEntity).With{p}(value);")),
        );
        w.blank();
        w.line("/// <summary>");
        w.line(format!(
            "/// Set property {p} on an optional {x} by projecting the previous value."
        ));
        w.line("/// </summary>");
        self.pure(w);
        w.block(
            format!(
                "public static {builder} With{p}{generics}(this {option} optionEntity, Func<{t}, {t}> valueSelector){constraints}"
            ),
            |w| {
                w.line(format!(
                    "return {builder}.FromOption(optionEntity).With{p}(valueSelector);"
                ));
            },
        );
    }

    /// Serializes the entity through its builder's shape and deserializes
    /// by building.
    pub(crate) fn write_json_converter(&self, w: &mut CodeWriter) {
        let names = &self.names;
        let n = &names.name_with_generics;
        let header = format!(
            "public sealed class {0}BuilderJsonConverterTo{0}{1} : global::Newtonsoft.Json.JsonConverter{2}",
            names.name, names.generic_arguments, names.constraints
        );
        w.block(header, |w| {
            w.block(
                "public override void WriteJson(global::Newtonsoft.Json.JsonWriter writer, object value, global::Newtonsoft.Json.JsonSerializer serializer)",
                |w| {
                    w.line(format!("var v = ({n}.Builder)({n})value;"));
                    w.line("serializer.Serialize(writer, v);");
                },
            );
            w.blank();
            w.block(
                "public override object ReadJson(global::Newtonsoft.Json.JsonReader reader, Type objectType, object existingValue, global::Newtonsoft.Json.JsonSerializer serializer)",
                |w| {
                    w.line(format!("var o = serializer.Deserialize<{n}.Builder>(reader);"));
                    w.line(format!("return ({n})o;"));
                },
            );
            w.blank();
            w.block("public override bool CanConvert(Type objectType)", |w| {
                w.line(format!(
                    "return objectType == typeof({n}) || objectType == typeof({n}.Builder);"
                ));
            });
        });
    }
}
