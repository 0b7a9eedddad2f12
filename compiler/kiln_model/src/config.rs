//! Generation configuration.
//!
//! Configuration has two tiers. Assembly attributes give the defaults and
//! are read once per compilation; per-type attributes are consulted at the
//! point of use and fall back to those defaults. The resolved value is
//! immutable and passed explicitly to every generator.

use regex::Regex;
use thiserror::Error;

use crate::compilation::Compilation;
use crate::immutability::ImmutabilityRules;
use crate::types::{AttributeData, AttributeValue, TypeDef};
use crate::vocabulary::{
    find_attribute, DEFAULT_COPY_IGNORE, GENERATED_IMMUTABLE, IMMUTABLE_COPY_IGNORE,
    IMMUTABLE_GENERATION_OPTIONS, JSON_CONVERT, KEY_EQUATABLE, KEY_EQUATABLE_GENERIC, OPTION,
    PURE_ATTRIBUTE, TREAT_AS_IMMUTABLE,
};

/// Errors in assembly-level configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid attribute copy-ignore pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
}

/// Assembly defaults from `[ImmutableGenerationOptions]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImmutableOptions {
    pub treat_array_as_immutable: bool,
    pub generate_option_code: bool,
    pub generate_equality_by_default: bool,
    pub generate_json_converters: bool,
}

impl Default for ImmutableOptions {
    fn default() -> Self {
        ImmutableOptions {
            treat_array_as_immutable: false,
            generate_option_code: true,
            generate_equality_by_default: true,
            generate_json_converters: true,
        }
    }
}

impl ImmutableOptions {
    pub fn from_attribute(attribute: Option<&AttributeData>) -> Self {
        let defaults = ImmutableOptions::default();
        let Some(attribute) = attribute else {
            return defaults;
        };
        let flag = |name: &str, default: bool| {
            attribute
                .named(name)
                .and_then(AttributeValue::as_bool)
                .unwrap_or(default)
        };
        ImmutableOptions {
            treat_array_as_immutable: flag("TreatArrayAsImmutable", defaults.treat_array_as_immutable),
            generate_option_code: flag("GenerateOptionCode", defaults.generate_option_code),
            generate_equality_by_default: flag(
                "GenerateEqualityByDefault",
                defaults.generate_equality_by_default,
            ),
            generate_json_converters: flag(
                "GenerateNewtownsoftJsonNetConverters",
                defaults.generate_json_converters,
            ),
        }
    }
}

/// Optional runtime libraries present in the compilation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// `Uno.Equality.IKeyEquatable` is available.
    pub key_equality: bool,
    /// `System.Diagnostics.Contracts.PureAttribute` is available.
    pub pure_attribute: bool,
    /// `Uno.Option` is available.
    pub option_type: bool,
    /// Newtonsoft Json.NET is referenced.
    pub json_net: bool,
}

impl Capabilities {
    pub fn detect(compilation: &Compilation) -> Self {
        Capabilities {
            key_equality: compilation.contains(KEY_EQUATABLE)
                || compilation.contains(KEY_EQUATABLE_GENERIC),
            pure_attribute: compilation.contains(PURE_ATTRIBUTE),
            option_type: compilation.contains(OPTION) || compilation.contains("Uno.Option`1"),
            json_net: compilation.contains(JSON_CONVERT),
        }
    }
}

/// Compile every copy-ignore pattern declared in `attributes`.
pub fn copy_ignore_patterns(attributes: &[AttributeData]) -> Result<Vec<Regex>, ConfigError> {
    attributes
        .iter()
        .filter(|a| a.class == IMMUTABLE_COPY_IGNORE)
        .filter_map(|a| a.ctor_arg(0).and_then(AttributeValue::as_str))
        .map(compile_pattern)
        .collect()
}

fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source: Box::new(source),
    })
}

/// Resolved configuration for one compilation.
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    pub immutable: ImmutableOptions,
    pub capabilities: Capabilities,
    pub immutability: ImmutabilityRules,
    copy_ignore: Vec<Regex>,
}

impl GenerationConfig {
    /// Read the assembly tier. Fails only on a malformed assembly-level
    /// copy-ignore pattern.
    pub fn resolve(compilation: &Compilation) -> Result<Self, ConfigError> {
        let assembly = compilation.assembly_attributes();
        let immutable =
            ImmutableOptions::from_attribute(find_attribute(assembly, IMMUTABLE_GENERATION_OPTIONS));

        let allow_list = assembly
            .iter()
            .filter(|a| a.class == TREAT_AS_IMMUTABLE)
            .filter_map(|a| a.ctor_arg(0).and_then(AttributeValue::as_type))
            .filter_map(|ty| ty.definition_name().map(str::to_string))
            .collect();

        let mut copy_ignore = DEFAULT_COPY_IGNORE
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<Result<Vec<_>, _>>()?;
        copy_ignore.extend(copy_ignore_patterns(assembly)?);

        let config = GenerationConfig {
            immutability: ImmutabilityRules {
                treat_arrays_as_immutable: immutable.treat_array_as_immutable,
                allow_list,
            },
            capabilities: Capabilities::detect(compilation),
            immutable,
            copy_ignore,
        };
        tracing::debug!(
            options = ?config.immutable,
            capabilities = ?config.capabilities,
            allow_listed = config.immutability.allow_list.len(),
            "generation config resolved"
        );
        Ok(config)
    }

    /// Assembly-level copy-ignore patterns, built-in defaults first.
    pub fn copy_ignore(&self) -> &[Regex] {
        &self.copy_ignore
    }

    /// `GeneratedImmutable(GenerateEquality = ...)` when given, else the
    /// assembly default.
    pub fn generate_equality_for(&self, compilation: &Compilation, def: &TypeDef) -> bool {
        compilation
            .find_attribute_flattened(def, GENERATED_IMMUTABLE)
            .and_then(|a| a.named("GenerateEquality"))
            .and_then(AttributeValue::as_bool)
            .unwrap_or(self.immutable.generate_equality_by_default)
    }

    pub fn option_code_for(&self, def: &TypeDef) -> bool {
        self.capabilities.option_type && self.immutable.generate_option_code && !def.is_abstract
    }

    pub fn json_converters_for(&self, def: &TypeDef) -> bool {
        self.capabilities.json_net && self.immutable.generate_json_converters && !def.is_abstract
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
