//! Generated artifacts.
//!
//! An artifact is one generated source unit: a deterministic path derived
//! from the generator and the type's file-safe name, the full text, and the
//! diagnostics reported while producing it.

use kiln_diagnostic::{Diagnostic, Generator};
use kiln_model::SymbolNames;

use crate::CodeWriter;

const RULE: &str =
    "// *************************************************************************************";

/// One generated source unit. Never mutated after it is produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub generator: Generator,
    /// Relative path, always with `/` separators.
    pub path: String,
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Artifact {
    pub fn new(
        generator: Generator,
        names: &SymbolNames,
        text: String,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Artifact {
            generator,
            path: artifact_path(generator, names),
            text,
            diagnostics,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// `<Generator>/<namespace parts>/<FileSafeName>.g.cs`
pub fn artifact_path(generator: Generator, names: &SymbolNames) -> String {
    format!("{}/{}.g.cs", generator.name(), names.file_path)
}

/// Compiler warnings the generated members can raise on their own: hiding
/// inherited members, using obsolete ones, and missing XML docs. Embedded
/// `#warning` diagnostics (CS1030) must stay visible.
const SUPPRESSED_WARNINGS: &str = "CS0108, CS0109, CS0618, CS1591";

/// Start a unit: the auto-generated banner, warning suppression and the
/// unit's own `using` directives.
pub fn begin_unit(generator: Generator, usings: &[&str]) -> CodeWriter {
    let mut w = CodeWriter::new();
    w.line("// <auto-generated>");
    w.line(RULE);
    w.line(format!(
        "// This file has been generated by kiln ({generator}), and must not be edited by hand."
    ));
    w.line(RULE);
    w.line("// </auto-generated>");
    w.line(format!("#pragma warning disable {SUPPRESSED_WARNINGS}"));
    w.blank();
    for using in usings {
        w.line(format!("using {using};"));
    }
    w.blank();
    w
}
