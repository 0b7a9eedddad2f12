//! Per-type diagnostic collection.
//!
//! Each generator run over one type owns a [`DiagnosticSink`]. Reporting
//! scopes the diagnostic to that run, logs it through `tracing` for CI and
//! tooling, and keeps it so the driver can summarize the pass.

use crate::{Diagnostic, ErrorCode, Generator, Severity};

/// Collects the diagnostics of one generator run over one type.
#[derive(Debug)]
pub struct DiagnosticSink {
    generator: Generator,
    subject: String,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new(generator: Generator, subject: impl Into<String>) -> Self {
        DiagnosticSink {
            generator,
            subject: subject.into(),
            diagnostics: Vec::new(),
        }
    }

    /// Scope, log and keep `diagnostic`. Returns the stored value so the
    /// caller can embed it.
    pub fn report(&mut self, diagnostic: Diagnostic) -> &Diagnostic {
        let diagnostic = diagnostic.in_scope(self.generator, self.subject.clone());
        match diagnostic.severity {
            Severity::Error => tracing::error!(
                code = %diagnostic.code,
                generator = %self.generator,
                subject = %self.subject,
                "{}",
                diagnostic.message
            ),
            Severity::Warning => tracing::warn!(
                code = %diagnostic.code,
                generator = %self.generator,
                subject = %self.subject,
                "{}",
                diagnostic.message
            ),
        }
        self.diagnostics.push(diagnostic);
        &self.diagnostics[self.diagnostics.len() - 1]
    }

    pub fn error(&mut self, code: ErrorCode, message: impl Into<String>) -> &Diagnostic {
        self.report(Diagnostic::error(code).with_message(message))
    }

    pub fn warning(&mut self, code: ErrorCode, message: impl Into<String>) -> &Diagnostic {
        self.report(Diagnostic::warning(code).with_message(message))
    }

    pub fn generator(&self) -> Generator {
        self.generator
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Error and warning counts over a set of diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub errors: usize,
    pub warnings: usize,
}

impl Tally {
    pub fn of<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> Self {
        diagnostics
            .into_iter()
            .fold(Tally::default(), |mut tally, diag| {
                match diag.severity {
                    Severity::Error => tally.errors += 1,
                    Severity::Warning => tally.warnings += 1,
                }
                tally
            })
    }
}
