//! Diagnostic values and their embedded form.
//!
//! A diagnostic reported while generating a type becomes a preprocessor
//! directive inside that type's generated unit (`#error` or `#warning`), so
//! the problem surfaces in the user's own build at the offending type.

use std::fmt;

use kiln_model::Location;
use serde::Serialize;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Preprocessor directive that carries a diagnostic of this severity.
    pub fn directive(self) -> &'static str {
        match self {
            Severity::Error => "#error",
            Severity::Warning => "#warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// The generator that produced a diagnostic or an artifact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Generator {
    #[serde(rename = "EqualityGenerator")]
    Equality,
    #[serde(rename = "ImmutableGenerator")]
    Immutable,
    #[serde(rename = "LifecycleGenerator")]
    Lifecycle,
}

impl Generator {
    pub fn name(self) -> &'static str {
        match self {
            Generator::Equality => "EqualityGenerator",
            Generator::Immutable => "ImmutableGenerator",
            Generator::Lifecycle => "LifecycleGenerator",
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which generator was working on which type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Scope {
    pub generator: Generator,
    /// Display name of the type, generic arguments included.
    pub subject: String,
}

/// A generation-time problem.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            scope: None,
            location: None,
            notes: Vec::new(),
        }
    }

    pub fn error(code: ErrorCode) -> Self {
        Self::new(code, Severity::Error)
    }

    pub fn warning(code: ErrorCode) -> Self {
        Self::new(code, Severity::Warning)
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    #[must_use]
    pub fn in_scope(mut self, generator: Generator, subject: impl Into<String>) -> Self {
        self.scope = Some(Scope {
            generator,
            subject: subject.into(),
        });
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// `Generator/Subject: message`, or the bare message outside a scope.
    pub fn scoped_message(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}/{}: {}", scope.generator, scope.subject, self.message),
            None => self.message.clone(),
        }
    }

    /// The directive line embedded in generated code.
    ///
    /// Line breaks are flattened because a directive ends at the first one.
    pub fn embed(&self) -> String {
        let text = self.scoped_message().replace(['\r', '\n'], " ");
        format!("{} {text}", self.severity.directive())
    }
}

#[cfg(test)]
mod tests;
