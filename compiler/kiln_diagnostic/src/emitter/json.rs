//! JSON Emitter
//!
//! Writes diagnostics as a JSON array, one object per diagnostic, for
//! editors and CI tooling.

use std::io::Write;

use crate::Diagnostic;

use super::DiagnosticEmitter;

/// JSON emitter for machine-readable output.
///
/// Call [`begin`](Self::begin) before the first diagnostic and
/// [`end`](Self::end) after the last one.
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    pub fn begin(&mut self) {
        let _ = write!(self.writer, "[");
    }

    pub fn end(&mut self) {
        if self.first {
            let _ = writeln!(self.writer, "]");
        } else {
            let _ = writeln!(self.writer, "\n]");
        }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let Ok(object) = serde_json::to_string(diagnostic) else {
            tracing::error!(code = %diagnostic.code, "diagnostic could not be serialized");
            return;
        };
        let separator = if self.first { "" } else { "," };
        self.first = false;
        let _ = write!(self.writer, "{separator}\n  {object}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // Counts are derivable from the array itself.
    }
}
