//! Indentation-aware source writer.
//!
//! Generators build C# text line by line. The writer owns indentation
//! (four spaces per level) and line endings (`\n` only), so two runs over
//! the same input produce byte-identical text.

use kiln_diagnostic::Diagnostic;

const INDENT: &str = "    ";

/// In-memory C# source builder.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buffer: String,
    level: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one indented line. An empty line is written without indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.buffer.push_str(INDENT);
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// `header`, then `{`, the indented body, and `}`.
    pub fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) {
        self.block_closed_by(header, "}", body);
    }

    /// Like [`block`](Self::block), with a custom closing line (`};`).
    pub fn block_closed_by(
        &mut self,
        header: impl AsRef<str>,
        close: &str,
        body: impl FnOnce(&mut Self),
    ) {
        self.line(header);
        self.line("{");
        self.indent();
        body(self);
        self.dedent();
        self.line(close);
    }

    /// `#region "name"` ... `#endregion`.
    pub fn region(&mut self, name: &str, body: impl FnOnce(&mut Self)) {
        self.line(format!("#region {name}"));
        body(self);
        self.line("#endregion");
    }

    /// Wrap `body` in a namespace declaration; the global namespace has none.
    pub fn namespace(&mut self, namespace: &str, body: impl FnOnce(&mut Self)) {
        if namespace.is_empty() {
            body(self);
        } else {
            self.block(format!("namespace {namespace}"), body);
        }
    }

    /// Embed a diagnostic as a compiler-visible directive.
    pub fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.line(diagnostic.embed());
    }

    /// The finished text: trailing blank lines removed, one final newline.
    pub fn finish(mut self) -> String {
        while self.buffer.ends_with("\n\n") {
            self.buffer.pop();
        }
        if !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.buffer
    }
}

#[cfg(test)]
mod tests;
