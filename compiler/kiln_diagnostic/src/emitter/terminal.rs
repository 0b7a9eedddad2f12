//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const BOLD: &str = "\x1b[1m";
    pub const LOCATION: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored(&severity.to_string(), color);
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity [CODE]: Generator/Subject: message
        self.write_severity(diagnostic.severity);
        let _ = write!(self.writer, " ");
        self.write_colored(&format!("[{}]", diagnostic.code), colors::BOLD);
        let _ = writeln!(self.writer, ": {}", diagnostic.scoped_message());

        if let Some(location) = &diagnostic.location {
            let _ = write!(self.writer, "  --> ");
            self.write_colored(&location.to_string(), colors::LOCATION);
            let _ = writeln!(self.writer);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let _ = writeln!(
                self.writer,
                ": {error_count} error{} and {warning_count} warning{} embedded in generated code",
                plural_s(error_count),
                plural_s(warning_count)
            );
        } else {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} embedded in generated code",
                plural_s(warning_count)
            );
        }
    }
}
