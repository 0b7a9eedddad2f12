//! The `generate` command: run every generator over a program model and
//! write, or check, the units.

use std::io::Write;
use std::path::PathBuf;

use kiln_diagnostic::emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use kiln_diagnostic::Tally;
use kiln_emit::Artifact;

use crate::{check_artifacts, generate, load_model, write_artifacts, Drift, DriverError};

pub const DEFAULT_OUTPUT_DIR: &str = "generated";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable diagnostics on stderr.
    #[default]
    Text,
    /// A JSON array of diagnostics on stdout.
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    pub model: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    /// Compare with the files on disk instead of writing them.
    pub check: bool,
}

impl GenerateOptions {
    pub fn new(model: impl Into<PathBuf>) -> Self {
        GenerateOptions {
            model: model.into(),
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: OutputFormat::default(),
            check: false,
        }
    }

    /// Parse the arguments following `generate`.
    pub fn parse(args: &[String]) -> Result<Self, DriverError> {
        let mut model = None;
        let mut output = None;
        let mut format = OutputFormat::default();
        let mut check = false;

        let mut args = args.iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-o" | "--output" => {
                    let Some(dir) = args.next() else {
                        return Err(DriverError::Usage(format!("missing directory after {arg}")));
                    };
                    output = Some(PathBuf::from(dir));
                }
                "--check" => check = true,
                "--format=text" => format = OutputFormat::Text,
                "--format=json" => format = OutputFormat::Json,
                other if other.starts_with("--format=") => {
                    return Err(DriverError::Usage(format!(
                        "unknown format '{}' (expected text or json)",
                        &other["--format=".len()..]
                    )));
                }
                other if other.starts_with('-') => {
                    return Err(DriverError::Usage(format!("unknown option '{other}'")));
                }
                other => {
                    if model.is_some() {
                        return Err(DriverError::Usage(
                            "only one program model can be given".to_string(),
                        ));
                    }
                    model = Some(PathBuf::from(other));
                }
            }
        }

        let Some(model) = model else {
            return Err(DriverError::Usage("missing program model path".to_string()));
        };
        let mut options = GenerateOptions::new(model);
        if let Some(output) = output {
            options.output = output;
        }
        options.format = format;
        options.check = check;
        Ok(options)
    }
}

/// What a `generate` run produced.
#[derive(Debug)]
pub struct GenerateRun {
    pub artifacts: Vec<Artifact>,
    pub tally: Tally,
    /// Files rewritten; zero under `--check`.
    pub written: usize,
    /// Out-of-date units; only filled under `--check`.
    pub drift: Vec<Drift>,
}

impl GenerateRun {
    /// Embedded diagnostics fail the build compiling the units, not this
    /// run. Only drift fails a `--check` run.
    pub fn failed(&self) -> bool {
        !self.drift.is_empty()
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(model = %options.model.display()))]
pub fn run_generate(options: &GenerateOptions) -> Result<GenerateRun, DriverError> {
    let compilation = load_model(&options.model)?;
    let output = generate(&compilation)?;
    let tally = output.tally();

    let (written, drift) = if options.check {
        (0, check_artifacts(&options.output, &output.artifacts)?)
    } else {
        (write_artifacts(&options.output, &output.artifacts)?, Vec::new())
    };

    Ok(GenerateRun {
        artifacts: output.artifacts,
        tally,
        written,
        drift,
    })
}

/// Report the diagnostics of `artifacts` in `format`.
pub fn emit_diagnostics<W: Write>(
    writer: W,
    format: OutputFormat,
    colors: ColorMode,
    is_tty: bool,
    artifacts: &[Artifact],
) {
    match format {
        OutputFormat::Text => {
            let mut emitter = TerminalEmitter::with_color_mode(writer, colors, is_tty);
            for artifact in artifacts {
                emitter.emit_all(&artifact.diagnostics);
            }
            let tally = Tally::of(artifacts.iter().flat_map(|a| &a.diagnostics));
            emitter.emit_summary(tally.errors, tally.warnings);
            emitter.flush();
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(writer);
            emitter.begin();
            for artifact in artifacts {
                emitter.emit_all(&artifact.diagnostics);
            }
            emitter.end();
            emitter.flush();
        }
    }
}
