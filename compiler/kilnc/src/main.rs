//! kiln CLI
//!
//! Generates equality, immutable-builder and lifecycle C# code from a
//! resolved program model.

use std::io::IsTerminal;

use kilnc::commands::{emit_diagnostics, explain, run_generate, GenerateOptions, OutputFormat};
use kilnc::DriverError;
use kiln_diagnostic::emitter::ColorMode;

fn main() {
    kilnc::init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "generate" => generate(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("kiln {}", env!("CARGO_PKG_VERSION"));
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: kiln --explain <ERROR_CODE>");
                eprintln!("Example: kiln --explain K2006");
                std::process::exit(1);
            }
            match explain(&args[2]) {
                Ok(doc) => println!("{doc}"),
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                }
            }
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn generate(args: &[String]) {
    let options = match GenerateOptions::parse(args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("Usage: kiln generate <model.json> [-o <dir>] [--format=text|json] [--check]");
            std::process::exit(2);
        }
    };

    let run = match run_generate(&options) {
        Ok(run) => run,
        Err(err) => fail(&err),
    };

    match options.format {
        OutputFormat::Text => {
            let is_tty = std::io::stderr().is_terminal();
            emit_diagnostics(
                std::io::stderr(),
                OutputFormat::Text,
                ColorMode::Auto,
                is_tty,
                &run.artifacts,
            );
        }
        OutputFormat::Json => {
            emit_diagnostics(
                std::io::stdout(),
                OutputFormat::Json,
                ColorMode::Never,
                false,
                &run.artifacts,
            );
        }
    }

    if options.check {
        for drift in &run.drift {
            eprintln!("{drift}");
        }
        if run.failed() {
            eprintln!(
                "error: {} of {} generated units are out of date in {}",
                run.drift.len(),
                run.artifacts.len(),
                options.output.display()
            );
            std::process::exit(1);
        }
        eprintln!(
            "{} generated units are up to date in {}",
            run.artifacts.len(),
            options.output.display()
        );
    } else {
        eprintln!(
            "generated {} units in {} ({} written)",
            run.artifacts.len(),
            options.output.display(),
            run.written
        );
    }
}

fn fail(err: &DriverError) -> ! {
    eprintln!("error: {err}");
    if let Some(code) = err.code() {
        eprintln!("  = note: run `kiln --explain {code}` for details");
    }
    std::process::exit(1);
}

fn print_usage() {
    println!("kiln code generator");
    println!();
    println!("Usage: kiln <command> [options]");
    println!();
    println!("Commands:");
    println!("  generate <model.json>  Generate units for every annotated type");
    println!("  --explain <code>       Explain an error code (e.g., K2006)");
    println!("  help                   Show this help message");
    println!("  version                Show version information");
    println!();
    println!("Generate options:");
    println!("  -o, --output <dir>     Output directory (default: generated)");
    println!("  --format=<fmt>         Diagnostics format: text (default), json");
    println!("  --check                Fail if files on disk differ from the generated text");
    println!();
    println!("Examples:");
    println!("  kiln generate obj/model.json -o obj/generated");
    println!("  kiln generate obj/model.json --check     # CI: generated code is committed");
    println!("  kiln generate obj/model.json --format=json");
    println!("  kiln --explain K2006                     # Explain mutable member type");
}
