//! The javapy compiler CLI.
//!
//! Provides the `javapyc` command with one subcommand:
//!
//! - `javapyc translate <input.java>` -- lex, parse, and translate a Java
//!   source file to Python, writing it to `-o <file>` or stdout.
//!
//! Not part of the core (spec §1's "out of scope" list): this binary is the
//! file-I/O and diagnostics shell around `javapy-lexer`/`javapy-parser`/
//! `javapy-translator`, which stay pure functions of their inputs.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ariadne::{Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};
use javapy_common::LexError;
use javapy_parser::ParseError;

#[derive(Parser)]
#[command(name = "javapyc", version, about = "The javapy Java-to-Python translator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a .java file to Python
    Translate {
        /// Path to the Java source file
        input: PathBuf,

        /// Output path for the translated Python source (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// String prepended per indentation depth level
        #[arg(long, default_value = "    ")]
        indent: String,

        /// Omit parameter and return type annotations
        #[arg(long)]
        no_type_hints: bool,

        /// Raise the log level to debug
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::Translate {
            input,
            output,
            indent,
            no_type_hints,
            verbose,
        } => {
            init_logging(verbose);
            match translate_file(&input, output.as_deref(), &indent, !no_type_hints) {
                Ok(()) => ExitCode::SUCCESS,
                Err(message) => {
                    eprintln!("error: {message}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

/// Reads, lexes, parses, and translates `input`, writing the result to
/// `output` (or stdout). No partial `.py` file is ever written: a lex or
/// parse error is reported and the function returns before any output is
/// produced (spec §7 propagation policy).
fn translate_file(
    input: &Path,
    output: Option<&Path>,
    indent: &str,
    emit_type_hints: bool,
) -> Result<(), String> {
    let source = std::fs::read_to_string(input)
        .map_err(|e| format!("failed to read '{}': {e}", input.display()))?;
    log::debug!("read {} bytes from {}", source.len(), input.display());

    let (tokens, lex_errors) = javapy_lexer::tokenize(&source);
    if !lex_errors.is_empty() {
        report_lex_errors(&source, &lex_errors);
        return Err(format!("lexing '{}' failed", input.display()));
    }
    log::debug!("lexed {} tokens", tokens.len());

    let unit = javapy_parser::parse(tokens).map_err(|e| {
        report_parse_error(&source, &e);
        format!("parsing '{}' failed", input.display())
    })?;
    log::debug!("parsed {} top-level class(es)", unit.children.len());

    let config = javapy_translator::Config {
        indent: indent.to_string(),
        target_python: "3.10".to_string(),
        emit_type_hints,
    };
    let py = render_output(&unit, &config);

    match output {
        Some(path) => {
            std::fs::write(path, &py).map_err(|e| format!("failed to write '{}': {e}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{py}"),
    }
    Ok(())
}

/// Translates and, per spec §9's open question, injects `from typing import
/// Any` whenever the emitted text uses the `Any` fallback type -- the core
/// itself never touches imports (spec §6.2).
fn render_output(unit: &javapy_ast::Node, config: &javapy_translator::Config) -> String {
    let body = javapy_translator::translate(unit, config);
    if config.emit_type_hints && body.contains("Any") {
        format!("from typing import Any\n\n{body}")
    } else {
        body
    }
}

fn report_lex_errors(source: &str, errors: &[LexError]) {
    for error in errors {
        let start = error.span.start as usize;
        let end = (error.span.end as usize).max(start + 1);
        let _ = Report::<std::ops::Range<usize>>::build(ReportKind::Error, start..end)
            .with_message("lex error")
            .with_label(Label::new(start..end).with_message(error.to_string()))
            .finish()
            .eprint(Source::from(source));
    }
}

fn report_parse_error(source: &str, error: &ParseError) {
    let start = error.span.start as usize;
    let end = (error.span.end as usize).max(start + 1);
    let mut report = Report::<std::ops::Range<usize>>::build(ReportKind::Error, start..end)
        .with_message("parse error")
        .with_label(Label::new(start..end).with_message(&error.message));
    if let Some((related_message, related_span)) = &error.related {
        let rs = related_span.start as usize;
        let re = (related_span.end as usize).max(rs + 1);
        report = report.with_label(Label::new(rs..re).with_message(related_message));
    }
    let _ = report.finish().eprint(Source::from(source));
}
