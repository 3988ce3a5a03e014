//! # core-interp
//!
//! core-interp is a lexer, parser, pretty-printer and tree-walking interpreter
//! for Core, a small imperative teaching language with integer variables,
//! `if` / `while`, boolean conditions, and `read` / `write` statements against
//! a data stream.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{BufRead, Write};

use tracing::instrument;

use crate::{
    config::Config,
    error::Error,
    interpreter::{
        evaluator::{ExecStats, execute},
        parser::{Parsed, parse},
        printer::render,
    },
};

/// Defines the structure of parsed programs.
///
/// This module declares the `Node` enum, the per-alternative enums nested in
/// it, and the identities, tags and slots used to address and classify nodes.
/// Nodes are built by the parser and read by the printer and the evaluator.
///
/// # Responsibilities
/// - Defines one node variant per grammar rule and one nested variant per
///   alternative.
/// - Derives tag, alternative and child slots from the variant.
pub mod ast;
/// Run settings.
///
/// Holds the options that the driver collects from the command line, such as
/// the node budget of the syntax tree.
pub mod config;
/// Provides unified error types for every stage.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// checking or executing a program, and the crate-level error that the driver
/// reports.
///
/// # Responsibilities
/// - Defines error enums for each stage (parser, evaluator, tree).
/// - Attaches line numbers and human-readable messages.
/// - Maps each error class to a process exit status.
pub mod error;
/// Orchestrates the entire pipeline.
///
/// This module ties together the lexer, the parser, the syntax tree, the
/// printer and the evaluator.
///
/// # Responsibilities
/// - Coordinates all components: lexer, parser, tree, printer, evaluator.
/// - Provides entry points for each stage.
pub mod interpreter;
/// Log setup shared by the command-line tools.
///
/// Installs a `tracing-subscriber` formatter on standard error whose filter
/// comes from `RUST_LOG` or from the `-v` count.
pub mod logging;
/// General utilities.
///
/// Currently the checked integer arithmetic used by the evaluator.
pub mod util;

/// Prints and executes an already parsed program.
///
/// Unless `config.print` is off, the canonical program text and one blank
/// line are written to `out` first. Execution output follows.
///
/// # Errors
/// Returns an error if the tree is malformed, writing fails, or execution
/// stops on a runtime error.
pub fn run<R: BufRead, W: Write>(parsed: &Parsed,
                                 data: R,
                                 mut out: W,
                                 config: &Config)
                                 -> Result<ExecStats, Error> {
    if config.print {
        let text = render(&parsed.tree, &parsed.symbols)?;
        writeln!(out, "{text}").map_err(Error::Output)?;
    }
    Ok(execute(parsed, data, out)?)
}

/// Parses, prints and executes a Core program.
///
/// This is the whole `core-interp` pipeline over in-memory inputs. Nothing is
/// written to `out` if the program fails to parse.
///
/// # Errors
/// Returns an error if parsing, printing or execution fails.
///
/// # Examples
/// ```
/// use core_interp::{config::Config, interpret};
///
/// let source = "program int A; begin A = 10 - 3 - 2; write A; end";
/// let mut out = Vec::new();
/// interpret(source, "".as_bytes(), &mut out, &Config::default()).unwrap();
///
/// let out = String::from_utf8(out).unwrap();
/// assert!(out.ends_with("end\n\nA = 9\n"));
///
/// // 'B' is never declared: nothing is printed.
/// let mut out = Vec::new();
/// let source = "program int A; begin B = 1; end";
/// assert!(interpret(source, "".as_bytes(), &mut out, &Config::default()).is_err());
/// assert!(out.is_empty());
/// ```
#[instrument(level = "debug", skip_all, fields(max_nodes = config.max_nodes))]
pub fn interpret<R: BufRead, W: Write>(source: &str,
                                       data: R,
                                       out: W,
                                       config: &Config)
                                       -> Result<ExecStats, Error> {
    let parsed = parse(source, config.max_nodes)?;
    run(&parsed, data, out, config)
}
