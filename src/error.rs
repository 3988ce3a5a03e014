use std::{io, path::PathBuf};

use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur while lexing, parsing and statically
/// checking a Core program: invalid characters and tokens, unexpected tokens,
/// duplicate declarations and uses of undeclared identifiers.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing a parsed
/// program: uninitialized variables, a malformed or exhausted data stream,
/// arithmetic overflow and output failures.
pub mod runtime_error;
/// Tree errors.
///
/// Resource exhaustion and traversal-invariant violations raised by the
/// syntax tree arena and its cursor.
pub mod tree_error;

pub use parse_error::{Expected, LexErrorKind, ParseError};
pub use runtime_error::RuntimeError;
pub use tree_error::TreeError;

/// Exit status for lexical, syntactic and static-semantic errors.
pub const EXIT_SOURCE: u8 = 65;
/// Exit status when the source or data file cannot be opened.
pub const EXIT_NO_INPUT: u8 = 66;
/// Exit status for resource exhaustion and internal invariant violations.
pub const EXIT_INTERNAL: u8 = 70;
/// Exit status for runtime errors.
pub const EXIT_RUNTIME: u8 = 1;

/// Any error that stops the parse → print → execute pipeline.
///
/// The driver prints the `Display` form of this error as the single
/// diagnostic line and exits with [`Error::exit_code`].
#[derive(Debug, Error)]
pub enum Error {
    /// The program failed to lex, parse or pass static checks.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Execution stopped on a runtime error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// A tree walk violated a traversal invariant.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// An input file could not be opened or read.
    #[error("Error opening file '{}': {source}", .path.display())]
    Open {
        /// The file that failed to open.
        path:   PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The pretty-printed program could not be written.
    #[error("Error writing output: {0}")]
    Output(#[source] io::Error),
}

impl Error {
    /// Returns the process exit status for this error class.
    ///
    /// # Example
    /// ```
    /// use core_interp::error::{EXIT_SOURCE, Error, ParseError};
    ///
    /// let err = Error::from(ParseError::DuplicateVariable { name: "A".into(),
    ///                                                       line: 2, });
    /// assert_eq!(err.exit_code(), EXIT_SOURCE);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Parse(ParseError::Tree(_))
            | Self::Runtime(RuntimeError::Tree(_))
            | Self::Tree(_) => EXIT_INTERNAL,
            Self::Parse(_) => EXIT_SOURCE,
            Self::Runtime(_) | Self::Output(_) => EXIT_RUNTIME,
            Self::Open { .. } => EXIT_NO_INPUT,
        }
    }
}
