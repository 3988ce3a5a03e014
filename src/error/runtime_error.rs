use std::io;

use thiserror::Error;

use crate::error::TreeError;

/// Represents all errors that can occur while executing a program.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A variable was read before any value was assigned or read into it.
    #[error("Error on line {line}: Uninitialized variable {name}")]
    UninitializedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A name that the symbol table does not know.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `read` statement ran past the end of the data stream.
    #[error("Error on line {line}: Input is empty.")]
    InputExhausted {
        /// The source line of the `read` statement.
        line: usize,
    },
    /// A `read` statement met a data token that is not an integer.
    #[error("Error on line {line}: Input is not an integer: {token}")]
    InputNotInteger {
        /// The offending data token.
        token: String,
        /// The source line of the `read` statement.
        line:  usize,
    },
    /// Arithmetic overflowed the 64-bit integer range.
    #[error("Error on line {line}: Integer overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Reading the data stream or writing output failed.
    #[error("Error on line {line}: I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        source: io::Error,
        /// The source line of the statement performing I/O.
        line:   usize,
    },
    /// The tree handed to the evaluator broke a structural invariant.
    #[error(transparent)]
    Tree(#[from] TreeError),
}
