/// Parser state and the program entry point.
///
/// Holds the lexer, the tree under construction and the symbol table, and
/// drives the `program` production down to end of input.
pub mod core;

/// Declaration parsing.
///
/// Parses declaration sequences and identifier lists, declaring each name
/// exactly once.
pub mod declaration;

/// Statement parsing.
///
/// Implements statement sequences and the five statement forms: assignment,
/// `if`, `while`, `read` and `write`.
pub mod statement;

/// Condition parsing.
///
/// Handles comparisons, negation and bracketed `&&` / `||` conditions.
pub mod condition;

/// Expression parsing.
///
/// Parses right-recursive sums, differences and products down to operands.
pub mod expression;

/// Utility functions for the parser.
///
/// Token matching, diagnostics, node allocation and identifier binding shared
/// by every parse procedure.
pub mod utils;

pub use self::core::{ParseResult, Parsed, Parser, parse};
