/// Core execution state and the program entry point.
///
/// Contains the executor, its statistics, and the structural helpers used to
/// read typed nodes back out of the tree.
pub mod core;

/// Statement execution.
///
/// Runs statement sequences, assignments, conditionals, loops, and the `read`
/// and `write` statements.
pub mod statement;

/// Condition evaluation.
///
/// Evaluates comparisons, negation, and the non-short-circuiting `&&` and
/// `||` connectives.
pub mod condition;

/// Expression evaluation.
///
/// Computes sums, differences, products and operands with overflow checks.
pub mod expression;

/// The data stream read by `read` statements.
///
/// Splits the data source into whitespace-separated tokens and parses them as
/// integers on demand.
pub mod input;

pub use self::core::{ExecResult, ExecStats, Executor, execute};
