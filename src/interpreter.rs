/// The environment module holds the two name tables.
///
/// The symbol table records declared names for the parser's declare and
/// resolve checks; the environment holds one optional value per declared name
/// for the evaluator.
///
/// # Responsibilities
/// - Rejects duplicate declarations and resolves uses to dense symbols.
/// - Stores and retrieves variable values by symbol or by name.
pub mod environment;
/// The evaluator module executes a parsed program.
///
/// The evaluator walks the syntax tree statement by statement, computes
/// integer expressions and conditions, updates variable values, and performs
/// all reads from the data stream and writes to the output.
///
/// # Responsibilities
/// - Executes assignments, conditionals, loops, reads and writes.
/// - Reports runtime errors such as uninitialized variables or overflow.
pub mod evaluator;
/// The lexer module tokenizes Core source text.
///
/// The lexer classifies the raw source into keywords, symbols, integer
/// literals and identifiers, handing the parser one token at a time with a
/// single token of lookahead.
///
/// # Responsibilities
/// - Produces tokens with their kind, text, payload and source line.
/// - Enforces the whitespace-after-word rule and rejects invalid input.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// One procedure per grammar rule consumes the lexer, allocates typed nodes
/// and checks declarations in the same pass.
///
/// # Responsibilities
/// - Validates the grammar, naming the expected construct on failure.
/// - Rejects duplicate declarations and uses of undeclared names.
pub mod parser;
/// The printer module renders a syntax tree as canonical Core source.
pub mod printer;
/// The tree module stores parsed programs.
///
/// A bounded, append-only arena of nodes addressed by [`NodeId`], plus the
/// cursor used to navigate it.
///
/// [`NodeId`]: crate::ast::NodeId
pub mod tree;
