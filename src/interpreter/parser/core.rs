use tracing::{debug, instrument};

use crate::{
    ast::Node,
    error::{Expected, ParseError},
    interpreter::{
        environment::SymbolTable,
        lexer::{Lexer, TokenKind},
        tree::{MAX_NESTING, SyntaxTree},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A statically checked program: its syntax tree and the names it declares.
#[derive(Debug, Clone)]
pub struct Parsed {
    /// The completed tree, with its root set.
    pub tree:    SyntaxTree,
    /// Every declared name, in declaration order.
    pub symbols: SymbolTable,
}

/// Recursive-descent parser over a single source text.
///
/// Each grammar rule is one method. Methods look at exactly one token of
/// lookahead, claim a node of the budget on entry, allocate their children
/// and then their own node, and return the new node's identity. Claiming
/// before descending means the node budget also bounds recursion depth.
/// Sequences, identifier lists, operator chains and `!` prefixes are parsed
/// in loops; parentheses, brackets and blocks nest at most [`MAX_NESTING`]
/// levels deep.
///
/// Declarations and uses of names are checked as they are met, so a tree
/// that comes out of [`Parser::parse_program`] is statically valid.
pub struct Parser<'src> {
    pub(super) lexer:    Lexer<'src>,
    pub(super) tree:     SyntaxTree,
    pub(super) symbols:  SymbolTable,
    /// Nodes claimed by rules still in progress.
    pub(super) reserved: usize,
    pub(super) depth:    usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser over `source` whose tree holds at most `capacity`
    /// nodes.
    ///
    /// # Errors
    /// Returns a lexical [`ParseError`] if the first token is invalid.
    pub fn new(source: &'src str, capacity: usize) -> ParseResult<Self> {
        Ok(Self { lexer:    Lexer::new(source)?,
                  tree:     SyntaxTree::with_capacity(capacity),
                  symbols:  SymbolTable::new(),
                  reserved: 0,
                  depth:    0, })
    }

    /// Parses a whole program and hands back the finished tree.
    ///
    /// Grammar: `program := "program" decl-seq "begin" stmt-seq "end" EOF`
    ///
    /// # Errors
    /// Returns the first lexical, syntactic or static error met, or a
    /// [`ParseError::Tree`] if the tree runs out of capacity.
    pub fn parse_program(mut self) -> ParseResult<Parsed> {
        let line = self.open()?;
        self.expect(TokenKind::Program, Expected::Program)?;
        let decls = self.parse_decl_seq()?;
        self.expect(TokenKind::Begin, Expected::Begin)?;
        let stmts = self.parse_stmt_seq()?;
        self.expect(TokenKind::End, Expected::End)?;

        let token = self.lexer.current();
        if token.kind != TokenKind::Eof {
            return Err(ParseError::TrailingTokens { found: token.text.clone(),
                                                    line:  token.line, });
        }

        let root = self.alloc(Node::Program { decls, stmts }, line)?;
        self.tree.set_root(root)?;

        Ok(Parsed { tree:    self.tree,
                    symbols: self.symbols, })
    }
}

/// Parses and statically checks a Core program.
///
/// This is the entry point used by the driver. The resulting tree holds at
/// most `capacity` nodes.
///
/// # Errors
/// Returns the first [`ParseError`] met. No partial tree is returned.
///
/// # Example
/// ```
/// use core_interp::interpreter::parser::parse;
///
/// let parsed = parse("program int X; begin X = 1; end", 100).unwrap();
/// assert_eq!(parsed.symbols.len(), 1);
///
/// let err = parse("program int X; begin Y = 1; end", 100).unwrap_err();
/// assert_eq!(err.to_string(), "Error on line 1: Undeclared variable Y");
/// ```
#[instrument(level = "debug", skip(source), fields(bytes = source.len()))]
pub fn parse(source: &str, capacity: usize) -> ParseResult<Parsed> {
    let parsed = Parser::new(source, capacity)?.parse_program()?;
    debug!(nodes = parsed.tree.len(),
           variables = parsed.symbols.len(),
           "parsed program");
    Ok(parsed)
}
