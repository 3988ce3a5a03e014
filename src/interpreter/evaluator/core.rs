use std::io::{BufRead, Write};

use tracing::{debug, instrument};

use crate::{
    ast::{Node, NodeId, Tag},
    error::{RuntimeError, TreeError},
    interpreter::{
        environment::{Environment, Symbol},
        evaluator::input::DataStream,
        parser::Parsed,
        tree::SyntaxTree,
    },
};

/// Result type used by the evaluator.
///
/// All execution functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type ExecResult<T> = Result<T, RuntimeError>;

/// Counters collected while a program runs.
///
/// The counters make evaluation order observable: for instance, a bracketed
/// `&&` condition always counts three conditions, because both sides are
/// evaluated before they are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecStats {
    /// Statements executed, counting each loop-body statement once per
    /// iteration.
    pub statements:  u64,
    /// Condition nodes evaluated.
    pub conditions:  u64,
    /// Comparisons evaluated.
    pub comparisons: u64,
    /// Completed `while` loop iterations.
    pub iterations:  u64,
}

/// Stores the runtime state of one program execution.
///
/// The executor walks an immutable [`SyntaxTree`] by passing node identities
/// through its recursive calls. It owns the variable [`Environment`], the
/// data stream consumed by `read`, and the output sink written by `write`.
///
/// ## Usage
///
/// ```
/// use core_interp::interpreter::{evaluator::Executor, parser::parse};
///
/// let parsed = parse("program int A; begin read A; A = A * 2; end", 100).unwrap();
/// let mut out = Vec::new();
/// let mut executor = Executor::new(&parsed, "21".as_bytes(), &mut out);
///
/// executor.run().unwrap();
/// assert_eq!(executor.environment().get_by_name("A"), Some(42));
/// ```
pub struct Executor<'t, R, W> {
    pub(super) tree:  &'t SyntaxTree,
    pub(super) env:   Environment<'t>,
    pub(super) input: DataStream<R>,
    pub(super) out:   W,
    pub(super) stats: ExecStats,
}

impl<'t, R: BufRead, W: Write> Executor<'t, R, W> {
    /// Creates an executor for `parsed`, reading integers from `data` and
    /// writing `name = value` lines to `out`. Every variable starts unset.
    #[must_use]
    pub fn new(parsed: &'t Parsed, data: R, out: W) -> Self {
        Self { tree:  &parsed.tree,
               env:   Environment::new(&parsed.symbols),
               input: DataStream::new(data),
               out,
               stats: ExecStats::default(), }
    }

    /// Executes the program from its first statement to its last.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] met. Output written before the
    /// failure stays in the sink.
    pub fn run(&mut self) -> ExecResult<ExecStats> {
        let root = self.tree.root().ok_or(TreeError::Empty)?;
        let stmts = match self.node(root)? {
            Node::Program { stmts, .. } => stmts,
            other => return Err(TreeError::unexpected(Tag::Program, &other).into()),
        };
        self.exec_stmt_seq(stmts)?;
        self.out
            .flush()
            .map_err(|source| RuntimeError::Io { source,
                                                 line: self.tree.line(root) })?;
        debug!(statements = self.stats.statements,
               conditions = self.stats.conditions,
               comparisons = self.stats.comparisons,
               iterations = self.stats.iterations,
               "execution finished");
        Ok(self.stats)
    }

    /// Returns the variable values.
    #[must_use]
    pub const fn environment(&self) -> &Environment<'t> {
        &self.env
    }

    /// Returns the counters collected so far.
    #[must_use]
    pub const fn stats(&self) -> ExecStats {
        self.stats
    }

    pub(super) fn node(&self, id: NodeId) -> ExecResult<Node> {
        Ok(self.tree.get(id).copied()?)
    }

    /// Reads the symbol out of an identifier leaf.
    pub(super) fn symbol(&self, id: NodeId) -> ExecResult<Symbol> {
        match self.node(id)? {
            Node::Ident(symbol) => Ok(symbol),
            other => Err(TreeError::unexpected(Tag::Ident, &other).into()),
        }
    }

    /// Collects the names of an identifier list, in order.
    pub(super) fn names(&self, mut id: NodeId) -> ExecResult<Vec<&'t str>> {
        let symbols = self.env.symbols();
        let mut names = Vec::new();
        loop {
            match self.node(id)? {
                Node::IdList { id: ident, rest } => {
                    names.push(symbols.name(self.symbol(ident)?));
                    match rest {
                        Some(next) => id = next,
                        None => return Ok(names),
                    }
                },
                other => return Err(TreeError::unexpected(Tag::IdList, &other).into()),
            }
        }
    }
}

/// Executes a parsed program.
///
/// Integers for `read` come from `data`; each `write` appends one
/// `name = value` line to `out`.
///
/// # Errors
/// Returns the first [`RuntimeError`] met.
///
/// # Example
/// ```
/// use core_interp::interpreter::{evaluator::execute, parser::parse};
///
/// let source = "program int A, B; begin read A, B; write B, A; end";
/// let parsed = parse(source, 100).unwrap();
/// let mut out = Vec::new();
///
/// execute(&parsed, "5 7".as_bytes(), &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "B = 7\nA = 5\n");
/// ```
#[instrument(level = "debug", skip_all)]
pub fn execute<R: BufRead, W: Write>(parsed: &Parsed, data: R, out: W) -> ExecResult<ExecStats> {
    Executor::new(parsed, data, out).run()
}
