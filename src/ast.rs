use std::fmt;

use crate::interpreter::environment::Symbol;

/// Stable identity of a node inside a [`SyntaxTree`].
///
/// Identities are dense indices handed out in allocation order, so a child
/// always has a smaller identity than its parent.
///
/// [`SyntaxTree`]: crate::interpreter::tree::SyntaxTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the arena index of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the three child positions of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The first child.
    First,
    /// The second child.
    Second,
    /// The third child.
    Third,
}

impl Slot {
    /// All slots, in order.
    pub const ALL: [Self; 3] = [Self::First, Self::Second, Self::Third];
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        };
        write!(f, "{n}")
    }
}

/// The grammar category of a node: seventeen nonterminals and two leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `program`
    Program,
    /// `decl-seq`
    DeclSeq,
    /// `stmt-seq`
    StmtSeq,
    /// `decl`
    Decl,
    /// `id-list`
    IdList,
    /// `stmt`
    Stmt,
    /// `assign`
    Assign,
    /// `if`
    If,
    /// `while`
    While,
    /// `input`
    Input,
    /// `output`
    Output,
    /// `cond`
    Cond,
    /// `comparison`
    Comparison,
    /// `expr`
    Expr,
    /// `term`
    Term,
    /// `operand`
    Operand,
    /// `comp-op`
    CompOp,
    /// Integer literal leaf.
    Int,
    /// Identifier leaf.
    Ident,
}

impl Tag {
    /// Returns the grammar name of the tag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::DeclSeq => "decl seq",
            Self::StmtSeq => "stmt seq",
            Self::Decl => "decl",
            Self::IdList => "id list",
            Self::Stmt => "stmt",
            Self::Assign => "assign",
            Self::If => "if",
            Self::While => "while",
            Self::Input => "input",
            Self::Output => "output",
            Self::Cond => "cond",
            Self::Comparison => "comparison",
            Self::Expr => "expr",
            Self::Term => "term",
            Self::Operand => "operand",
            Self::CompOp => "comp op",
            Self::Int => "int",
            Self::Ident => "id",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

/// A statement node: exactly one child, the construct it wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stmt {
    /// `id = expr;`
    Assign(NodeId),
    /// `if cond then ... end;`
    If(NodeId),
    /// `while cond loop ... end;`
    While(NodeId),
    /// `read ids;`
    Input(NodeId),
    /// `write ids;`
    Output(NodeId),
}

/// A condition node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cond {
    /// `(a op b)`
    Compare(NodeId),
    /// `!cond`
    Not(NodeId),
    /// `[cond && cond]`
    And(NodeId, NodeId),
    /// `[cond || cond]`
    Or(NodeId, NodeId),
}

/// An expression node. The right operand of `+` and `-` is itself an `expr`,
/// which makes both operators right-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expr {
    /// A lone term.
    Term(NodeId),
    /// `term + expr`
    Add(NodeId, NodeId),
    /// `term - expr`
    Sub(NodeId, NodeId),
}

/// A term node. `*` is right-recursive like `+` and `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// A lone operand.
    Operand(NodeId),
    /// `operand * term`
    Mul(NodeId, NodeId),
}

/// An operand node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// An integer literal leaf.
    Int(NodeId),
    /// An identifier leaf.
    Ident(NodeId),
    /// `(expr)`
    Paren(NodeId),
}

/// The six comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompOp {
    /// `!=`
    NotEqual,
    /// `==`
    Equal,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
}

impl CompOp {
    /// Applies the comparison to two integers.
    ///
    /// # Example
    /// ```
    /// use core_interp::ast::CompOp;
    ///
    /// assert!(CompOp::LessEqual.apply(2, 2));
    /// assert!(!CompOp::NotEqual.apply(7, 7));
    /// ```
    #[must_use]
    pub const fn apply(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::NotEqual => lhs != rhs,
            Self::Equal => lhs == rhs,
            Self::Less => lhs < rhs,
            Self::Greater => lhs > rhs,
            Self::LessEqual => lhs <= rhs,
            Self::GreaterEqual => lhs >= rhs,
        }
    }

    /// Returns the surface spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::NotEqual => "!=",
            Self::Equal => "==",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
        }
    }
}

/// A node of the Core syntax tree.
///
/// Each variant corresponds to one grammar tag, and each multi-production tag
/// carries a nested enum with one variant per alternative. A node therefore
/// holds exactly the children its production has; optional trailing parts
/// such as a second declaration or an `else` branch are `Option`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// `program decl-seq begin stmt-seq end`
    Program {
        /// The declaration sequence.
        decls: NodeId,
        /// The statement sequence.
        stmts: NodeId,
    },
    /// One declaration, optionally followed by more.
    DeclSeq {
        /// The first declaration.
        decl: NodeId,
        /// The remaining declarations.
        rest: Option<NodeId>,
    },
    /// One statement, optionally followed by more.
    StmtSeq {
        /// The first statement.
        stmt: NodeId,
        /// The remaining statements.
        rest: Option<NodeId>,
    },
    /// `int id-list;`
    Decl {
        /// The declared names.
        ids: NodeId,
    },
    /// One identifier, optionally followed by more.
    IdList {
        /// The first identifier leaf.
        id:   NodeId,
        /// The remaining identifiers.
        rest: Option<NodeId>,
    },
    /// A statement.
    Stmt(Stmt),
    /// `id = expr;`
    Assign {
        /// The identifier leaf being assigned.
        target: NodeId,
        /// The expression.
        value:  NodeId,
    },
    /// `if cond then stmt-seq (else stmt-seq)? end;`
    If {
        /// The condition.
        cond:        NodeId,
        /// Statements run when the condition holds.
        then_branch: NodeId,
        /// Statements run otherwise.
        else_branch: Option<NodeId>,
    },
    /// `while cond loop stmt-seq end;`
    While {
        /// The loop condition.
        cond: NodeId,
        /// The loop body.
        body: NodeId,
    },
    /// `read id-list;`
    Input {
        /// Names to read into.
        ids: NodeId,
    },
    /// `write id-list;`
    Output {
        /// Names to write.
        ids: NodeId,
    },
    /// A condition.
    Cond(Cond),
    /// `(operand comp-op operand)`
    Comparison {
        /// Left operand.
        lhs: NodeId,
        /// The comp-op node.
        op:  NodeId,
        /// Right operand.
        rhs: NodeId,
    },
    /// An expression.
    Expr(Expr),
    /// A term.
    Term(Term),
    /// An operand.
    Operand(Operand),
    /// A comparison operator.
    CompOp(CompOp),
    /// An integer literal.
    Int(i64),
    /// A reference to a declared variable.
    Ident(Symbol),
}

impl Node {
    /// Returns the grammar tag of the node.
    #[must_use]
    pub const fn tag(&self) -> Tag {
        match self {
            Self::Program { .. } => Tag::Program,
            Self::DeclSeq { .. } => Tag::DeclSeq,
            Self::StmtSeq { .. } => Tag::StmtSeq,
            Self::Decl { .. } => Tag::Decl,
            Self::IdList { .. } => Tag::IdList,
            Self::Stmt(_) => Tag::Stmt,
            Self::Assign { .. } => Tag::Assign,
            Self::If { .. } => Tag::If,
            Self::While { .. } => Tag::While,
            Self::Input { .. } => Tag::Input,
            Self::Output { .. } => Tag::Output,
            Self::Cond(_) => Tag::Cond,
            Self::Comparison { .. } => Tag::Comparison,
            Self::Expr(_) => Tag::Expr,
            Self::Term(_) => Tag::Term,
            Self::Operand(_) => Tag::Operand,
            Self::CompOp(_) => Tag::CompOp,
            Self::Int(_) => Tag::Int,
            Self::Ident(_) => Tag::Ident,
        }
    }

    /// Returns the 1-based index of the production that built the node.
    ///
    /// # Example
    /// ```
    /// use core_interp::ast::{CompOp, Node};
    ///
    /// assert_eq!(Node::CompOp(CompOp::Less).alt(), 3);
    /// assert_eq!(Node::Int(4).alt(), 1);
    /// ```
    #[must_use]
    pub const fn alt(&self) -> u8 {
        match self {
            Self::DeclSeq { rest: Some(_), .. }
            | Self::StmtSeq { rest: Some(_), .. }
            | Self::IdList { rest: Some(_), .. }
            | Self::If { else_branch: Some(_), .. }
            | Self::Stmt(Stmt::If(_))
            | Self::Cond(Cond::Not(_))
            | Self::Expr(Expr::Add(..))
            | Self::Term(Term::Mul(..))
            | Self::Operand(Operand::Ident(_))
            | Self::CompOp(CompOp::Equal) => 2,
            Self::Stmt(Stmt::While(_))
            | Self::Cond(Cond::And(..))
            | Self::Expr(Expr::Sub(..))
            | Self::Operand(Operand::Paren(_))
            | Self::CompOp(CompOp::Less) => 3,
            Self::Stmt(Stmt::Input(_)) | Self::Cond(Cond::Or(..)) | Self::CompOp(CompOp::Greater) => {
                4
            },
            Self::Stmt(Stmt::Output(_)) | Self::CompOp(CompOp::LessEqual) => 5,
            Self::CompOp(CompOp::GreaterEqual) => 6,
            _ => 1,
        }
    }

    /// Returns the child recorded in `slot`, if the production has one there.
    #[must_use]
    pub const fn child(&self, slot: Slot) -> Option<NodeId> {
        let [first, second, third] = self.children();
        match slot {
            Slot::First => first,
            Slot::Second => second,
            Slot::Third => third,
        }
    }

    /// Returns all three child slots.
    #[must_use]
    pub const fn children(&self) -> [Option<NodeId>; 3] {
        match *self {
            Self::Program { decls, stmts } => [Some(decls), Some(stmts), None],
            Self::DeclSeq { decl: first, rest }
            | Self::StmtSeq { stmt: first, rest }
            | Self::IdList { id: first, rest } => [Some(first), rest, None],
            Self::Decl { ids } | Self::Input { ids } | Self::Output { ids } => [Some(ids), None, None],
            Self::Stmt(Stmt::Assign(only)
                       | Stmt::If(only)
                       | Stmt::While(only)
                       | Stmt::Input(only)
                       | Stmt::Output(only))
            | Self::Cond(Cond::Compare(only) | Cond::Not(only))
            | Self::Expr(Expr::Term(only))
            | Self::Term(Term::Operand(only))
            | Self::Operand(Operand::Int(only) | Operand::Ident(only) | Operand::Paren(only)) => {
                [Some(only), None, None]
            },
            Self::Assign { target, value } => [Some(target), Some(value), None],
            Self::If { cond,
                       then_branch,
                       else_branch, } => [Some(cond), Some(then_branch), else_branch],
            Self::While { cond, body } => [Some(cond), Some(body), None],
            Self::Cond(Cond::And(lhs, rhs) | Cond::Or(lhs, rhs))
            | Self::Expr(Expr::Add(lhs, rhs) | Expr::Sub(lhs, rhs))
            | Self::Term(Term::Mul(lhs, rhs)) => [Some(lhs), Some(rhs), None],
            Self::Comparison { lhs, op, rhs } => [Some(lhs), Some(op), Some(rhs)],
            Self::CompOp(_) | Self::Int(_) | Self::Ident(_) => [None, None, None],
        }
    }
}
