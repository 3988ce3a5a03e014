use tracing::{debug, instrument};

use crate::{
    ast::{CompOp, Cond, Expr, Node, NodeId, Operand, Stmt, Tag, Term},
    error::TreeError,
    interpreter::{
        environment::SymbolTable,
        tree::{SyntaxTree, TreeResult},
    },
};

/// Indentation added per statement-sequence nesting level.
pub const INDENT: usize = 4;

/// Renders a parsed program as canonical Core source.
///
/// Declarations and top-level statements are indented by four spaces, and
/// each nested statement sequence by four more. The text ends with the
/// closing `end` and a newline.
///
/// # Errors
/// Returns a [`TreeError`] if the tree has no root or does not have the shape
/// the parser produces.
///
/// # Example
/// ```
/// use core_interp::interpreter::{parser::parse, printer::render};
///
/// let parsed = parse("program int A;begin A=(A+1)*2; end", 100).unwrap();
/// let text = render(&parsed.tree, &parsed.symbols).unwrap();
///
/// assert_eq!(text, "program\n    int A;\nbegin\n    A = (A + 1) * 2;\nend\n");
/// ```
#[instrument(level = "debug", skip_all)]
pub fn render(tree: &SyntaxTree, symbols: &SymbolTable) -> TreeResult<String> {
    let root = tree.root().ok_or(TreeError::Empty)?;
    let mut printer = Printer { tree,
                                symbols,
                                out: String::new(),
                                indent: 0 };
    printer.program(root)?;
    debug!(bytes = printer.out.len(), "rendered program");
    Ok(printer.out)
}

struct Printer<'t> {
    tree:    &'t SyntaxTree,
    symbols: &'t SymbolTable,
    out:     String,
    indent:  usize,
}

impl Printer<'_> {
    fn node(&self, id: NodeId) -> TreeResult<Node> {
        self.tree.get(id).copied()
    }

    fn pad(&mut self) {
        self.out.extend(std::iter::repeat_n(' ', self.indent));
    }

    fn program(&mut self, id: NodeId) -> TreeResult<()> {
        let Node::Program { decls, stmts } = self.node(id)? else {
            return Err(TreeError::unexpected(Tag::Program, &self.node(id)?));
        };
        self.out.push_str("program\n");
        self.indent = INDENT;
        self.decl_seq(decls)?;
        self.out.push_str("begin\n");
        self.stmt_seq(stmts)?;
        self.out.push_str("end\n");
        Ok(())
    }

    fn decl_seq(&mut self, mut id: NodeId) -> TreeResult<()> {
        loop {
            match self.node(id)? {
                Node::DeclSeq { decl, rest } => {
                    self.pad();
                    self.decl(decl)?;
                    match rest {
                        Some(next) => id = next,
                        None => return Ok(()),
                    }
                },
                other => return Err(TreeError::unexpected(Tag::DeclSeq, &other)),
            }
        }
    }

    fn decl(&mut self, id: NodeId) -> TreeResult<()> {
        match self.node(id)? {
            Node::Decl { ids } => {
                self.out.push_str("int ");
                self.id_list(ids)?;
                self.out.push_str(";\n");
                Ok(())
            },
            other => Err(TreeError::unexpected(Tag::Decl, &other)),
        }
    }

    fn id_list(&mut self, mut id: NodeId) -> TreeResult<()> {
        loop {
            match self.node(id)? {
                Node::IdList { id: ident, rest } => {
                    self.ident(ident)?;
                    match rest {
                        Some(next) => {
                            self.out.push_str(", ");
                            id = next;
                        },
                        None => return Ok(()),
                    }
                },
                other => return Err(TreeError::unexpected(Tag::IdList, &other)),
            }
        }
    }

    fn stmt_seq(&mut self, mut id: NodeId) -> TreeResult<()> {
        loop {
            match self.node(id)? {
                Node::StmtSeq { stmt, rest } => {
                    self.pad();
                    self.stmt(stmt)?;
                    match rest {
                        Some(next) => id = next,
                        None => return Ok(()),
                    }
                },
                other => return Err(TreeError::unexpected(Tag::StmtSeq, &other)),
            }
        }
    }

    /// Prints a nested statement sequence one level deeper.
    fn block(&mut self, id: NodeId) -> TreeResult<()> {
        self.indent += INDENT;
        let result = self.stmt_seq(id);
        self.indent -= INDENT;
        result
    }

    fn stmt(&mut self, id: NodeId) -> TreeResult<()> {
        let stmt = match self.node(id)? {
            Node::Stmt(stmt) => stmt,
            other => return Err(TreeError::unexpected(Tag::Stmt, &other)),
        };
        match stmt {
            Stmt::Assign(inner) => self.assign(inner),
            Stmt::If(inner) => self.if_stmt(inner),
            Stmt::While(inner) => self.while_stmt(inner),
            Stmt::Input(inner) | Stmt::Output(inner) => self.io(inner),
        }
    }

    fn assign(&mut self, id: NodeId) -> TreeResult<()> {
        match self.node(id)? {
            Node::Assign { target, value } => {
                self.ident(target)?;
                self.out.push_str(" = ");
                self.expr(value)?;
                self.out.push_str(";\n");
                Ok(())
            },
            other => Err(TreeError::unexpected(Tag::Assign, &other)),
        }
    }

    fn if_stmt(&mut self, id: NodeId) -> TreeResult<()> {
        let Node::If { cond,
                       then_branch,
                       else_branch, } = self.node(id)?
        else {
            return Err(TreeError::unexpected(Tag::If, &self.node(id)?));
        };
        self.out.push_str("if ");
        self.cond(cond)?;
        self.out.push_str(" then\n");
        self.block(then_branch)?;
        if let Some(else_branch) = else_branch {
            self.pad();
            self.out.push_str("else\n");
            self.block(else_branch)?;
        }
        self.pad();
        self.out.push_str("end;\n");
        Ok(())
    }

    fn while_stmt(&mut self, id: NodeId) -> TreeResult<()> {
        let Node::While { cond, body } = self.node(id)? else {
            return Err(TreeError::unexpected(Tag::While, &self.node(id)?));
        };
        self.out.push_str("while ");
        self.cond(cond)?;
        self.out.push_str(" loop\n");
        self.block(body)?;
        self.pad();
        self.out.push_str("end;\n");
        Ok(())
    }

    fn io(&mut self, id: NodeId) -> TreeResult<()> {
        let (keyword, ids) = match self.node(id)? {
            Node::Input { ids } => ("read ", ids),
            Node::Output { ids } => ("write ", ids),
            other => return Err(TreeError::unexpected(Tag::Input, &other)),
        };
        self.out.push_str(keyword);
        self.id_list(ids)?;
        self.out.push_str(";\n");
        Ok(())
    }

    fn cond(&mut self, mut id: NodeId) -> TreeResult<()> {
        loop {
            let cond = match self.node(id)? {
                Node::Cond(cond) => cond,
                other => return Err(TreeError::unexpected(Tag::Cond, &other)),
            };
            match cond {
                Cond::Not(inner) => {
                    self.out.push('!');
                    id = inner;
                },
                Cond::Compare(comparison) => return self.comparison(comparison),
                Cond::And(lhs, rhs) => return self.compound(lhs, " && ", rhs),
                Cond::Or(lhs, rhs) => return self.compound(lhs, " || ", rhs),
            }
        }
    }

    fn compound(&mut self, lhs: NodeId, op: &str, rhs: NodeId) -> TreeResult<()> {
        self.out.push('[');
        self.cond(lhs)?;
        self.out.push_str(op);
        self.cond(rhs)?;
        self.out.push(']');
        Ok(())
    }

    fn comparison(&mut self, id: NodeId) -> TreeResult<()> {
        let Node::Comparison { lhs, op, rhs } = self.node(id)? else {
            return Err(TreeError::unexpected(Tag::Comparison, &self.node(id)?));
        };
        let op = self.comp_op(op)?;
        self.out.push('(');
        self.operand(lhs)?;
        self.out.push(' ');
        self.out.push_str(op.symbol());
        self.out.push(' ');
        self.operand(rhs)?;
        self.out.push(')');
        Ok(())
    }

    fn comp_op(&self, id: NodeId) -> TreeResult<CompOp> {
        match self.node(id)? {
            Node::CompOp(op) => Ok(op),
            other => Err(TreeError::unexpected(Tag::CompOp, &other)),
        }
    }

    fn expr(&mut self, mut id: NodeId) -> TreeResult<()> {
        loop {
            let (term, op, rest) = match self.node(id)? {
                Node::Expr(Expr::Term(term)) => return self.term(term),
                Node::Expr(Expr::Add(term, rest)) => (term, " + ", rest),
                Node::Expr(Expr::Sub(term, rest)) => (term, " - ", rest),
                other => return Err(TreeError::unexpected(Tag::Expr, &other)),
            };
            self.term(term)?;
            self.out.push_str(op);
            id = rest;
        }
    }

    fn term(&mut self, mut id: NodeId) -> TreeResult<()> {
        loop {
            match self.node(id)? {
                Node::Term(Term::Operand(operand)) => return self.operand(operand),
                Node::Term(Term::Mul(operand, rest)) => {
                    self.operand(operand)?;
                    self.out.push_str(" * ");
                    id = rest;
                },
                other => return Err(TreeError::unexpected(Tag::Term, &other)),
            }
        }
    }

    fn operand(&mut self, id: NodeId) -> TreeResult<()> {
        let operand = match self.node(id)? {
            Node::Operand(operand) => operand,
            other => return Err(TreeError::unexpected(Tag::Operand, &other)),
        };
        match operand {
            Operand::Int(leaf) => match self.node(leaf)? {
                Node::Int(value) => {
                    self.out.push_str(&value.to_string());
                    Ok(())
                },
                other => Err(TreeError::unexpected(Tag::Int, &other)),
            },
            Operand::Ident(leaf) => self.ident(leaf),
            Operand::Paren(inner) => {
                self.out.push('(');
                self.expr(inner)?;
                self.out.push(')');
                Ok(())
            },
        }
    }

    fn ident(&mut self, id: NodeId) -> TreeResult<()> {
        match self.node(id)? {
            Node::Ident(symbol) => {
                self.out.push_str(self.symbols.name(symbol));
                Ok(())
            },
            other => Err(TreeError::unexpected(Tag::Ident, &other)),
        }
    }
}
