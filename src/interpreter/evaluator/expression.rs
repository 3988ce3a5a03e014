use std::io::{BufRead, Write};

use crate::{
    ast::{Expr, Node, NodeId, Operand, Tag, Term},
    error::{RuntimeError, TreeError},
    interpreter::evaluator::core::{ExecResult, Executor},
    util::num::{add_checked, mul_checked, sub_checked},
};

/// A checked binary operator, given the line to report overflow on.
type Arithmetic = fn(i64, i64, usize) -> ExecResult<i64>;

impl<R: BufRead, W: Write> Executor<'_, R, W> {
    /// Evaluates an expression, which groups to the right.
    ///
    /// Terms are evaluated left to right first; the operators are then
    /// applied from the right end back, so `10 - 3 - 2` is `10 - (3 - 2)`.
    pub(super) fn eval_expr(&mut self, mut id: NodeId) -> ExecResult<i64> {
        let mut pending: Vec<(i64, Arithmetic, usize)> = Vec::new();
        let last = loop {
            let line = self.tree.line(id);
            match self.node(id)? {
                Node::Expr(Expr::Term(term)) => break self.eval_term(term)?,
                Node::Expr(Expr::Add(term, rest)) => {
                    pending.push((self.eval_term(term)?, add_checked, line));
                    id = rest;
                },
                Node::Expr(Expr::Sub(term, rest)) => {
                    pending.push((self.eval_term(term)?, sub_checked, line));
                    id = rest;
                },
                other => return Err(TreeError::unexpected(Tag::Expr, &other).into()),
            }
        };
        pending.into_iter()
               .rev()
               .try_fold(last, |rhs, (lhs, apply, line)| apply(lhs, rhs, line))
    }

    fn eval_term(&mut self, mut id: NodeId) -> ExecResult<i64> {
        let mut factors = Vec::new();
        let last = loop {
            match self.node(id)? {
                Node::Term(Term::Operand(operand)) => break self.eval_operand(operand)?,
                Node::Term(Term::Mul(operand, rest)) => {
                    factors.push((self.eval_operand(operand)?, self.tree.line(id)));
                    id = rest;
                },
                other => return Err(TreeError::unexpected(Tag::Term, &other).into()),
            }
        };
        factors.into_iter()
               .rev()
               .try_fold(last, |rhs, (lhs, line)| mul_checked(lhs, rhs, line))
    }

    /// Evaluates an integer literal, a variable, or a parenthesized
    /// expression.
    ///
    /// # Errors
    /// Returns `UninitializedVariable` when a variable is read before it has a
    /// value.
    pub(super) fn eval_operand(&mut self, id: NodeId) -> ExecResult<i64> {
        let operand = match self.node(id)? {
            Node::Operand(operand) => operand,
            other => return Err(TreeError::unexpected(Tag::Operand, &other).into()),
        };
        match operand {
            Operand::Int(leaf) => match self.node(leaf)? {
                Node::Int(value) => Ok(value),
                other => Err(TreeError::unexpected(Tag::Int, &other).into()),
            },
            Operand::Ident(leaf) => {
                let symbol = self.symbol(leaf)?;
                self.env.get(symbol).ok_or_else(|| {
                    RuntimeError::UninitializedVariable {
                        name: self.env.symbols().name(symbol).to_string(),
                        line: self.tree.line(leaf),
                    }
                })
            },
            Operand::Paren(inner) => self.eval_expr(inner),
        }
    }
}
