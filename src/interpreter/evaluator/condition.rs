use std::io::{BufRead, Write};

use crate::{
    ast::{CompOp, Cond, Node, NodeId, Tag},
    error::TreeError,
    interpreter::evaluator::core::{ExecResult, Executor},
};

impl<R: BufRead, W: Write> Executor<'_, R, W> {
    /// Evaluates a condition to a boolean.
    ///
    /// Both sides of `&&` and `||` are always evaluated, left first, before
    /// the results are combined. An uninitialized variable on the right side
    /// is therefore an error even when the left side decides the outcome.
    /// A run of `!` is walked in a loop, counting each negation as one
    /// condition.
    pub(super) fn eval_cond(&mut self, mut id: NodeId) -> ExecResult<bool> {
        let mut negated = false;
        loop {
            let cond = match self.node(id)? {
                Node::Cond(cond) => cond,
                other => return Err(TreeError::unexpected(Tag::Cond, &other).into()),
            };
            self.stats.conditions += 1;
            let value = match cond {
                Cond::Not(inner) => {
                    negated = !negated;
                    id = inner;
                    continue;
                },
                Cond::Compare(comparison) => self.eval_comparison(comparison)?,
                Cond::And(lhs, rhs) => {
                    let lhs = self.eval_cond(lhs)?;
                    let rhs = self.eval_cond(rhs)?;
                    lhs && rhs
                },
                Cond::Or(lhs, rhs) => {
                    let lhs = self.eval_cond(lhs)?;
                    let rhs = self.eval_cond(rhs)?;
                    lhs || rhs
                },
            };
            return Ok(value != negated);
        }
    }

    fn eval_comparison(&mut self, id: NodeId) -> ExecResult<bool> {
        let (lhs, op, rhs) = match self.node(id)? {
            Node::Comparison { lhs, op, rhs } => (lhs, op, rhs),
            other => return Err(TreeError::unexpected(Tag::Comparison, &other).into()),
        };
        self.stats.comparisons += 1;
        let lhs = self.eval_operand(lhs)?;
        let op = self.comp_op(op)?;
        let rhs = self.eval_operand(rhs)?;
        Ok(op.apply(lhs, rhs))
    }

    fn comp_op(&self, id: NodeId) -> ExecResult<CompOp> {
        match self.node(id)? {
            Node::CompOp(op) => Ok(op),
            other => Err(TreeError::unexpected(Tag::CompOp, &other).into()),
        }
    }
}
