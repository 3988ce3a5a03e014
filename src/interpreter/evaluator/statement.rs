use std::io::{BufRead, Write};

use tracing::{debug, trace};

use crate::{
    ast::{Node, NodeId, Stmt, Tag},
    error::{RuntimeError, TreeError},
    interpreter::evaluator::core::{ExecResult, Executor},
};

impl<R: BufRead, W: Write> Executor<'_, R, W> {
    /// Executes a statement sequence in source order.
    pub(super) fn exec_stmt_seq(&mut self, mut id: NodeId) -> ExecResult<()> {
        loop {
            match self.node(id)? {
                Node::StmtSeq { stmt, rest } => {
                    self.exec_stmt(stmt)?;
                    match rest {
                        Some(next) => id = next,
                        None => return Ok(()),
                    }
                },
                other => return Err(TreeError::unexpected(Tag::StmtSeq, &other).into()),
            }
        }
    }

    fn exec_stmt(&mut self, id: NodeId) -> ExecResult<()> {
        let stmt = match self.node(id)? {
            Node::Stmt(stmt) => stmt,
            other => return Err(TreeError::unexpected(Tag::Stmt, &other).into()),
        };
        self.stats.statements += 1;
        match stmt {
            Stmt::Assign(inner) => self.exec_assign(inner),
            Stmt::If(inner) => self.exec_if(inner),
            Stmt::While(inner) => self.exec_while(inner),
            Stmt::Input(inner) => self.exec_read(inner),
            Stmt::Output(inner) => self.exec_write(inner),
        }
    }

    /// Evaluates the right-hand side and stores it in the target variable.
    fn exec_assign(&mut self, id: NodeId) -> ExecResult<()> {
        let (target, value) = match self.node(id)? {
            Node::Assign { target, value } => (target, value),
            other => return Err(TreeError::unexpected(Tag::Assign, &other).into()),
        };
        let symbol = self.symbol(target)?;
        let value = self.eval_expr(value)?;
        if !self.env.set(symbol, value) {
            return Err(RuntimeError::UnknownVariable { name: format!("#{}", symbol.index()),
                                                       line: self.tree.line(target) });
        }
        Ok(())
    }

    /// Runs the then-branch when the condition holds, the else-branch (if
    /// any) otherwise.
    fn exec_if(&mut self, id: NodeId) -> ExecResult<()> {
        let (cond, then_branch, else_branch) = match self.node(id)? {
            Node::If { cond,
                       then_branch,
                       else_branch, } => (cond, then_branch, else_branch),
            other => return Err(TreeError::unexpected(Tag::If, &other).into()),
        };
        if self.eval_cond(cond)? {
            self.exec_stmt_seq(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.exec_stmt_seq(else_branch)
        } else {
            Ok(())
        }
    }

    /// Runs the body while the condition holds. The condition is evaluated
    /// once more than the number of iterations.
    fn exec_while(&mut self, id: NodeId) -> ExecResult<()> {
        let (cond, body) = match self.node(id)? {
            Node::While { cond, body } => (cond, body),
            other => return Err(TreeError::unexpected(Tag::While, &other).into()),
        };
        let line = self.tree.line(id);
        let mut iterations = 0_u64;
        while self.eval_cond(cond)? {
            iterations += 1;
            self.stats.iterations += 1;
            trace!(line, iteration = iterations, "loop iteration");
            self.exec_stmt_seq(body)?;
        }
        trace!(line, iterations, "loop finished");
        Ok(())
    }

    /// Reads one integer from the data stream into each listed variable, in
    /// order.
    ///
    /// # Errors
    /// - `InputExhausted` if the data stream runs out.
    /// - `InputNotInteger` if the next data token is not an integer.
    fn exec_read(&mut self, id: NodeId) -> ExecResult<()> {
        let ids = match self.node(id)? {
            Node::Input { ids } => ids,
            other => return Err(TreeError::unexpected(Tag::Input, &other).into()),
        };
        let line = self.tree.line(id);
        for name in self.names(ids)? {
            let value = self.input.next_integer(line)?;
            if !self.env.set_by_name(name, value) {
                return Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line });
            }
            debug!(line, name, value, "read");
        }
        Ok(())
    }

    /// Writes `name = value` for each listed variable, one per line.
    ///
    /// # Errors
    /// - `UninitializedVariable` if a listed variable has no value yet. The
    ///   lines for earlier names in the list are already written.
    /// - `Io` if the output sink fails.
    fn exec_write(&mut self, id: NodeId) -> ExecResult<()> {
        let ids = match self.node(id)? {
            Node::Output { ids } => ids,
            other => return Err(TreeError::unexpected(Tag::Output, &other).into()),
        };
        let line = self.tree.line(id);
        for name in self.names(ids)? {
            let Some(value) = self.env.get_by_name(name) else {
                return Err(RuntimeError::UninitializedVariable { name: name.to_string(),
                                                                 line });
            };
            debug!(line, name, value, "write");
            writeln!(self.out, "{name} = {value}").map_err(|source| RuntimeError::Io { source,
                                                                                         line })?;
        }
        Ok(())
    }
}
