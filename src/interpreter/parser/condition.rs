use crate::{
    ast::{CompOp, Cond, Node, NodeId},
    error::Expected,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a condition.
    ///
    /// Grammar: `cond := comparison | "!" cond | "[" cond ("&&"|"||") cond "]"`
    ///
    /// Leading `!`s are read in a loop. After them, anything other than `[`
    /// is taken to be a comparison.
    ///
    /// # Errors
    /// - `Unexpected` naming `"&&" or "||"` when a bracketed condition has no
    ///   logical operator.
    /// - `Unexpected` naming `"]"` when the bracket is not closed.
    pub(in crate::interpreter::parser) fn parse_cond(&mut self) -> ParseResult<NodeId> {
        let mut negations = Vec::new();
        while self.kind() == TokenKind::Bang {
            negations.push(self.open()?);
            self.lexer.advance()?;
        }

        let line = self.open()?;
        let cond = if self.kind() == TokenKind::LBracket {
            self.lexer.advance()?;
            let lhs = self.nested(Self::parse_cond)?;
            let combine: fn(NodeId, NodeId) -> Cond = match self.kind() {
                TokenKind::AndAnd => Cond::And,
                TokenKind::OrOr => Cond::Or,
                _ => return self.unexpected(Expected::LogicalOperator),
            };
            self.lexer.advance()?;
            let rhs = self.nested(Self::parse_cond)?;
            self.expect(TokenKind::RBracket, Expected::CloseBracket)?;
            combine(lhs, rhs)
        } else {
            Cond::Compare(self.parse_comparison()?)
        };

        let mut cond = self.alloc(Node::Cond(cond), line)?;
        for line in negations.into_iter().rev() {
            cond = self.alloc(Node::Cond(Cond::Not(cond)), line)?;
        }
        Ok(cond)
    }

    /// Parses `( operand comp-op operand )`.
    fn parse_comparison(&mut self) -> ParseResult<NodeId> {
        let line = self.open()?;
        self.expect(TokenKind::LParen, Expected::Comparison)?;
        let lhs = self.parse_operand()?;
        let op = self.parse_comp_op()?;
        let rhs = self.parse_operand()?;
        self.expect(TokenKind::RParen, Expected::CloseParen)?;
        self.alloc(Node::Comparison { lhs, op, rhs }, line)
    }

    /// Parses one of `!= == < > <= >=`.
    fn parse_comp_op(&mut self) -> ParseResult<NodeId> {
        let line = self.open()?;
        let op = match self.kind() {
            TokenKind::BangEqual => CompOp::NotEqual,
            TokenKind::EqualEqual => CompOp::Equal,
            TokenKind::Less => CompOp::Less,
            TokenKind::Greater => CompOp::Greater,
            TokenKind::LessEqual => CompOp::LessEqual,
            TokenKind::GreaterEqual => CompOp::GreaterEqual,
            _ => return self.unexpected(Expected::ComparisonOperator),
        };
        self.lexer.advance()?;
        self.alloc(Node::CompOp(op), line)
    }
}
