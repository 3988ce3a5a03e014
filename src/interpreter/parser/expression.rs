use crate::{
    ast::{Expr, Node, NodeId, Operand, Term},
    error::Expected,
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, Parser},
            utils::Binding,
        },
    },
};

impl Parser<'_> {
    /// Parses an additive expression.
    ///
    /// Grammar: `expr := term (("+" | "-") expr)?`
    ///
    /// The right-hand side is a whole `expr`, so `10 - 3 - 2` groups as
    /// `10 - (3 - 2)`. The chain is read in a loop and its nodes are
    /// allocated from the right end back.
    pub(in crate::interpreter::parser) fn parse_expr(&mut self) -> ParseResult<NodeId> {
        let mut links = Vec::new();
        let mut line = self.open()?;
        let mut term = self.parse_term()?;
        loop {
            let combine: fn(NodeId, NodeId) -> Expr = match self.kind() {
                TokenKind::Plus => Expr::Add,
                TokenKind::Minus => Expr::Sub,
                _ => break,
            };
            self.lexer.advance()?;
            links.push((line, term, combine));
            line = self.open()?;
            term = self.parse_term()?;
        }

        let mut expr = self.alloc(Node::Expr(Expr::Term(term)), line)?;
        for (line, term, combine) in links.into_iter().rev() {
            expr = self.alloc(Node::Expr(combine(term, expr)), line)?;
        }
        Ok(expr)
    }

    /// Parses a multiplicative term.
    ///
    /// Grammar: `term := operand ("*" term)?`
    fn parse_term(&mut self) -> ParseResult<NodeId> {
        let mut links = Vec::new();
        let mut line = self.open()?;
        let mut operand = self.parse_operand()?;
        while self.kind() == TokenKind::Star {
            self.lexer.advance()?;
            links.push((line, operand));
            line = self.open()?;
            operand = self.parse_operand()?;
        }

        let mut term = self.alloc(Node::Term(Term::Operand(operand)), line)?;
        for (line, operand) in links.into_iter().rev() {
            term = self.alloc(Node::Term(Term::Mul(operand, term)), line)?;
        }
        Ok(term)
    }

    /// Parses an integer literal, a declared identifier, or `( expr )`.
    ///
    /// # Errors
    /// - `UndeclaredVariable` for an identifier never declared.
    /// - `Unexpected` naming `")"` for an unclosed parenthesis.
    /// - `Unexpected` naming the operand forms for any other token.
    /// - `Tree` when parentheses nest too deeply for the budget.
    pub(in crate::interpreter::parser) fn parse_operand(&mut self) -> ParseResult<NodeId> {
        let line = self.open()?;
        let operand = match self.kind() {
            TokenKind::Integer => {
                let Some(value) = self.lexer.literal_value() else {
                    return self.unexpected(Expected::Operand);
                };
                let leaf = self.open()?;
                self.lexer.advance()?;
                Operand::Int(self.alloc(Node::Int(value), leaf)?)
            },
            TokenKind::Identifier => Operand::Ident(self.parse_identifier(Binding::Use)?),
            TokenKind::LParen => {
                self.lexer.advance()?;
                let inner = self.nested(Self::parse_expr)?;
                self.expect(TokenKind::RParen, Expected::CloseParen)?;
                Operand::Paren(inner)
            },
            _ => return self.unexpected(Expected::Operand),
        };
        self.alloc(Node::Operand(operand), line)
    }
}
