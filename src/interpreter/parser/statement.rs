use crate::{
    ast::{Node, NodeId, Stmt},
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
    /// Parses one or more statements.
    ///
    /// Grammar: `stmt-seq := stmt (stmt-seq)?`
    ///
    /// The sequence continues while the lookahead can start a statement:
    /// an identifier, `if`, `while`, `read` or `write`.
    pub(in crate::interpreter::parser) fn parse_stmt_seq(&mut self) -> ParseResult<NodeId> {
        let mut links = Vec::new();
        let mut line = self.open()?;
        let mut stmt = self.parse_stmt()?;
        while self.kind().starts_statement() {
            links.push((line, stmt));
            line = self.open()?;
            stmt = self.parse_stmt()?;
        }
        self.alloc_chain(links, (line, stmt), |stmt, rest| Node::StmtSeq { stmt, rest })
    }

    /// Parses a single statement, choosing the form from the lookahead.
    ///
    /// # Errors
    /// Returns `Unexpected` naming "at least one statement" when the
    /// lookahead cannot start a statement.
    fn parse_stmt(&mut self) -> ParseResult<NodeId> {
        let line = self.open()?;
        let stmt = match self.kind() {
            TokenKind::Identifier => Stmt::Assign(self.parse_assign()?),
            TokenKind::If => Stmt::If(self.parse_if()?),
            TokenKind::While => Stmt::While(self.parse_while()?),
            TokenKind::Read => Stmt::Input(self.parse_io(TokenKind::Read)?),
            TokenKind::Write => Stmt::Output(self.parse_io(TokenKind::Write)?),
            _ => return self.unexpected(Expected::Statement),
        };
        self.alloc(Node::Stmt(stmt), line)
    }

    /// Parses `id = expr ;`.
    fn parse_assign(&mut self) -> ParseResult<NodeId> {
        let line = self.open()?;
        let target = self.parse_identifier(Binding::Use)?;
        self.expect(TokenKind::Assign, Expected::Assign)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, Expected::Semicolon)?;
        self.alloc(Node::Assign { target, value }, line)
    }

    /// Parses an `if` statement with an optional `else` branch.
    ///
    /// Syntax:
    /// ```text
    ///     if <cond> then <stmt-seq> end;
    ///     if <cond> then <stmt-seq> else <stmt-seq> end;
    /// ```
    ///
    /// # Errors
    /// - `Unexpected` naming `then`, `"else" or "end"`, `end` or `;` when the
    ///   corresponding token is missing.
    /// - Propagates errors from the condition and both branches.
    fn parse_if(&mut self) -> ParseResult<NodeId> {
        let line = self.open()?;
        self.lexer.advance()?;
        let cond = self.parse_cond()?;
        self.expect(TokenKind::Then, Expected::Then)?;
        let then_branch = self.nested(Self::parse_stmt_seq)?;

        let else_branch = match self.kind() {
            TokenKind::Else => {
                self.lexer.advance()?;
                Some(self.nested(Self::parse_stmt_seq)?)
            },
            TokenKind::End => None,
            _ => return self.unexpected(Expected::ElseOrEnd),
        };

        self.expect(TokenKind::End, Expected::End)?;
        self.expect(TokenKind::Semicolon, Expected::Semicolon)?;

        self.alloc(Node::If { cond,
                              then_branch,
                              else_branch },
                   line)
    }

    /// Parses `while cond loop stmt-seq end ;`.
    fn parse_while(&mut self) -> ParseResult<NodeId> {
        let line = self.open()?;
        self.lexer.advance()?;
        let cond = self.parse_cond()?;
        self.expect(TokenKind::Loop, Expected::Loop)?;
        let body = self.nested(Self::parse_stmt_seq)?;
        self.expect(TokenKind::End, Expected::End)?;
        self.expect(TokenKind::Semicolon, Expected::Semicolon)?;
        self.alloc(Node::While { cond, body }, line)
    }

    /// Parses `read id-list ;` or `write id-list ;`, depending on `keyword`.
    ///
    /// Every listed name must already be declared.
    fn parse_io(&mut self, keyword: TokenKind) -> ParseResult<NodeId> {
        let line = self.open()?;
        self.lexer.advance()?;
        let ids = self.parse_id_list(Binding::Use)?;
        self.expect(TokenKind::Semicolon, Expected::Semicolon)?;
        let node = if keyword == TokenKind::Read {
            Node::Input { ids }
        } else {
            Node::Output { ids }
        };
        self.alloc(node, line)
    }
}
