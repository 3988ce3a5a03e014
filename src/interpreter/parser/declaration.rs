use crate::{
    ast::{Node, NodeId},
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
    /// Parses one or more declarations.
    ///
    /// Grammar: `decl-seq := decl (decl-seq)?`
    ///
    /// Another declaration follows exactly when the lookahead is `int`.
    pub(in crate::interpreter::parser) fn parse_decl_seq(&mut self) -> ParseResult<NodeId> {
        let mut links = Vec::new();
        let mut line = self.open()?;
        let mut decl = self.parse_decl()?;
        while self.kind() == TokenKind::Int {
            links.push((line, decl));
            line = self.open()?;
            decl = self.parse_decl()?;
        }
        self.alloc_chain(links, (line, decl), |decl, rest| Node::DeclSeq { decl, rest })
    }

    /// Parses `int id-list ;`, declaring every listed name.
    ///
    /// # Errors
    /// - `Unexpected` if the declaration does not start with `int` or lacks
    ///   its `;`.
    /// - `DuplicateVariable` if a name is declared twice, in this declaration
    ///   or an earlier one.
    fn parse_decl(&mut self) -> ParseResult<NodeId> {
        let line = self.open()?;
        self.expect(TokenKind::Int, Expected::Declaration)?;
        let ids = self.parse_id_list(Binding::Declare)?;
        self.expect(TokenKind::Semicolon, Expected::Semicolon)?;
        self.alloc(Node::Decl { ids }, line)
    }

    /// Parses a comma-separated list of identifiers.
    ///
    /// Grammar: `id-list := id ("," id-list)?`
    ///
    /// The same rule serves declarations and the `read` / `write` statements;
    /// `binding` says whether each name is being declared or used.
    pub(in crate::interpreter::parser) fn parse_id_list(&mut self,
                                                        binding: Binding)
                                                        -> ParseResult<NodeId> {
        let mut links = Vec::new();
        let mut line = self.open()?;
        let mut id = self.parse_identifier(binding)?;
        while self.kind() == TokenKind::Comma {
            self.lexer.advance()?;
            links.push((line, id));
            line = self.open()?;
            id = self.parse_identifier(binding)?;
        }
        self.alloc_chain(links, (line, id), |id, rest| Node::IdList { id, rest })
    }
}
