use crate::{
    ast::{Node, NodeId},
    error::{Expected, ParseError, TreeError},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
        tree::MAX_NESTING,
    },
};

/// How an identifier occurrence relates to the symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// The occurrence introduces the name (`int A;`).
    Declare,
    /// The occurrence refers to a name declared earlier.
    Use,
}

impl Parser<'_> {
    /// Returns the kind of the lookahead token.
    pub(in crate::interpreter::parser) fn kind(&self) -> TokenKind {
        self.lexer.current().kind
    }

    /// Returns the source line of the lookahead token.
    pub(in crate::interpreter::parser) fn line(&self) -> usize {
        self.lexer.current().line
    }

    /// Consumes the lookahead token if it has kind `kind`.
    ///
    /// # Errors
    /// Returns [`ParseError::Unexpected`] naming `expected` otherwise.
    pub(in crate::interpreter::parser) fn expect(&mut self,
                                                 kind: TokenKind,
                                                 expected: Expected)
                                                 -> ParseResult<()> {
        if self.kind() != kind {
            return self.unexpected(expected);
        }
        self.lexer.advance()
    }

    /// Builds the mismatch error for the lookahead token.
    pub(in crate::interpreter::parser) fn unexpected<T>(&self,
                                                        expected: Expected)
                                                        -> ParseResult<T> {
        let token = self.lexer.current();
        Err(ParseError::Unexpected { expected,
                                     found: token.text.clone(),
                                     line: token.line })
    }

    /// Claims one node of the budget for the rule being entered and returns
    /// the line of the lookahead token.
    ///
    /// # Errors
    /// Returns [`TreeError::CapacityExceeded`] when the finished nodes plus
    /// the ones already claimed fill the tree.
    pub(in crate::interpreter::parser) fn open(&mut self) -> ParseResult<usize> {
        let capacity = self.tree.capacity();
        if self.tree.len() + self.reserved >= capacity {
            return Err(TreeError::CapacityExceeded { capacity }.into());
        }
        self.reserved += 1;
        Ok(self.line())
    }

    /// Appends a node to the tree, settling the claim made by [`Self::open`].
    pub(in crate::interpreter::parser) fn alloc(&mut self,
                                                node: Node,
                                                line: usize)
                                                -> ParseResult<NodeId> {
        self.reserved = self.reserved.saturating_sub(1);
        Ok(self.tree.alloc(node, line)?)
    }

    /// Allocates a right-linked chain, last element first, so that each
    /// node's `rest` already exists. `links` holds every element but `last`.
    pub(in crate::interpreter::parser) fn alloc_chain(&mut self,
                                                      links: Vec<(usize, NodeId)>,
                                                      (line, item): (usize, NodeId),
                                                      build: fn(NodeId, Option<NodeId>) -> Node)
                                                      -> ParseResult<NodeId> {
        let mut chain = self.alloc(build(item, None), line)?;
        for (line, item) in links.into_iter().rev() {
            chain = self.alloc(build(item, Some(chain)), line)?;
        }
        Ok(chain)
    }

    /// Runs `rule` one nesting level deeper.
    ///
    /// # Errors
    /// Returns [`TreeError::NestingTooDeep`] past [`MAX_NESTING`] levels, and
    /// whatever `rule` returns.
    pub(in crate::interpreter::parser) fn nested<T>(&mut self,
                                                    rule: impl FnOnce(&mut Self) -> ParseResult<T>)
                                                    -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(TreeError::NestingTooDeep { limit: MAX_NESTING }.into());
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Parses one identifier and allocates its leaf.
    ///
    /// With [`Binding::Declare`] the name is entered into the symbol table;
    /// with [`Binding::Use`] it must already be there.
    ///
    /// # Errors
    /// - `Unexpected` if the lookahead is not an identifier.
    /// - `DuplicateVariable` when declaring a name twice.
    /// - `UndeclaredVariable` when using a name never declared.
    pub(in crate::interpreter::parser) fn parse_identifier(&mut self,
                                                           binding: Binding)
                                                           -> ParseResult<NodeId> {
        let line = self.open()?;
        let Some(name) = self.lexer.identifier_name() else {
            return self.unexpected(Expected::Identifier);
        };

        let symbol = match binding {
            Binding::Declare => self.symbols.declare(name),
            Binding::Use => self.symbols.resolve(name),
        };
        let Some(symbol) = symbol else {
            let name = name.to_string();
            return Err(match binding {
                           Binding::Declare => ParseError::DuplicateVariable { name, line },
                           Binding::Use => ParseError::UndeclaredVariable { name, line },
                       });
        };

        self.lexer.advance()?;
        self.alloc(Node::Ident(symbol), line)
    }
}
