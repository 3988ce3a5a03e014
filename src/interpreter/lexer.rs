use std::fmt;

use logos::Logos;
use tracing::trace;

use crate::{
    error::{LexErrorKind, ParseError},
    interpreter::parser::core::ParseResult,
};

/// Represents a lexical token as recognized by `logos`.
///
/// This is the raw scanner vocabulary. The parser never sees it directly: the
/// [`Lexer`] wraps each match into a [`Lexeme`] carrying a [`TokenKind`],
/// the matched text and the source line.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\f\x0B]+")]
pub enum Token {
    /// `program`
    #[token("program", separated)]
    Program,
    /// `begin`
    #[token("begin", separated)]
    Begin,
    /// `end`
    #[token("end", separated)]
    End,
    /// `int`
    #[token("int", separated)]
    Int,
    /// `if`
    #[token("if", separated)]
    If,
    /// `then`
    #[token("then", separated)]
    Then,
    /// `else`
    #[token("else", separated)]
    Else,
    /// `while`
    #[token("while", separated)]
    While,
    /// `loop`
    #[token("loop", separated)]
    Loop,
    /// `read`
    #[token("read", separated)]
    Read,
    /// `write`
    #[token("write", separated)]
    Write,
    /// Any other run of lowercase letters. Never produced: the callback
    /// always rejects it.
    #[regex(r"[a-z]+", unknown_word)]
    UnknownWord,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `=`
    #[token("=")]
    Assign,
    /// `!`
    #[token("!")]
    Bang,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", integer)]
    Integer(i64),
    /// Identifier tokens such as `X` or `SUM2`.
    #[regex(r"[A-Z][A-Z0-9]*", identifier)]
    Identifier(String),
    /// Line breaks, counted and skipped.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Returns `true` for characters allowed right after a keyword, integer or
/// identifier: whitespace or punctuation.
#[must_use]
pub const fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B' || c.is_ascii_punctuation()
}

/// Rejects a word token that runs straight into a letter or digit.
fn separated(lex: &mut logos::Lexer<Token>) -> Result<(), LexErrorKind> {
    match lex.remainder().chars().next() {
        Some(c) if !is_separator(c) => Err(LexErrorKind::WhitespaceRequired),
        _ => Ok(()),
    }
}

/// Rejects a lowercase word that is not a keyword.
fn unknown_word(_: &mut logos::Lexer<Token>) -> Result<(), LexErrorKind> {
    Err(LexErrorKind::InvalidToken)
}

/// Parses an integer literal from the current token slice.
fn integer(lex: &mut logos::Lexer<Token>) -> Result<i64, LexErrorKind> {
    separated(lex)?;
    lex.slice().parse().map_err(|_| LexErrorKind::LiteralTooLarge)
}

/// Accepts an identifier made of uppercase letters followed by digits.
///
/// The scanner takes the longest run of uppercase letters and digits, so a
/// letter after a digit (`A1B`) lands here and is rejected as a whole.
fn identifier(lex: &mut logos::Lexer<Token>) -> Result<String, LexErrorKind> {
    let text = lex.slice().to_string();
    let digits = text.trim_start_matches(|c: char| c.is_ascii_uppercase());
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LexErrorKind::InvalidToken);
    }
    separated(lex)?;
    Ok(text)
}

/// The 33 token kinds of Core.
///
/// [`TokenKind::code`] gives each kind the number the classic Core tokenizer
/// printed: keywords 1–11, symbols 12–30, then integer, identifier and end of
/// stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `program`
    Program,
    /// `begin`
    Begin,
    /// `end`
    End,
    /// `int`
    Int,
    /// `if`
    If,
    /// `then`
    Then,
    /// `else`
    Else,
    /// `while`
    While,
    /// `loop`
    Loop,
    /// `read`
    Read,
    /// `write`
    Write,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `=`
    Assign,
    /// `!`
    Bang,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `!=`
    BangEqual,
    /// `==`
    EqualEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// Integer literal.
    Integer,
    /// Identifier.
    Identifier,
    /// End of the token stream.
    Eof,
}

impl TokenKind {
    /// Every kind, in code order.
    pub const ALL: [Self; 33] = [Self::Program,
                                 Self::Begin,
                                 Self::End,
                                 Self::Int,
                                 Self::If,
                                 Self::Then,
                                 Self::Else,
                                 Self::While,
                                 Self::Loop,
                                 Self::Read,
                                 Self::Write,
                                 Self::Semicolon,
                                 Self::Comma,
                                 Self::Assign,
                                 Self::Bang,
                                 Self::LBracket,
                                 Self::RBracket,
                                 Self::AndAnd,
                                 Self::OrOr,
                                 Self::LParen,
                                 Self::RParen,
                                 Self::Plus,
                                 Self::Minus,
                                 Self::Star,
                                 Self::BangEqual,
                                 Self::EqualEqual,
                                 Self::Less,
                                 Self::Greater,
                                 Self::LessEqual,
                                 Self::GreaterEqual,
                                 Self::Integer,
                                 Self::Identifier,
                                 Self::Eof];

    /// Returns the numeric code of the kind, from 1 to 33.
    ///
    /// # Example
    /// ```
    /// use core_interp::interpreter::lexer::TokenKind;
    ///
    /// assert_eq!(TokenKind::Program.code(), 1);
    /// assert_eq!(TokenKind::Semicolon.code(), 12);
    /// assert_eq!(TokenKind::Eof.code(), 33);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn code(self) -> u8 {
        self as u8 + 1
    }

    /// Returns `true` for the eleven keywords.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        self.code() <= Self::Write.code()
    }

    /// Returns `true` if a statement can start with this kind.
    #[must_use]
    pub const fn starts_statement(self) -> bool {
        matches!(self, Self::Identifier | Self::If | Self::While | Self::Read | Self::Write)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{self:?}"))
    }
}

impl From<&Token> for TokenKind {
    fn from(token: &Token) -> Self {
        match token {
            Token::Program => Self::Program,
            Token::Begin => Self::Begin,
            Token::End => Self::End,
            Token::Int => Self::Int,
            Token::If => Self::If,
            Token::Then => Self::Then,
            Token::Else => Self::Else,
            Token::While => Self::While,
            Token::Loop => Self::Loop,
            Token::Read => Self::Read,
            Token::Write => Self::Write,
            Token::Semicolon => Self::Semicolon,
            Token::Comma => Self::Comma,
            Token::Assign => Self::Assign,
            Token::Bang => Self::Bang,
            Token::LBracket => Self::LBracket,
            Token::RBracket => Self::RBracket,
            Token::AndAnd => Self::AndAnd,
            Token::OrOr => Self::OrOr,
            Token::LParen => Self::LParen,
            Token::RParen => Self::RParen,
            Token::Plus => Self::Plus,
            Token::Minus => Self::Minus,
            Token::Star => Self::Star,
            Token::BangEqual => Self::BangEqual,
            Token::EqualEqual => Self::EqualEqual,
            Token::Less => Self::Less,
            Token::Greater => Self::Greater,
            Token::LessEqual => Self::LessEqual,
            Token::GreaterEqual => Self::GreaterEqual,
            Token::Integer(_) => Self::Integer,
            Token::Identifier(_) => Self::Identifier,
            Token::UnknownWord | Token::NewLine => Self::Eof,
        }
    }
}

/// One token handed to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    /// The kind of token.
    pub kind:  TokenKind,
    /// The source text of the token, or `EOF` at end of stream.
    pub text:  String,
    /// The value of an integer literal.
    pub value: Option<i64>,
    /// The name of an identifier.
    pub name:  Option<String>,
    /// The line the token starts on.
    pub line:  usize,
}

impl Lexeme {
    fn eof(line: usize) -> Self {
        Self { kind: TokenKind::Eof,
               text: "EOF".to_string(),
               value: None,
               name: None,
               line }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}')", self.kind, self.text)
    }
}

/// Pull-based tokenizer with one token of lookahead.
///
/// The first token is scanned on construction. [`Lexer::current`] peeks at
/// it; [`Lexer::advance`] scans the next one. Once the end of the source is
/// reached the lexer keeps returning the same end-of-stream token.
///
/// # Example
/// ```
/// use core_interp::interpreter::lexer::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("int X1;").unwrap();
/// assert_eq!(lexer.current().kind, TokenKind::Int);
/// lexer.advance().unwrap();
/// assert_eq!(lexer.identifier_name(), Some("X1"));
/// lexer.advance().unwrap();
/// lexer.advance().unwrap();
/// assert_eq!(lexer.current().kind, TokenKind::Eof);
/// lexer.advance().unwrap();
/// assert_eq!(lexer.current().kind, TokenKind::Eof);
/// ```
pub struct Lexer<'src> {
    inner:     logos::Lexer<'src, Token>,
    current:   Lexeme,
    exhausted: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over `source` and scans the first token.
    ///
    /// # Errors
    /// Returns a lexical [`ParseError`] if the first token is invalid.
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let mut inner = Token::lexer(source);
        let current = Self::scan(&mut inner)?;
        Ok(Self { inner,
                  current,
                  exhausted: false })
    }

    /// Returns the token at the cursor without consuming it.
    #[must_use]
    pub const fn current(&self) -> &Lexeme {
        &self.current
    }

    /// Consumes the current token. Does nothing at end of stream.
    ///
    /// # Errors
    /// Returns a lexical [`ParseError`] if the next token is invalid.
    pub fn advance(&mut self) -> ParseResult<()> {
        if self.current.kind != TokenKind::Eof {
            self.current = Self::scan(&mut self.inner)?;
        }
        Ok(())
    }

    /// Returns the value of the current token if it is an integer literal.
    #[must_use]
    pub const fn literal_value(&self) -> Option<i64> {
        self.current.value
    }

    /// Returns the name of the current token if it is an identifier.
    #[must_use]
    pub fn identifier_name(&self) -> Option<&str> {
        self.current.name.as_deref()
    }

    fn scan(inner: &mut logos::Lexer<'src, Token>) -> ParseResult<Lexeme> {
        let Some(result) = inner.next() else {
            trace!(line = inner.extras.line, "end of stream");
            return Ok(Lexeme::eof(inner.extras.line));
        };
        let line = inner.extras.line;
        let text = inner.slice();
        let token = result.map_err(|kind| ParseError::from_lex(kind, text, line))?;
        let kind = TokenKind::from(&token);
        trace!(%kind, text, line, "token");

        let (value, name) = match token {
            Token::Integer(value) => (Some(value), None),
            Token::Identifier(name) => (None, Some(name)),
            _ => (None, None),
        };
        Ok(Lexeme { kind,
                    text: text.to_string(),
                    value,
                    name,
                    line })
    }
}

impl Iterator for Lexer<'_> {
    type Item = ParseResult<Lexeme>;

    /// Yields every token up to and including the end-of-stream token, then
    /// stops. A lexical error is yielded once and ends the iteration.
    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let token = self.current.clone();
        if token.kind == TokenKind::Eof {
            self.exhausted = true;
            return Some(Ok(token));
        }
        if let Err(e) = self.advance() {
            self.exhausted = true;
            return Some(Err(e));
        }
        Some(Ok(token))
    }
}
