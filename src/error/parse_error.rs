use std::fmt;

use thiserror::Error;

use crate::error::TreeError;

/// Failure kinds raised from inside the `logos` token callbacks.
///
/// The lexer wrapper turns these into a full [`ParseError`] once the offending
/// text and line are known. `InvalidCharacter` is the default because `logos`
/// produces the default error for input that matches no token at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// No token starts with this character.
    #[default]
    #[error("invalid character")]
    InvalidCharacter,
    /// A lowercase word that is not a keyword, or a malformed identifier.
    #[error("invalid token")]
    InvalidToken,
    /// A keyword, integer or identifier directly followed by a letter or digit.
    #[error("whitespace required")]
    WhitespaceRequired,
    /// An integer literal that does not fit in an `i64`.
    #[error("integer literal too large")]
    LiteralTooLarge,
}

/// The construct a parse procedure was looking for when it met the wrong
/// token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// `program`
    Program,
    /// `begin`
    Begin,
    /// `end`
    End,
    /// `then`
    Then,
    /// `else` or `end` after a then-branch.
    ElseOrEnd,
    /// `loop`
    Loop,
    /// `;`
    Semicolon,
    /// `=`
    Assign,
    /// `]`
    CloseBracket,
    /// `)`
    CloseParen,
    /// `&&` or `||`
    LogicalOperator,
    /// An identifier.
    Identifier,
    /// The leading `int` of a declaration.
    Declaration,
    /// The first token of a statement.
    Statement,
    /// The `(` that opens a comparison.
    Comparison,
    /// One of the six comparison operators.
    ComparisonOperator,
    /// An integer literal, identifier or parenthesized expression.
    Operand,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Program => "\"program\"",
            Self::Begin => "\"begin\"",
            Self::End => "\"end\"",
            Self::Then => "\"then\"",
            Self::ElseOrEnd => "\"else\" or \"end\"",
            Self::Loop => "\"loop\"",
            Self::Semicolon => "\";\"",
            Self::Assign => "\"=\"",
            Self::CloseBracket => "\"]\"",
            Self::CloseParen => "\")\"",
            Self::LogicalOperator => "\"&&\" or \"||\"",
            Self::Identifier => "an identifier",
            Self::Declaration => "at least one declaration",
            Self::Statement => "at least one statement",
            Self::Comparison => "a comparison condition",
            Self::ComparisonOperator => "a comparison operator",
            Self::Operand => "an integer, an identifier, or an expression",
        };
        f.write_str(text)
    }
}

/// Represents all errors that can occur during lexing, parsing and static
/// checking.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A character that cannot start any token.
    #[error("Error on line {line}: Invalid character: {ch:?}")]
    InvalidCharacter {
        /// The offending character.
        ch:   char,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A run of characters that is not a valid token.
    #[error("Error on line {line}: Invalid token: {token}")]
    InvalidToken {
        /// The offending text.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A keyword, integer or identifier immediately followed by a letter or
    /// digit.
    #[error("Error on line {line}: Whitespace required after {token} token.")]
    WhitespaceRequired {
        /// The token that needs a separator after it.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An integer literal that does not fit the interpreter's integer type.
    #[error("Error on line {line}: Integer literal too large: {token}")]
    LiteralTooLarge {
        /// The literal text.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The current token does not fit the production being parsed.
    #[error("Error on line {line}: Expecting {expected} at {found}")]
    Unexpected {
        /// What the parser was looking for.
        expected: Expected,
        /// The text of the token found instead.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Something other than end of input follows the final `end`.
    #[error("Error on line {line}: No tokens allowed after program end, found {found}")]
    TrailingTokens {
        /// The text of the first extra token.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A name declared twice.
    #[error("Error on line {line}: Duplicate variable {name}")]
    DuplicateVariable {
        /// The variable name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A name used without a declaration.
    #[error("Error on line {line}: Undeclared variable {name}")]
    UndeclaredVariable {
        /// The variable name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The syntax tree ran out of room while parsing.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl ParseError {
    /// Builds the error for a `logos` failure over `text` on `line`.
    #[must_use]
    pub fn from_lex(kind: LexErrorKind, text: &str, line: usize) -> Self {
        match kind {
            LexErrorKind::InvalidCharacter => match text.chars().next() {
                Some(ch) if ch.is_ascii_punctuation() => Self::InvalidToken { token:
                                                                                  text.to_string(),
                                                                              line },
                Some(ch) => Self::InvalidCharacter { ch, line },
                None => Self::InvalidToken { token: String::new(),
                                             line },
            },
            LexErrorKind::InvalidToken => Self::InvalidToken { token: text.to_string(),
                                                               line },
            LexErrorKind::WhitespaceRequired => {
                Self::WhitespaceRequired { token: text.to_string(),
                                           line }
            },
            LexErrorKind::LiteralTooLarge => Self::LiteralTooLarge { token: text.to_string(),
                                                                     line },
        }
    }

    /// Returns the source line the error points at, if it has one.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidCharacter { line, .. }
            | Self::InvalidToken { line, .. }
            | Self::WhitespaceRequired { line, .. }
            | Self::LiteralTooLarge { line, .. }
            | Self::Unexpected { line, .. }
            | Self::TrailingTokens { line, .. }
            | Self::DuplicateVariable { line, .. }
            | Self::UndeclaredVariable { line, .. } => Some(*line),
            Self::Tree(_) => None,
        }
    }
}
