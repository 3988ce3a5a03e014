use core_interp::{
    error::ParseError,
    interpreter::lexer::{Lexeme, Lexer, TokenKind},
};

fn kinds(src: &str) -> Vec<TokenKind> {
    Lexer::new(src).expect("first token is valid")
                   .map(|token| token.expect("source lexes").kind)
                   .collect()
}

fn lex_error(src: &str) -> ParseError {
    match Lexer::new(src) {
        Err(e) => e,
        Ok(lexer) => lexer.filter_map(Result::err)
                          .next()
                          .unwrap_or_else(|| panic!("{src:?} lexed without error")),
    }
}

#[test]
fn codes_cover_one_to_thirty_three_in_order() {
    for (i, kind) in TokenKind::ALL.iter().enumerate() {
        assert_eq!(usize::from(kind.code()), i + 1, "{kind}");
    }
    assert_eq!(TokenKind::Write.code(), 11);
    assert_eq!(TokenKind::GreaterEqual.code(), 30);
    assert_eq!(TokenKind::Integer.code(), 31);
    assert_eq!(TokenKind::Identifier.code(), 32);
}

#[test]
fn keywords_are_recognized() {
    use TokenKind::*;
    assert_eq!(kinds("program begin end int if then else while loop read write"),
               vec![Program, Begin, End, Int, If, Then, Else, While, Loop, Read, Write, Eof]);
    assert!(Program.is_keyword());
    assert!(!Semicolon.is_keyword());
}

#[test]
fn two_character_symbols_win_over_one_character_symbols() {
    use TokenKind::*;
    assert_eq!(kinds("!= ! == = <= < >= > && || ; , [ ] ( ) + - *"),
               vec![BangEqual, Bang, EqualEqual, Assign, LessEqual, Less, GreaterEqual, Greater,
                    AndAnd, OrOr, Semicolon, Comma, LBracket, RBracket, LParen, RParen, Plus,
                    Minus, Star, Eof]);
    assert_eq!(kinds("!=="), vec![BangEqual, Assign, Eof]);
}

#[test]
fn punctuation_needs_no_whitespace() {
    use TokenKind::*;
    assert_eq!(kinds("A=(B+12)*C;"),
               vec![Identifier, Assign, LParen, Identifier, Plus, Integer, RParen, Star,
                    Identifier, Semicolon, Eof]);
    assert_eq!(kinds("end;"), vec![End, Semicolon, Eof]);
}

#[test]
fn payloads_are_attached() {
    let mut lexer = Lexer::new("X12 = 345;").unwrap();

    assert_eq!(lexer.identifier_name(), Some("X12"));
    assert_eq!(lexer.literal_value(), None);
    lexer.advance().unwrap();
    assert_eq!(lexer.identifier_name(), None);
    lexer.advance().unwrap();
    assert_eq!(lexer.literal_value(), Some(345));
    assert_eq!(lexer.current().text, "345");
}

#[test]
fn end_of_stream_repeats() {
    let mut lexer = Lexer::new("  \n\t ").unwrap();
    let eof = Lexeme { kind:  TokenKind::Eof,
                       text:  "EOF".to_string(),
                       value: None,
                       name:  None,
                       line:  2, };

    assert_eq!(lexer.current(), &eof);
    lexer.advance().unwrap();
    lexer.advance().unwrap();
    assert_eq!(lexer.current(), &eof);
}

#[test]
fn lines_are_counted() {
    let lines: Vec<usize> = Lexer::new("program\nint A;\n\n begin")
        .unwrap()
        .map(|token| token.unwrap().line)
        .collect();

    assert_eq!(lines, vec![1, 2, 2, 2, 4, 4]);
}

#[test]
fn vertical_tab_and_form_feed_are_whitespace() {
    assert_eq!(kinds("int\x0BA\x0C;"),
               vec![TokenKind::Int, TokenKind::Identifier, TokenKind::Semicolon, TokenKind::Eof]);
}

#[test]
fn unknown_lowercase_words_are_invalid_tokens() {
    let err = lex_error("program prog");
    assert_eq!(err.to_string(), "Error on line 1: Invalid token: prog");

    let err = lex_error("programs");
    assert!(matches!(err, ParseError::InvalidToken { ref token, .. } if token == "programs"));
}

#[test]
fn lone_ampersand_and_bar_are_invalid_tokens() {
    assert!(matches!(lex_error("A & B"), ParseError::InvalidToken { ref token, .. } if token == "&"));
    assert!(matches!(lex_error("A | B"), ParseError::InvalidToken { ref token, .. } if token == "|"));
}

#[test]
fn non_ascii_input_is_an_invalid_character() {
    assert!(matches!(lex_error("A = é;"), ParseError::InvalidCharacter { ch: 'é', line: 1 }));
}

#[test]
fn words_must_be_followed_by_a_separator() {
    assert_eq!(lex_error("intA;").to_string(),
               "Error on line 1: Whitespace required after int token.");
    assert_eq!(lex_error("12AB").to_string(),
               "Error on line 1: Whitespace required after 12 token.");
    assert_eq!(lex_error("\nX1y").to_string(),
               "Error on line 2: Whitespace required after X1 token.");
}

#[test]
fn identifiers_are_letters_then_digits() {
    assert!(matches!(lex_error("A1B"), ParseError::InvalidToken { ref token, .. } if token == "A1B"));
    assert_eq!(kinds("ABC123"), vec![TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn oversized_literals_are_rejected() {
    assert!(matches!(lex_error("9223372036854775808"), ParseError::LiteralTooLarge { .. }));
    assert_eq!(kinds("9223372036854775807"), vec![TokenKind::Integer, TokenKind::Eof]);
}
