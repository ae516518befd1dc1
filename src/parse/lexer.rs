use winnow::combinator::{alt, delimited, not, terminated};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{any, one_of, take_till, take_while};

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    /// `AND` or `OR`.
    Logical,
    /// One of `<=`, `>=`, `==`, `<`, `>`, `=`.
    Comparison,
    /// A run of word characters: an identifier or a number.
    Word,
    /// A single-quoted literal, quotes included.
    Quoted,
    /// Any other single non-whitespace character.
    Symbol,
}

/// One lexical unit, borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the token in the source text.
    pub offset: usize,
}

impl<'a> Token<'a> {
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.text
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// -- Token rules, in priority order -----------------------------------------

fn keyword<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    terminated(alt(("AND", "OR")), not(one_of(is_word_char))).parse_next(input)
}

fn comparison<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt(("<=", ">=", "==", "<", ">", "=")).parse_next(input)
}

fn quoted<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited('\'', take_till(0.., '\''), '\'')
        .take()
        .parse_next(input)
}

fn symbol<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    any.verify(|c: &char| !c.is_whitespace())
        .take()
        .parse_next(input)
}

fn token<'i>(input: &mut &'i str) -> ModalResult<(TokenKind, &'i str)> {
    alt((
        "(".map(|s| (TokenKind::OpenParen, s)),
        ")".map(|s| (TokenKind::CloseParen, s)),
        keyword.map(|s| (TokenKind::Logical, s)),
        comparison.map(|s| (TokenKind::Comparison, s)),
        take_while(1.., is_word_char).map(|s| (TokenKind::Word, s)),
        quoted.map(|s| (TokenKind::Quoted, s)),
        symbol.map(|s| (TokenKind::Symbol, s)),
    ))
    .parse_next(input)
}

/// Split rule text into tokens.
///
/// Never fails: any character that starts no other token becomes a one-character
/// [`TokenKind::Symbol`], leaving rejection to the parser. Whitespace only
/// separates tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut input = text;
    let mut tokens = Vec::new();
    loop {
        input = input.trim_start();
        if input.is_empty() {
            break;
        }
        let offset = text.len() - input.len();
        let Ok((kind, slice)) = token.parse_next(&mut input) else {
            break;
        };
        tokens.push(Token {
            kind,
            text: slice,
            offset,
        });
    }
    tokens
}
