use tracing::debug;

use crate::{Node, Op};

use super::error::ParseError;
use super::lexer::{Token, TokenKind};
use super::options::ParseOptions;

/// Cursor over a token slice. Tokens are consumed strictly left to right.
struct TokenStream<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    /// Groups currently open.
    depth: usize,
    options: &'t ParseOptions,
}

impl<'t, 'a> TokenStream<'t, 'a> {
    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Byte offset just past the last token.
    fn end_offset(&self) -> usize {
        self.tokens
            .last()
            .map_or(0, |t| t.offset + t.text.len())
    }

    fn unexpected_end(&self) -> ParseError {
        ParseError::UnexpectedEnd {
            position: self.pos,
            offset: self.end_offset(),
        }
    }
}

// -- Expressions (AND and OR share one level, folded left to right) ---------

fn expression(stream: &mut TokenStream<'_, '_>) -> Result<Node, ParseError> {
    let mut left = term(stream)?;
    while let Some(op) = stream
        .peek()
        .filter(|t| t.kind == TokenKind::Logical)
        .and_then(|t| Op::from_symbol(t.text))
    {
        stream.advance();
        let right = term(stream)?;
        left = Node::operator(op, left, right);
    }
    Ok(left)
}

fn term(stream: &mut TokenStream<'_, '_>) -> Result<Node, ParseError> {
    let position = stream.pos;
    let token = stream.advance().ok_or_else(|| stream.unexpected_end())?;

    if token.kind == TokenKind::OpenParen {
        if stream.depth >= stream.options.max_nesting() {
            return Err(ParseError::NestingTooDeep {
                limit: stream.options.max_nesting(),
                position,
                offset: token.offset,
            });
        }
        stream.depth += 1;
        let inner = expression(stream)?;
        stream.depth -= 1;
        match stream.peek() {
            Some(t) if t.kind == TokenKind::CloseParen => {
                stream.advance();
            }
            _ if stream.options.requires_closing_paren() => {
                return Err(ParseError::UnclosedGroup {
                    position,
                    offset: token.offset,
                });
            }
            _ => debug!(offset = token.offset, "tolerating unclosed '('"),
        }
        return Ok(inner);
    }

    condition(stream, token, position)
}

/// `name <op> value`, where `name` has already been consumed.
fn condition(
    stream: &mut TokenStream<'_, '_>,
    name: &Token<'_>,
    position: usize,
) -> Result<Node, ParseError> {
    let malformed = || ParseError::MalformedTerm {
        term: name.text.to_owned(),
        position,
        offset: name.offset,
    };

    let op = stream
        .peek()
        .filter(|t| t.kind == TokenKind::Comparison)
        .and_then(|t| Op::comparison_from_symbol(t.text))
        .ok_or_else(malformed)?;
    if stream.tokens.len() < stream.pos + 2 {
        return Err(malformed());
    }
    stream.advance();
    let value = stream.advance().ok_or_else(malformed)?;

    Ok(Node::operator(
        op,
        Node::operand(name.text),
        Node::operand(strip_quotes(value.text)),
    ))
}

/// Remove one pair of surrounding single quotes, if present. A lone `'`
/// counts as both and leaves the empty string.
fn strip_quotes(text: &str) -> &str {
    text.strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\'').or(rest.is_empty().then_some(rest)))
        .unwrap_or(text)
}

// -- Top level ----------------------------------------------------------------

pub fn parse_tokens(tokens: &[Token<'_>], options: &ParseOptions) -> Result<Node, ParseError> {
    let mut stream = TokenStream {
        tokens,
        pos: 0,
        depth: 0,
        options,
    };
    let node = expression(&mut stream)?;

    if let Some(extra) = stream.peek() {
        if options.rejects_trailing_tokens() {
            return Err(ParseError::TrailingInput {
                token: extra.text.to_owned(),
                position: stream.pos,
                offset: extra.offset,
            });
        }
        debug!(
            skipped = tokens.len() - stream.pos,
            offset = extra.offset,
            "ignoring trailing tokens"
        );
    }

    Ok(node)
}
