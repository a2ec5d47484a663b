//! Token types shared by the scanner and the parser.

use std::fmt;

use super::error::ScanError;

/// A token produced by a [`TokenSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub pos: Position,
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Literal template content outside of tags.
    Text,
    /// The identifier right after `{%`, e.g. `func` or `s`.
    TagName,
    /// Everything after the tag name up to `%}`, trimmed.
    TagContents,
}

/// 1-based line/column of a token's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, pos: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            pos,
        }
    }
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Text => "Text",
            TokenKind::TagName => "TagName",
            TokenKind::TagContents => "TagContents",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} at {}", self.kind, self.value, self.pos)
    }
}

/// A pull-based, non-rewindable stream of tokens.
///
/// `advance` moves to the next token and reports whether one is available.
/// Once it returns `false` the stream is exhausted; `last_error` then tells
/// whether it ended cleanly or because of a scan failure.
pub trait TokenSource {
    fn advance(&mut self) -> bool;

    /// The token most recently yielded by `advance`.
    fn current(&self) -> Option<&Token>;

    fn last_error(&self) -> Option<&ScanError>;
}

/// A token source over pre-built tokens. Used to drive the parser without
/// going through the scanner.
#[derive(Debug, Clone, Default)]
pub struct TokenList {
    tokens: std::vec::IntoIter<Token>,
    current: Option<Token>,
    error: Option<ScanError>,
}

impl TokenList {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            current: None,
            error: None,
        }
    }

    /// Make the source report `error` once its tokens run out.
    pub fn with_error(mut self, error: ScanError) -> Self {
        self.error = Some(error);
        self
    }
}

impl TokenSource for TokenList {
    fn advance(&mut self) -> bool {
        self.current = self.tokens.next();
        self.current.is_some()
    }

    fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    fn last_error(&self) -> Option<&ScanError> {
        if self.current.is_none() {
            self.error.as_ref()
        } else {
            None
        }
    }
}
