//! Error types for template translation.

use std::fmt;

use thiserror::Error;

use super::token::{Position, TokenKind};

/// An error that aborted a translation. Whatever was already written to the
/// sink must be discarded by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unexpected tag {tag:?} found {context} at {pos}")]
    UnexpectedTag {
        tag: String,
        context: BlockContext,
        pos: Position,
    },

    #[error("unexpected token {found} {value:?} {context} at {pos}, expecting {expected}")]
    UnexpectedToken {
        found: TokenKind,
        value: String,
        expected: Expected,
        context: BlockContext,
        pos: Position,
    },

    #[error("cannot find token {expected} after {after}: input ended")]
    MissingToken { expected: TokenKind, after: Position },

    #[error("func {name:?} opened at {pos} is never closed with endfunc")]
    UnclosedFunc { name: String, pos: Position },

    #[error("malformed func signature at {pos}")]
    Signature {
        #[source]
        source: SignatureError,
        pos: Position,
    },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("cannot write generated code")]
    Emit(#[from] fmt::Error),
}

/// Where the parser was when it hit an unexpected tag or token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockContext {
    TopLevel,
    Func,
}

/// What the parser would have accepted instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    TextOrTag,
}

/// Failure to split a `func` signature into name and argument list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("missing '(' for function arguments in {0:?}")]
    MissingOpenParen(String),
    #[error("missing ')' for function arguments in {0:?}")]
    MissingCloseParen(String),
}

/// Failure reported by the scanner once it stops yielding tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("tag opened at {pos} is not closed with %}}")]
    UnterminatedTag { pos: Position },
    #[error("invalid tag name at {pos}: {found:?}")]
    InvalidTagName { found: String, pos: Position },
}

impl fmt::Display for BlockContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockContext::TopLevel => f.write_str("outside func"),
            BlockContext::Func => f.write_str("inside func"),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{kind}"),
            Expected::TextOrTag => f.write_str("Text or TagName"),
        }
    }
}

impl CompileError {
    /// Source position the error points at, when it has one.
    pub fn position(&self) -> Option<Position> {
        match self {
            CompileError::UnexpectedTag { pos, .. }
            | CompileError::UnexpectedToken { pos, .. }
            | CompileError::UnclosedFunc { pos, .. }
            | CompileError::Signature { pos, .. } => Some(*pos),
            CompileError::MissingToken { after, .. } => Some(*after),
            CompileError::Scan(e) => Some(e.position()),
            CompileError::Emit(_) => None,
        }
    }
}

impl ScanError {
    pub fn position(&self) -> Position {
        match self {
            ScanError::UnterminatedTag { pos } | ScanError::InvalidTagName { pos, .. } => *pos,
        }
    }
}
