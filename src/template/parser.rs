//! Template parser.
//!
//! Pulls tokens from a [`TokenSource`] and writes Go code straight to the
//! sink; there is no intermediate tree. At the top level only `code` and
//! `func` tags are accepted and text is dropped. Inside a `func` block,
//! text and the `s`, `d`, `f`, `code` tags are emitted until `endfunc`.

use std::fmt::Write;

use log::debug;

use super::emit::{self, Target};
use super::error::{BlockContext, CompileError, Expected};
use super::signature::Signature;
use super::token::{Position, Token, TokenKind, TokenSource};

pub struct Parser<'a, S, W> {
    source: &'a mut S,
    out: &'a mut W,
    target: &'a Target,
    last_pos: Position,
}

impl<'a, S: TokenSource, W: Write> Parser<'a, S, W> {
    pub fn new(source: &'a mut S, out: &'a mut W, target: &'a Target) -> Self {
        Self {
            source,
            out,
            target,
            last_pos: Position::new(1, 1),
        }
    }

    /// Consume the whole token stream.
    pub fn parse(&mut self) -> Result<(), CompileError> {
        while let Some(t) = self.next_token() {
            match t.kind {
                TokenKind::Text => {}
                TokenKind::TagName => match t.value.as_str() {
                    "code" => self.parse_code(BlockContext::TopLevel)?,
                    "func" => self.parse_func()?,
                    _ => return Err(unexpected_tag(&t, BlockContext::TopLevel)),
                },
                TokenKind::TagContents => {
                    return Err(CompileError::UnexpectedToken {
                        found: t.kind,
                        value: t.value,
                        expected: Expected::TextOrTag,
                        context: BlockContext::TopLevel,
                        pos: t.pos,
                    });
                }
            }
        }
        self.check_source()
    }

    /// Parse one `func ... endfunc` block. The `func` tag name has already
    /// been consumed.
    fn parse_func(&mut self) -> Result<(), CompileError> {
        let head = self.expect_contents(BlockContext::TopLevel)?;
        let sig = Signature::split(&head.value).map_err(|source| CompileError::Signature {
            source,
            pos: head.pos,
        })?;
        debug!("func {} at {}", sig.name, head.pos);

        emit::func_start(self.out, self.target, &sig)?;
        while let Some(t) = self.next_token() {
            match t.kind {
                TokenKind::Text => emit::text(self.out, &t.value)?,
                TokenKind::TagName => match t.value.as_str() {
                    "endfunc" => {
                        self.expect_contents(BlockContext::Func)?;
                        emit::func_end(self.out, self.target, &sig)?;
                        return Ok(());
                    }
                    "s" => {
                        let c = self.expect_contents(BlockContext::Func)?;
                        emit::string(self.out, &c.value)?;
                    }
                    "d" => {
                        let c = self.expect_contents(BlockContext::Func)?;
                        emit::decimal(self.out, &c.value)?;
                    }
                    "f" => {
                        let c = self.expect_contents(BlockContext::Func)?;
                        emit::float(self.out, &c.value)?;
                    }
                    "code" => self.parse_code(BlockContext::Func)?,
                    _ => return Err(unexpected_tag(&t, BlockContext::Func)),
                },
                TokenKind::TagContents => {
                    return Err(CompileError::UnexpectedToken {
                        found: t.kind,
                        value: t.value,
                        expected: Expected::TextOrTag,
                        context: BlockContext::Func,
                        pos: t.pos,
                    });
                }
            }
        }

        self.check_source()?;
        Err(CompileError::UnclosedFunc {
            name: sig.name,
            pos: head.pos,
        })
    }

    fn parse_code(&mut self, context: BlockContext) -> Result<(), CompileError> {
        let t = self.expect_contents(context)?;
        emit::code(self.out, &t.value)?;
        Ok(())
    }

    // --- Utility methods ---

    fn next_token(&mut self) -> Option<Token> {
        if !self.source.advance() {
            return None;
        }
        let t = self.source.current().cloned()?;
        self.last_pos = t.pos;
        Some(t)
    }

    fn expect_contents(&mut self, context: BlockContext) -> Result<Token, CompileError> {
        let after = self.last_pos;
        let Some(t) = self.next_token() else {
            self.check_source()?;
            return Err(CompileError::MissingToken {
                expected: TokenKind::TagContents,
                after,
            });
        };
        if t.kind != TokenKind::TagContents {
            return Err(CompileError::UnexpectedToken {
                found: t.kind,
                value: t.value,
                expected: Expected::Token(TokenKind::TagContents),
                context,
                pos: t.pos,
            });
        }
        Ok(t)
    }

    fn check_source(&self) -> Result<(), CompileError> {
        match self.source.last_error() {
            Some(e) => Err(e.clone().into()),
            None => Ok(()),
        }
    }
}

fn unexpected_tag(t: &Token, context: BlockContext) -> CompileError {
    CompileError::UnexpectedTag {
        tag: t.value.clone(),
        context,
        pos: t.pos,
    }
}
