//! Template compiler — template text → tokens → Go source.

pub mod emit;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod signature;
pub mod token;

pub use emit::Target;
pub use error::{CompileError, ScanError, SignatureError};
pub use signature::Signature;
pub use token::{Position, Token, TokenKind, TokenSource};

use parser::Parser;
use scanner::Scanner;

/// The template compiler.
///
/// Each call runs a fresh scanner and parser, so independent templates can
/// be translated concurrently.
pub struct Compiler;

impl Compiler {
    /// Translate template text into Go code using the default runtime.
    pub fn translate(source: &str) -> Result<String, CompileError> {
        Self::translate_with(source, &Target::default())
    }

    /// Translate template text into Go code for the given runtime target.
    ///
    /// On error no partial output is returned.
    pub fn translate_with(source: &str, target: &Target) -> Result<String, CompileError> {
        let mut scanner = Scanner::new(source);
        let mut out = String::new();
        Self::translate_tokens(&mut scanner, &mut out, target)?;
        Ok(out)
    }

    /// Drive the parser over an arbitrary token source, appending to `out`.
    ///
    /// On error `out` holds partial output which the caller must discard.
    pub fn translate_tokens<S, W>(
        source: &mut S,
        out: &mut W,
        target: &Target,
    ) -> Result<(), CompileError>
    where
        S: TokenSource,
        W: std::fmt::Write,
    {
        Parser::new(source, out, target).parse()
    }
}
