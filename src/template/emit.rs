//! Go code emitters.
//!
//! Each function appends generated Go source to a [`fmt::Write`] sink. None
//! of them validate the expressions they pass through; invalid Go surfaces
//! only when the generated file is compiled.

use std::fmt::{self, Write};

use super::signature::Signature;

pub const DEFAULT_RUNTIME: &str = "quicktemplate";

/// Characters that cannot appear verbatim in a Go raw string literal.
const RAW_UNSAFE: &[char] = &['`', '\r'];

/// Names the Go package that provides the writer runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub runtime: String,
}

impl Target {
    pub fn new(runtime: impl Into<String>) -> Self {
        Self {
            runtime: runtime.into(),
        }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME)
    }
}

/// Open the streaming routine `<name>Stream`.
pub fn func_start<W: Write>(w: &mut W, target: &Target, sig: &Signature) -> fmt::Result {
    write!(
        w,
        "\nfunc {}Stream(w *{}.Writer, {}) {{\n",
        sig.name, target.runtime, sig.args
    )
}

/// Close the streaming routine and emit the convenience routine returning
/// the rendered text as a string.
pub fn func_end<W: Write>(w: &mut W, target: &Target, sig: &Signature) -> fmt::Result {
    w.write_str("}\n\n")?;
    writeln!(w, "func {}({}) string {{", sig.name, sig.args)?;
    writeln!(w, "\tw := {}.AcquireWriter()", target.runtime)?;
    writeln!(w, "\t{}Stream(w, {})", sig.name, sig.arg_names)?;
    writeln!(w, "\ts := w.String()")?;
    writeln!(w, "\t{}.ReleaseWriter(w)", target.runtime)?;
    writeln!(w, "\treturn s")?;
    writeln!(w, "}}")
}

/// `{% code %}`: passed through verbatim.
pub fn code<W: Write>(w: &mut W, contents: &str) -> fmt::Result {
    writeln!(w, "{contents}")
}

/// `{% s %}`: string output.
pub fn string<W: Write>(w: &mut W, expr: &str) -> fmt::Result {
    writeln!(w, "w.E.S({expr})")
}

/// `{% d %}`: decimal integer output.
pub fn decimal<W: Write>(w: &mut W, expr: &str) -> fmt::Result {
    writeln!(w, "w.D({expr})")
}

/// `{% f %}`: floating point output.
pub fn float<W: Write>(w: &mut W, expr: &str) -> fmt::Result {
    writeln!(w, "w.F({expr})")
}

/// Literal template text.
///
/// Go raw string literals cannot contain a backtick, and the Go compiler
/// drops carriage returns from them. Each backtick and `\r` is therefore
/// written by its own call using an interpreted literal. Empty runs between
/// them are skipped.
pub fn text<W: Write>(w: &mut W, mut text: &str) -> fmt::Result {
    while let Some(n) = text.find(RAW_UNSAFE) {
        raw_run(w, &text[..n])?;
        if text.as_bytes()[n] == b'`' {
            writeln!(w, "w.E.S(\"`\")")?;
        } else {
            writeln!(w, "w.E.S(\"\\r\")")?;
        }
        text = &text[n + 1..];
    }
    raw_run(w, text)
}

fn raw_run<W: Write>(w: &mut W, run: &str) -> fmt::Result {
    if run.is_empty() {
        return Ok(());
    }
    writeln!(w, "w.E.S(`{run}`)")
}
