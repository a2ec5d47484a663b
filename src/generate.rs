//! File pipeline — discovers templates and writes generated Go files next
//! to them.

use std::ffi::OsStr;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::config::Config;
use crate::template::Compiler;

/// Find all templates under `dir` with the given extension, sorted by path.
pub fn discover(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("cannot walk {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension() == Some(OsStr::new(ext)) {
            debug!("found template {}", path.display());
            found.push(path.to_path_buf());
        }
    }
    Ok(found)
}

/// `views/page.qtpl` → `views/page.qtpl.go`.
pub fn output_path(template: &Path) -> PathBuf {
    let mut name = template.as_os_str().to_owned();
    name.push(".go");
    PathBuf::from(name)
}

/// Translate one template file into the full contents of its Go file.
pub fn render_file(path: &Path, config: &Config) -> Result<String> {
    let source =
        std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let body = Compiler::translate_with(&source, &config.target())
        .with_context(|| format!("cannot compile {}", path.display()))?;

    if !config.header {
        return Ok(body);
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let package = package_name(path)?;
    let mut out = String::new();
    writeln!(
        out,
        "// Code generated by qtc from {}. DO NOT EDIT.",
        go_quote(&file_name)
    )?;
    writeln!(out)?;
    writeln!(out, "package {package}")?;
    writeln!(out)?;
    writeln!(out, "import {}", go_quote(&config.runtime_import))?;
    out.push_str(&body);
    Ok(out)
}

/// Compile one template, writing its Go file only if translation succeeds.
pub fn compile_file(path: &Path, config: &Config) -> Result<PathBuf> {
    let code = render_file(path, config)?;
    let out = output_path(path);
    let dir = match out.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = NamedTempFile::new_in(&dir)
        .with_context(|| format!("cannot create temp file in {}", dir.display()))?;
    tmp.write_all(code.as_bytes())?;

    // Temp files are created 0600; give the output the template's mode.
    let permissions = std::fs::metadata(path)
        .with_context(|| format!("cannot stat {}", path.display()))?
        .permissions();
    tmp.as_file()
        .set_permissions(permissions)
        .with_context(|| format!("cannot set permissions on {}", out.display()))?;

    tmp.persist(&out)
        .with_context(|| format!("cannot write {}", out.display()))?;

    info!("generated {}", out.display());
    Ok(out)
}

/// Compile every template under `dir`, stopping at the first failure.
pub fn compile_dir(dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let templates = discover(dir, &config.extension)?;
    if templates.is_empty() {
        info!("no *.{} templates under {}", config.extension, dir.display());
    }
    templates
        .iter()
        .map(|path| compile_file(path, config))
        .collect()
}

/// Go package name for a template: its directory name, with characters
/// that are not valid in identifiers replaced by `_`.
fn package_name(path: &Path) -> Result<String> {
    let abs = std::path::absolute(path)
        .with_context(|| format!("cannot resolve {}", path.display()))?;
    let dir = abs
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "main".to_string());

    let mut name: String = dir
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    Ok(name)
}

/// Quote `s` as a Go interpreted string literal.
fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
