//! Command-line interface.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "qtc")]
#[command(version, about = "Compile templates into Go code", long_about = None)]
pub struct Cli {
    /// Directory to search recursively for templates
    #[arg(long, default_value = ".", conflicts_with = "file")]
    pub dir: PathBuf,

    /// Compile a single template instead of a directory
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Template file extension (overrides config)
    #[arg(long)]
    pub ext: Option<String>,

    /// Config file to use instead of ~/.qtc/config.yaml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not prepend the package header to generated files
    #[arg(long)]
    pub no_header: bool,
}

impl Cli {
    /// Resolve the effective config: file config first, then flag overrides.
    pub fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load().unwrap_or_default(),
        };
        if let Some(ext) = &self.ext {
            config.extension = ext.trim_start_matches('.').to_string();
        }
        if self.no_header {
            config.header = false;
        }
        Ok(config)
    }
}
