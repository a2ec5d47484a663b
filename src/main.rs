//! qtc — template to Go compiler.

use anyhow::Result;
use clap::Parser;
use log::error;

use qtc::cli::Cli;
use qtc::generate;

fn run(cli: &Cli) -> Result<()> {
    let config = cli.config()?;
    match &cli.file {
        Some(path) => {
            generate::compile_file(path, &config)?;
        }
        None => {
            generate::compile_dir(&cli.dir, &config)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
