//! inlay - command-line entry point

use anyhow::Result;
use clap::Parser;

use inlay::cli::{self, CliArgs};

fn main() -> Result<()> {
    inlay::tracing::init();

    let args = CliArgs::parse();
    let output = cli::run(args)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
