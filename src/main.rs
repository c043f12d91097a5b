//! `reqx`: extract, review and export requirements from plain-text documents.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
