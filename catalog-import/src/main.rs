//! catalog-import: reconcile spreadsheet product data against a product catalog

mod catalog;
mod cli;
mod excel;
mod import;

use anyhow::Result;
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    cli::run(cli)
}
