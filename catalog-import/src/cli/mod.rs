//! Command-line interface

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "catalog-import",
    about = "Import product templates and variants from Excel into a product catalog",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a workbook and run the import against an in-memory catalog
    Preview {
        /// Path to the .xlsx file to import
        #[arg(long)]
        file: PathBuf,
        /// Extra unit-of-measure names to seed the catalog with
        /// (a "Unit" UoM is always present)
        #[arg(long = "uom")]
        uoms: Vec<String>,
    },
    /// Write a sample workbook with the expected columns
    Template {
        /// Output path for the sample .xlsx file
        #[arg(long, default_value = "product-variants.xlsx")]
        output: PathBuf,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Preview { file, uoms } => commands::preview::run(&file, &uoms),
        Commands::Template { output } => commands::template::run(&output),
    }
}
