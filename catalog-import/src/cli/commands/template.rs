//! Template command: write the sample workbook

use std::path::Path;

use anyhow::Result;

use crate::excel::write_template_workbook;

pub fn run(output: &Path) -> Result<()> {
    write_template_workbook(output)?;
    println!("Wrote sample workbook to {}", output.display());
    Ok(())
}
