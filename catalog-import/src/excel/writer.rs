//! Write the sample import workbook

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::import::columns;

/// Example rows demonstrating the expected layout: a variant template with a
/// continuation row, and a plain service product.
const SAMPLE_ROWS: [[&str; 14]; 3] = [
    [
        "Shirt",
        "color:red,size:m",
        "Unit",
        "",
        "consu",
        "false",
        "",
        "true",
        "true",
        "true",
        "Cotton shirt",
        "100",
        "50",
        "5",
    ],
    [
        "",
        "color:blue,size:m",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        "120",
        "55",
        "3",
    ],
    [
        "Assembly",
        "",
        "Unit",
        "",
        "service",
        "",
        "",
        "",
        "true",
        "false",
        "On-site assembly",
        "25",
        "",
        "",
    ],
];

/// Write a sample workbook with the documented header and example rows
pub fn write_template_workbook(path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Products")?;

    let header_format = Format::new().set_bold();
    for (col, name) in columns::ALL.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (row_idx, row) in SAMPLE_ROWS.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet.write_string((row_idx + 1) as u32, col as u16, *value)?;
        }
    }

    worksheet.autofit();
    workbook
        .save(path)
        .with_context(|| format!("Failed to write workbook: {}", path.display()))?;
    Ok(())
}
