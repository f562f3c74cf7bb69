//! Read product rows from an Excel workbook
//!
//! The first sheet is used; its first row is the header. Headers are matched
//! against the documented column names after trimming and lower-casing, so
//! column order in the file does not matter.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};

use crate::import::ProductRow;

/// Decode a workbook into product rows
pub fn read_product_rows(path: &Path) -> Result<Vec<ProductRow>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .context("Excel file has no sheets")?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header
        .iter()
        .map(|cell| cell_text(cell).trim().to_lowercase())
        .collect();

    let mut products = Vec::new();
    for row in rows {
        // Skip fully empty rows
        if row.iter().all(|cell| cell_text(cell).trim().is_empty()) {
            continue;
        }
        let mut product = ProductRow::default();
        for (idx, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let text = row.get(idx).map(cell_text).unwrap_or_default();
            product.set(header, &text);
        }
        products.push(product);
    }
    Ok(products)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Render whole numbers without the trailing .0
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
