//! Preview command: run an import against an in-memory catalog

use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::*;

use crate::catalog::{MemoryCatalog, ProductCatalog};
use crate::excel::read_product_rows;
use crate::import::import_rows;

pub fn run(file: &Path, uoms: &[String]) -> Result<()> {
    let rows = read_product_rows(file)?;
    if rows.is_empty() {
        bail!("No data rows found in {}", file.display());
    }

    let mut catalog = MemoryCatalog::new();
    catalog.add_uom("Unit");
    for name in uoms {
        catalog.add_uom(name);
    }

    let summary = import_rows(&rows, &mut catalog)
        .with_context(|| format!("Import failed for {}", file.display()))?;

    println!("{}", "Import preview".bold());
    println!(
        "  templates: {} created, {} updated",
        summary.templates_created, summary.templates_updated
    );
    println!(
        "  variants:  {} created, {} updated, {} removed",
        summary.variants_created, summary.variants_updated, summary.variants_deleted
    );
    println!();

    for template in catalog.templates().to_vec() {
        println!(
            "{} ({}, tracking: {}, list price: {:.2})",
            template.name.cyan(),
            template.product_type,
            template.tracking,
            template.list_price
        );
        for variant in catalog.template_variants(template.id)? {
            let described = if variant.combination.is_empty() {
                "(no attributes)".dimmed().to_string()
            } else {
                catalog.describe_combination(&variant)
            };
            println!(
                "  - {} | price {:.2} | cost {:.2} | on hand {}",
                described, variant.fix_price, variant.standard_price, variant.on_hand
            );
        }
    }
    Ok(())
}
