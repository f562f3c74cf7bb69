//! Stock sync, variant cleanup and list price recompute
//!
//! Stock only applies to untracked consumables; tracked products receive
//! their quantities through lot/serial receipt elsewhere. Cleanup deletes
//! variants outside the wanted set but never empties a template.

use anyhow::Result;
use log::{error, info};

use crate::catalog::{ProductCatalog, Template, Tracking};

/// Set the on-hand quantity of a variant, when applicable
///
/// Failures from the stock-adjustment mechanism are logged and swallowed;
/// they never abort the import.
pub fn sync_stock(
    repo: &mut dyn ProductCatalog,
    template: &Template,
    variant_id: i64,
    quantity: f64,
) {
    if !template.product_type.eq_ignore_ascii_case("consu") {
        info!(
            "product '{}' is not consumable; skipping stock update",
            template.name
        );
        return;
    }
    if template.tracking != Tracking::None {
        info!(
            "product '{}' is tracked by '{}'; skipping stock update",
            template.name, template.tracking
        );
        return;
    }
    if let Err(err) = repo.adjust_stock(variant_id, quantity) {
        error!(
            "error updating stock for variant {} of '{}': {:#}",
            variant_id, template.name, err
        );
    } else {
        info!(
            "updated stock for variant {} of '{}' to {}",
            variant_id, template.name, quantity
        );
    }
}

/// Delete variants whose combination identity is not in the wanted set
///
/// Deletion only happens when the template currently has more than one
/// variant and at least one would remain afterward; otherwise nothing is
/// removed. Returns the number of deleted variants.
pub fn clean_up_variants(
    repo: &mut dyn ProductCatalog,
    template: &Template,
    wanted_combinations: &[String],
) -> Result<usize> {
    let existing = repo.template_variants(template.id)?;
    let to_remove: Vec<i64> = existing
        .iter()
        .filter(|v| !wanted_combinations.contains(&v.combination))
        .map(|v| v.id)
        .collect();

    let total = existing.len();
    if total > 1 && total - to_remove.len() >= 1 {
        if to_remove.is_empty() {
            return Ok(0);
        }
        repo.delete_variants(&to_remove)?;
        info!(
            "removed {} unwanted variants from template '{}'",
            to_remove.len(),
            template.name
        );
        Ok(to_remove.len())
    } else {
        info!(
            "skipped variant removal for template '{}' to avoid leaving no variants",
            template.name
        );
        Ok(0)
    }
}

/// Set the template list price to the minimum fixed price over its variants
///
/// No-op for templates without variants.
pub fn recompute_list_price(repo: &mut dyn ProductCatalog, template: &Template) -> Result<()> {
    let variants = repo.template_variants(template.id)?;
    let Some(minimum) = variants.iter().map(|v| v.fix_price).reduce(f64::min) else {
        return Ok(());
    };
    repo.set_template_list_price(template.id, minimum)?;
    info!(
        "set template '{}' list price to minimum variant price {}",
        template.name, minimum
    );
    Ok(())
}
