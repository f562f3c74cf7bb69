//! Template and variant reconciliation
//!
//! Upserts the template entity from the defining row's derived fields, then
//! matches each variant row to an existing variant by combination identity
//! (update in place) or creates a new one.

use log::{info, warn};

use crate::catalog::{
    combination_identity, ProductCatalog, Template, TemplateValues, Tracking, VariantValues,
};

use super::attributes::{parse_descriptor, AttributeMap};
use super::error::{ImportError, ImportResult};
use super::grouping::TemplateGroup;
use super::row::ProductRow;

/// Default unit of measure name when the `uom` cell is blank
const DEFAULT_UOM: &str = "Unit";

/// Default product type when the `type` cell is blank
const DEFAULT_TYPE: &str = "consu";

/// Result of reconciling one variant row
#[derive(Debug)]
pub struct VariantOutcome {
    pub variant_id: i64,
    pub combination: String,
    pub created: bool,
}

/// Create or update the template for a group, by case-insensitive name match
///
/// Returns the freshly read template and whether it was created. The list
/// price is only written when the group has no variant rows, and never on an
/// update to a template that already has more than one variant.
pub fn upsert_template(
    repo: &mut dyn ProductCatalog,
    group: &TemplateGroup,
) -> ImportResult<(Template, bool)> {
    let mut values = derive_template_values(repo, group)?;

    match repo.find_template_by_name(&group.name)? {
        Some(existing) => {
            if repo.template_variants(existing.id)?.len() > 1 {
                values.list_price = None;
            }
            repo.update_template(existing.id, &values)?;
            info!("updated product template '{}'", group.name);
            Ok((repo.get_template(existing.id)?, false))
        }
        None => {
            let template = repo.create_template(&values)?;
            info!("created product template '{}'", group.name);
            Ok((template, true))
        }
    }
}

/// Create or update one variant from a variant row
///
/// Returns `None` for rows without a variant descriptor. Descriptor pairs
/// that cannot be resolved against the synthesized attribute map are skipped
/// with a warning; a descriptor resolving to zero pairs still yields a
/// variant with the empty combination identity.
pub fn upsert_variant(
    repo: &mut dyn ProductCatalog,
    template: &Template,
    row: &ProductRow,
    attributes: &AttributeMap,
) -> ImportResult<Option<VariantOutcome>> {
    let Some(descriptor) = row.variant.as_deref() else {
        return Ok(None);
    };

    // Last value wins when a descriptor repeats an attribute name
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (attr_name, value_name) in parse_descriptor(descriptor) {
        match pairs.iter().position(|(name, _)| *name == attr_name) {
            Some(idx) => pairs[idx].1 = value_name,
            None => pairs.push((attr_name, value_name)),
        }
    }

    let mut link_ids = Vec::new();
    for (attr_name, value_name) in &pairs {
        let Some(value) = attributes
            .get(attr_name)
            .and_then(|values| values.get(value_name))
        else {
            warn!(
                "attribute '{}:{}' not found on template '{}'; skipping pair",
                attr_name, value_name, template.name
            );
            continue;
        };
        let link = repo.find_or_create_template_attribute_value(
            template.id,
            value.attribute_id,
            value.id,
        )?;
        link_ids.push(link.id);
    }

    let combination = combination_identity(&link_ids);
    let existing = repo.find_matching_variant(template.id, &combination)?;

    // A present but unparsable price falls back to the template's current
    // price; an absent cell yields zero.
    let (list_price, fix_price) = match row.sale_price.as_deref() {
        Some(raw) => {
            let price = raw.parse::<f64>().unwrap_or(template.list_price);
            (price, price)
        }
        None => (0.0, 0.0),
    };
    let standard_price = row
        .cost_price
        .as_deref()
        .map(|raw| raw.parse::<f64>().unwrap_or(template.standard_price));

    let values = VariantValues {
        template_id: template.id,
        attribute_value_ids: link_ids,
        combination,
        list_price,
        fix_price,
        standard_price,
    };

    match existing {
        Some(variant) => {
            repo.update_variant(variant.id, &values)?;
            info!(
                "updated variant '{}' of template '{}'",
                descriptor, template.name
            );
            Ok(Some(VariantOutcome {
                variant_id: variant.id,
                combination: values.combination,
                created: false,
            }))
        }
        None => {
            let variant = repo.create_variant(&values)?;
            info!(
                "created variant '{}' of template '{}'",
                descriptor, template.name
            );
            Ok(Some(VariantOutcome {
                variant_id: variant.id,
                combination: values.combination,
                created: true,
            }))
        }
    }
}

/// Derive template fields from the defining row
fn derive_template_values(
    repo: &mut dyn ProductCatalog,
    group: &TemplateGroup,
) -> ImportResult<TemplateValues> {
    let row = &group.template_row;

    let uom_name = row.uom.clone().unwrap_or_else(|| DEFAULT_UOM.to_string());
    let purchase_uom_name = row.purchase_uom.clone().unwrap_or_else(|| uom_name.clone());
    let uom_id = resolve_uom(repo, &uom_name)?;
    let purchase_uom_id = resolve_uom(repo, &purchase_uom_name)?;

    let product_type = row
        .product_type
        .clone()
        .unwrap_or_else(|| DEFAULT_TYPE.to_string());
    let is_tracked = flag(&row.is_tracked, false);
    let tracked_by = row
        .tracked_by
        .as_deref()
        .unwrap_or("")
        .to_lowercase();
    let tracking = tracking_mode(is_tracked, &tracked_by);

    // Tracked non-service products without lot/serial tracking are storable by
    // definition; everything else defers to the cell.
    let is_storable = if !product_type.eq_ignore_ascii_case("service")
        && is_tracked
        && !matches!(tracked_by.as_str(), "lot" | "serial")
    {
        true
    } else {
        flag(&row.is_storable, false)
    };

    Ok(TemplateValues {
        name: group.name.clone(),
        product_type,
        standard_price: parse_number(&row.cost_price).unwrap_or(0.0),
        uom_id,
        purchase_uom_id,
        sale_ok: flag(&row.is_saleable, true),
        purchase_ok: flag(&row.is_purchasable, true),
        description: row.internal_notes.clone().unwrap_or_default(),
        is_storable,
        tracking,
        lot_valuated: tracking.is_lot_or_serial(),
        list_price: if group.variant_rows.is_empty() {
            Some(parse_number(&row.sale_price).unwrap_or(0.0))
        } else {
            None
        },
    })
}

/// Tracking mode from the `is tracked` flag and lower-cased `tracked by` cell
fn tracking_mode(is_tracked: bool, tracked_by: &str) -> Tracking {
    if !is_tracked {
        return Tracking::None;
    }
    match tracked_by {
        "lot" => Tracking::Lot,
        "serial" => Tracking::Serial,
        _ => Tracking::None,
    }
}

fn resolve_uom(repo: &mut dyn ProductCatalog, name: &str) -> ImportResult<i64> {
    match repo.find_uom(name)? {
        Some(id) => Ok(id),
        None => Err(ImportError::UomNotFound {
            name: name.to_string(),
        }),
    }
}

/// Boolean-like cell: lower-cased trimmed text equal to "true"
fn flag(cell: &Option<String>, default: bool) -> bool {
    match cell.as_deref() {
        Some(raw) => raw.eq_ignore_ascii_case("true"),
        None => default,
    }
}

fn parse_number(cell: &Option<String>) -> Option<f64> {
    cell.as_deref().and_then(|raw| raw.parse().ok())
}
