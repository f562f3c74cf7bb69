//! Attribute synthesizer: derive attributes and values from variant descriptors
//!
//! Descriptor grammar: comma-separated `attribute:value` segments. The first
//! colon in a segment separates name from value (extra colons become part of
//! the value); segments without a colon are ignored. Names and values are
//! trimmed and lower-cased.

use std::collections::HashMap;

use anyhow::Result;

use crate::catalog::{AttributeValue, ProductCatalog};

use super::row::ProductRow;

/// Resolved attribute values for one template:
/// attribute name -> value name -> attribute-value entity
pub type AttributeMap = HashMap<String, HashMap<String, AttributeValue>>;

/// Parse a variant descriptor into (attribute, value) pairs, in order
///
/// Duplicate attribute names are kept as separate pairs here; callers that
/// need one value per attribute apply last-wins themselves.
pub fn parse_descriptor(descriptor: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for segment in descriptor.split(',') {
        let Some((name, value)) = segment.split_once(':') else {
            continue;
        };
        pairs.push((
            name.trim().to_lowercase(),
            value.trim().to_lowercase(),
        ));
    }
    pairs
}

/// Ensure attributes, values and attribute lines exist for a template
///
/// Scans all variant rows, get-or-creates every attribute and value seen, and
/// replaces the template's attribute line for each attribute with the full
/// value set (creating lines as needed). Returns the resolved mapping used by
/// the variant reconciler.
pub fn setup_template_attributes(
    repo: &mut dyn ProductCatalog,
    template_id: i64,
    variant_rows: &[ProductRow],
) -> Result<AttributeMap> {
    // Collect attribute -> values in first-seen order so repository calls are
    // deterministic for a given input file.
    let mut order: Vec<(String, Vec<String>)> = Vec::new();
    for row in variant_rows {
        let Some(descriptor) = row.variant.as_deref() else {
            continue;
        };
        for (attr_name, value_name) in parse_descriptor(descriptor) {
            let idx = match order.iter().position(|(name, _)| *name == attr_name) {
                Some(idx) => idx,
                None => {
                    order.push((attr_name, Vec::new()));
                    order.len() - 1
                }
            };
            let values = &mut order[idx].1;
            if !values.contains(&value_name) {
                values.push(value_name);
            }
        }
    }

    let mut map = AttributeMap::new();
    for (attr_name, value_names) in order {
        let attribute = repo.find_or_create_attribute(&attr_name)?;
        let mut value_ids = Vec::new();
        let mut by_value = HashMap::new();
        for value_name in value_names {
            let value = repo.find_or_create_attribute_value(attribute.id, &value_name)?;
            value_ids.push(value.id);
            by_value.insert(value_name, value);
        }
        repo.set_attribute_line(template_id, attribute.id, &value_ids)?;
        map.insert(attr_name, by_value);
    }
    Ok(map)
}
