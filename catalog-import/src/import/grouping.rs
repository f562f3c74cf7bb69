//! Row grouper: partition the flat row sequence into template groups
//!
//! Grouping is a fold over the rows that threads the most recently started
//! group as accumulator state. A repeated template name contributes an extra
//! variant row to its existing group but does not change which group blank
//! `name` rows attach to.

use std::collections::HashMap;

use log::warn;

use super::row::ProductRow;

/// One template-defining row plus its ordered variant rows
#[derive(Debug, Clone)]
pub struct TemplateGroup {
    pub name: String,
    pub template_row: ProductRow,
    /// Variant rows in input order; includes the template row itself (first)
    /// when it carries a variant descriptor
    pub variant_rows: Vec<ProductRow>,
}

impl TemplateGroup {
    /// Whether any row of this group carries a variant descriptor
    pub fn has_variant_data(&self) -> bool {
        self.variant_rows.iter().any(|r| r.has_variant())
    }
}

/// Partition rows into template groups, in first-seen order
///
/// Rows with a blank `name` attach to the most recently started group; a
/// leading blank-name row with no prior group is dropped with a warning. A
/// repeated template name is treated as an extra variant row for its group
/// only when it carries a variant descriptor; otherwise it is ignored.
pub fn group_rows(rows: &[ProductRow]) -> Vec<TemplateGroup> {
    let mut groups: Vec<TemplateGroup> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();
    // Index of the most recently *started* group; repeated names do not move it
    let mut current: Option<usize> = None;

    for row in rows {
        if row.name.is_empty() {
            match current {
                Some(idx) => groups[idx].variant_rows.push(row.clone()),
                None => {
                    warn!("variant row encountered before any template row; skipping");
                }
            }
            continue;
        }

        match index_by_name.get(&row.name) {
            Some(&idx) => {
                if row.has_variant() {
                    groups[idx].variant_rows.push(row.clone());
                }
            }
            None => {
                index_by_name.insert(row.name.clone(), groups.len());
                current = Some(groups.len());
                groups.push(TemplateGroup {
                    name: row.name.clone(),
                    template_row: row.clone(),
                    variant_rows: Vec::new(),
                });
            }
        }
    }

    // The template row can also describe the first variant
    for group in &mut groups {
        if group.template_row.has_variant() {
            group.variant_rows.insert(0, group.template_row.clone());
        }
    }

    groups
}
