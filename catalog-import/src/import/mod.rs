//! Product template and variant import pipeline
//!
//! Reconciles a decoded spreadsheet row table against a product catalog in
//! four stages: row grouping, attribute synthesis, template/variant
//! reconciliation, and stock/cleanup finalization. The catalog itself stays
//! behind the [`ProductCatalog`](crate::catalog::ProductCatalog) trait.
//!
//! Processing is per template group, with a persistence checkpoint after the
//! template/attribute phase and another after the variant/stock phase. A
//! fatal error aborts the remainder of the run; checkpoints already committed
//! stand.

mod attributes;
mod error;
mod finalize;
mod grouping;
mod reconcile;
mod row;

pub use error::{ImportError, ImportResult};
pub use grouping::{group_rows, TemplateGroup};
pub use row::{columns, ProductRow};

use log::info;

use crate::catalog::{ProductCatalog, VariantValues};

use attributes::setup_template_attributes;
use finalize::{clean_up_variants, recompute_list_price, sync_stock};
use reconcile::{upsert_template, upsert_variant};

/// Counters describing what one import run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub templates_created: usize,
    pub templates_updated: usize,
    pub variants_created: usize,
    pub variants_updated: usize,
    pub variants_deleted: usize,
}

/// Run the full import over a decoded row table
///
/// Returns the summary on success. Fails on the first unresolved unit of
/// measure or uncaught repository error; template groups processed before the
/// failure keep their committed state.
pub fn import_rows(
    rows: &[ProductRow],
    repo: &mut dyn ProductCatalog,
) -> ImportResult<ImportSummary> {
    let groups = group_rows(rows);
    let mut summary = ImportSummary::default();
    for group in &groups {
        process_group(repo, group, &mut summary)?;
    }
    Ok(summary)
}

fn process_group(
    repo: &mut dyn ProductCatalog,
    group: &TemplateGroup,
    summary: &mut ImportSummary,
) -> ImportResult<()> {
    // Phase 1: template and attribute lines
    let (template, created) = upsert_template(repo, group)?;
    if created {
        summary.templates_created += 1;
    } else {
        summary.templates_updated += 1;
    }
    let attributes = setup_template_attributes(repo, template.id, &group.variant_rows)?;
    repo.commit()?;

    // Phase 2: variants and stock, against the freshly committed template
    let template = repo.get_template(template.id)?;
    let mut wanted = Vec::new();
    for row in &group.variant_rows {
        let Some(outcome) = upsert_variant(repo, &template, row, &attributes)? else {
            continue;
        };
        if outcome.created {
            summary.variants_created += 1;
        } else {
            summary.variants_updated += 1;
        }
        if let Some(raw) = row.stock_quantity.as_deref() {
            let quantity = raw.parse().unwrap_or(0.0);
            sync_stock(repo, &template, outcome.variant_id, quantity);
        }
        wanted.push(outcome.combination);
    }

    // Templates without variant rows still get exactly one variant; its
    // fixed price mirrors the template list price so the recompute below
    // leaves the directly-set price alone.
    if group.variant_rows.is_empty() {
        let variant_id = match repo.template_variants(template.id)?.first() {
            Some(variant) => variant.id,
            None => {
                let variant = repo.create_variant(&VariantValues {
                    template_id: template.id,
                    attribute_value_ids: vec![],
                    combination: String::new(),
                    list_price: template.list_price,
                    fix_price: template.list_price,
                    standard_price: None,
                })?;
                summary.variants_created += 1;
                info!("created default variant for template '{}'", group.name);
                variant.id
            }
        };
        if let Some(raw) = group.template_row.stock_quantity.as_deref() {
            let quantity = raw.parse().unwrap_or(0.0);
            sync_stock(repo, &template, variant_id, quantity);
        }
    }
    repo.commit()?;

    // Phase 3: cleanup and list price, on current catalog state
    let template = repo.get_template(template.id)?;
    if group.has_variant_data() {
        summary.variants_deleted += clean_up_variants(repo, &template, &wanted)?;
    } else {
        info!(
            "skipping variant removal for '{}' because no variant data was provided",
            group.name
        );
    }
    recompute_list_price(repo, &template)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;

    fn catalog_with_unit() -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();
        catalog.add_uom("Unit");
        catalog
    }

    fn shirt_row() -> ProductRow {
        ProductRow {
            name: "Shirt".to_string(),
            variant: Some("color:red,size:m".to_string()),
            sale_price: Some("100".to_string()),
            cost_price: Some("50".to_string()),
            stock_quantity: Some("5".to_string()),
            ..ProductRow::default()
        }
    }

    fn continuation_row(descriptor: &str, sale_price: &str) -> ProductRow {
        ProductRow {
            variant: Some(descriptor.to_string()),
            sale_price: Some(sale_price.to_string()),
            ..ProductRow::default()
        }
    }

    #[test]
    fn shirt_scenario_on_an_empty_catalog() {
        let mut catalog = catalog_with_unit();
        let summary = import_rows(&[shirt_row()], &mut catalog).unwrap();

        assert_eq!(summary.templates_created, 1);
        assert_eq!(summary.variants_created, 1);

        let template = catalog.find_template_by_name("Shirt").unwrap().unwrap();
        let attr_names: Vec<_> = catalog
            .attributes()
            .iter()
            .map(|a| a.name.clone())
            .collect();
        assert_eq!(attr_names, ["color", "size"]);

        let variants = catalog.template_variants(template.id).unwrap();
        assert_eq!(variants.len(), 1);
        let variant = &variants[0];
        assert_eq!(variant.list_price, 100.0);
        assert_eq!(variant.fix_price, 100.0);
        assert_eq!(variant.standard_price, 50.0);
        assert_eq!(variant.on_hand, 5.0);
        assert_eq!(variant.attribute_value_ids.len(), 2);

        // Recomputed from the single variant
        let template = catalog.find_template_by_name("Shirt").unwrap().unwrap();
        assert_eq!(template.list_price, 100.0);
    }

    #[test]
    fn blank_name_row_extends_the_same_template() {
        let mut catalog = catalog_with_unit();
        let rows = vec![shirt_row(), continuation_row("color:blue,size:m", "120")];
        let summary = import_rows(&rows, &mut catalog).unwrap();

        assert_eq!(summary.templates_created, 1);
        assert_eq!(summary.variants_created, 2);
        assert_eq!(catalog.templates().len(), 1);

        let template = catalog.find_template_by_name("Shirt").unwrap().unwrap();
        assert_eq!(catalog.template_variants(template.id).unwrap().len(), 2);
        // min(100, 120)
        assert_eq!(template.list_price, 100.0);
    }

    #[test]
    fn importing_twice_is_idempotent() {
        let rows = vec![shirt_row(), continuation_row("color:blue,size:m", "120")];

        let mut catalog = catalog_with_unit();
        import_rows(&rows, &mut catalog).unwrap();
        let summary = import_rows(&rows, &mut catalog).unwrap();

        assert_eq!(summary.templates_created, 0);
        assert_eq!(summary.templates_updated, 1);
        assert_eq!(summary.variants_created, 0);
        assert_eq!(summary.variants_updated, 2);
        assert_eq!(summary.variants_deleted, 0);

        assert_eq!(catalog.templates().len(), 1);
        assert_eq!(catalog.attributes().len(), 2);
        let color = &catalog.attributes()[0];
        assert_eq!(catalog.values_of(color.id).len(), 2);
    }

    #[test]
    fn descriptor_order_does_not_duplicate_variants() {
        let mut catalog = catalog_with_unit();
        import_rows(&[shirt_row()], &mut catalog).unwrap();

        let mut reordered = shirt_row();
        reordered.variant = Some("size:m,color:red".to_string());
        let summary = import_rows(&[reordered], &mut catalog).unwrap();

        assert_eq!(summary.variants_created, 0);
        assert_eq!(summary.variants_updated, 1);
        let template = catalog.find_template_by_name("Shirt").unwrap().unwrap();
        assert_eq!(catalog.template_variants(template.id).unwrap().len(), 1);
    }

    #[test]
    fn dropped_variants_are_cleaned_up_but_never_to_zero() {
        let mut catalog = catalog_with_unit();
        let rows = vec![
            shirt_row(),
            continuation_row("color:blue,size:m", "120"),
            continuation_row("color:green,size:m", "90"),
        ];
        import_rows(&rows, &mut catalog).unwrap();

        // Re-import with only the red variant: the other two are deleted
        let summary = import_rows(&[shirt_row()], &mut catalog).unwrap();
        assert_eq!(summary.variants_deleted, 2);
        let template = catalog.find_template_by_name("Shirt").unwrap().unwrap();
        let variants = catalog.template_variants(template.id).unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(template.list_price, 100.0);
    }

    #[test]
    fn service_template_without_variants_gets_one_default_variant() {
        let mut catalog = catalog_with_unit();
        let rows = vec![ProductRow {
            name: "Assembly".to_string(),
            product_type: Some("service".to_string()),
            sale_price: Some("25".to_string()),
            ..ProductRow::default()
        }];
        let summary = import_rows(&rows, &mut catalog).unwrap();

        assert_eq!(summary.templates_created, 1);
        assert_eq!(summary.variants_created, 1);
        let template = catalog.find_template_by_name("Assembly").unwrap().unwrap();
        assert_eq!(template.product_type, "service");
        // List price set directly from the sale price cell, and the default
        // variant does not drag it to zero on recompute
        assert_eq!(template.list_price, 25.0);
        let variants = catalog.template_variants(template.id).unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].combination, "");

        // Second run keeps the single variant
        let summary = import_rows(&rows, &mut catalog).unwrap();
        assert_eq!(summary.variants_created, 0);
        assert_eq!(catalog.template_variants(template.id).unwrap().len(), 1);
    }

    #[test]
    fn template_stock_applies_to_the_default_variant() {
        let mut catalog = catalog_with_unit();
        let rows = vec![ProductRow {
            name: "Mug".to_string(),
            stock_quantity: Some("7".to_string()),
            ..ProductRow::default()
        }];
        import_rows(&rows, &mut catalog).unwrap();
        let template = catalog.find_template_by_name("Mug").unwrap().unwrap();
        assert_eq!(catalog.template_variants(template.id).unwrap()[0].on_hand, 7.0);
    }

    #[test]
    fn orphan_leading_row_does_not_abort_the_import() {
        let mut catalog = catalog_with_unit();
        let rows = vec![continuation_row("color:red", "10"), shirt_row()];
        let summary = import_rows(&rows, &mut catalog).unwrap();
        assert_eq!(summary.templates_created, 1);
        assert_eq!(summary.variants_created, 1);
    }

    #[test]
    fn unresolved_uom_aborts_after_earlier_groups_committed() {
        let mut catalog = catalog_with_unit();
        let rows = vec![
            shirt_row(),
            ProductRow {
                name: "Flour".to_string(),
                uom: Some("kg".to_string()),
                ..ProductRow::default()
            },
        ];
        let err = import_rows(&rows, &mut catalog).unwrap_err();
        assert!(matches!(err, ImportError::UomNotFound { ref name } if name == "kg"));
        // The first group's work stands
        assert!(catalog.find_template_by_name("Shirt").unwrap().is_some());
        assert_eq!(catalog.commit_count(), 2);
    }

    #[test]
    fn checkpoints_are_issued_per_phase() {
        let mut catalog = catalog_with_unit();
        import_rows(&[shirt_row()], &mut catalog).unwrap();
        assert_eq!(catalog.commit_count(), 2);
    }

    #[test]
    fn pure_template_update_keeps_unrelated_variants() {
        // A repeated import of a template with no variant data must not prune
        // variants created by an earlier import.
        let mut catalog = catalog_with_unit();
        let rows = vec![shirt_row(), continuation_row("color:blue,size:m", "120")];
        import_rows(&rows, &mut catalog).unwrap();

        let plain = ProductRow {
            name: "Shirt".to_string(),
            ..ProductRow::default()
        };
        let summary = import_rows(&[plain], &mut catalog).unwrap();
        assert_eq!(summary.variants_deleted, 0);
        let template = catalog.find_template_by_name("Shirt").unwrap().unwrap();
        assert_eq!(catalog.template_variants(template.id).unwrap().len(), 2);
    }
}
