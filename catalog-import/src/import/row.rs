//! Decoded spreadsheet row
//!
//! The column set is fixed and named; rows are decoded into a fixed-field
//! record instead of a per-row map. Cells are normalized exactly once here:
//! trimmed, with blank cells collapsed to `None`. Everywhere downstream,
//! `Some` means "present and non-blank".

/// Column names of the import table, as they appear in the header row
/// (matched after trimming and lower-casing)
pub mod columns {
    pub const NAME: &str = "name";
    pub const VARIANT: &str = "variant";
    pub const UOM: &str = "uom";
    pub const PURCHASE_UOM: &str = "purchase uom";
    pub const TYPE: &str = "type";
    pub const IS_TRACKED: &str = "is tracked";
    pub const TRACKED_BY: &str = "tracked by";
    pub const IS_STORABLE: &str = "is storable";
    pub const IS_SALEABLE: &str = "is saleable";
    pub const IS_PURCHASABLE: &str = "is purchasable";
    pub const INTERNAL_NOTES: &str = "internal notes";
    pub const SALE_PRICE: &str = "sale price";
    pub const COST_PRICE: &str = "cost price";
    pub const STOCK_QUANTITY: &str = "stock quantity";

    /// All columns in sample-workbook order
    pub const ALL: [&str; 14] = [
        NAME,
        VARIANT,
        UOM,
        PURCHASE_UOM,
        TYPE,
        IS_TRACKED,
        TRACKED_BY,
        IS_STORABLE,
        IS_SALEABLE,
        IS_PURCHASABLE,
        INTERNAL_NOTES,
        SALE_PRICE,
        COST_PRICE,
        STOCK_QUANTITY,
    ];
}

/// One row of the import table
///
/// A row either defines a product template (non-blank `name`) or describes a
/// variant of the most recently defined template (blank `name`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRow {
    /// Template name; empty for variant continuation rows
    pub name: String,
    /// Variant descriptor, e.g. `color:red,size:m`
    pub variant: Option<String>,
    pub uom: Option<String>,
    pub purchase_uom: Option<String>,
    pub product_type: Option<String>,
    pub is_tracked: Option<String>,
    pub tracked_by: Option<String>,
    pub is_storable: Option<String>,
    pub is_saleable: Option<String>,
    pub is_purchasable: Option<String>,
    pub internal_notes: Option<String>,
    pub sale_price: Option<String>,
    pub cost_price: Option<String>,
    pub stock_quantity: Option<String>,
}

impl ProductRow {
    /// Assign a raw cell to the field named by `column` (already lower-cased).
    /// Unknown columns are ignored.
    pub fn set(&mut self, column: &str, raw: &str) {
        match column {
            columns::NAME => self.name = raw.trim().to_string(),
            columns::VARIANT => self.variant = clean(raw),
            columns::UOM => self.uom = clean(raw),
            columns::PURCHASE_UOM => self.purchase_uom = clean(raw),
            columns::TYPE => self.product_type = clean(raw),
            columns::IS_TRACKED => self.is_tracked = clean(raw),
            columns::TRACKED_BY => self.tracked_by = clean(raw),
            columns::IS_STORABLE => self.is_storable = clean(raw),
            columns::IS_SALEABLE => self.is_saleable = clean(raw),
            columns::IS_PURCHASABLE => self.is_purchasable = clean(raw),
            columns::INTERNAL_NOTES => self.internal_notes = clean(raw),
            columns::SALE_PRICE => self.sale_price = clean(raw),
            columns::COST_PRICE => self.cost_price = clean(raw),
            columns::STOCK_QUANTITY => self.stock_quantity = clean(raw),
            _ => {}
        }
    }

    /// Whether this row carries a variant descriptor
    pub fn has_variant(&self) -> bool {
        self.variant.is_some()
    }
}

/// Trim a raw cell; blank cells become `None`
fn clean(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_trims_and_drops_blank_cells() {
        let mut row = ProductRow::default();
        row.set(columns::NAME, "  Shirt  ");
        row.set(columns::VARIANT, "   ");
        row.set(columns::SALE_PRICE, " 100 ");
        assert_eq!(row.name, "Shirt");
        assert_eq!(row.variant, None);
        assert_eq!(row.sale_price.as_deref(), Some("100"));
    }

    #[test]
    fn set_ignores_unknown_columns() {
        let mut row = ProductRow::default();
        row.set("barcode", "12345");
        assert_eq!(row, ProductRow::default());
    }
}
