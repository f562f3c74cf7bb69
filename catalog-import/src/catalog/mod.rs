//! Product catalog abstraction
//!
//! The import pipeline talks to the catalog through the [`ProductCatalog`]
//! trait. Persistence, search and transactional semantics belong to the
//! backend; the pipeline only asks for lookups, get-or-creates, writes and
//! checkpoints. [`MemoryCatalog`] is the built-in backend used by the CLI
//! preview and the test suite.

mod memory;
mod types;

pub use memory::MemoryCatalog;
pub use types::{
    combination_identity, Attribute, AttributeValue, Template, TemplateAttributeValue,
    TemplateValues, Tracking, Variant, VariantValues,
};

use anyhow::Result;

/// Repository contract the import reconciles against
///
/// All name matching is case-insensitive and exact (no substring search).
/// Lookups return `Ok(None)` for "not found" rather than an error; the caller
/// decides whether a miss is fatal.
pub trait ProductCatalog {
    /// Resolve a unit of measure id by name
    fn find_uom(&mut self, name: &str) -> Result<Option<i64>>;

    /// Look up an attribute by name, creating it if absent
    fn find_or_create_attribute(&mut self, name: &str) -> Result<Attribute>;

    /// Look up a value by name within one attribute, creating it if absent
    fn find_or_create_attribute_value(
        &mut self,
        attribute_id: i64,
        name: &str,
    ) -> Result<AttributeValue>;

    /// Look up the link record for a (template, attribute, value) triple,
    /// creating it if absent
    fn find_or_create_template_attribute_value(
        &mut self,
        template_id: i64,
        attribute_id: i64,
        value_id: i64,
    ) -> Result<TemplateAttributeValue>;

    /// Find a template by name
    fn find_template_by_name(&mut self, name: &str) -> Result<Option<Template>>;

    /// Re-read a template by id; errors when the id is unknown
    fn get_template(&mut self, id: i64) -> Result<Template>;

    fn create_template(&mut self, values: &TemplateValues) -> Result<Template>;

    /// Update a template in place; `values.list_price = None` leaves the
    /// stored list price untouched
    fn update_template(&mut self, id: i64, values: &TemplateValues) -> Result<()>;

    /// Overwrite only the list price of a template
    fn set_template_list_price(&mut self, id: i64, price: f64) -> Result<()>;

    /// Replace the template's value set for one attribute, creating the
    /// attribute line when the template has none for it yet.
    ///
    /// Must not trigger any backend-side automatic variant generation;
    /// variants are created explicitly by the import.
    fn set_attribute_line(
        &mut self,
        template_id: i64,
        attribute_id: i64,
        value_ids: &[i64],
    ) -> Result<()>;

    /// All current variants of a template, in creation order
    fn template_variants(&mut self, template_id: i64) -> Result<Vec<Variant>>;

    /// Find the variant of a template with the given combination identity
    fn find_matching_variant(
        &mut self,
        template_id: i64,
        combination: &str,
    ) -> Result<Option<Variant>>;

    fn create_variant(&mut self, values: &VariantValues) -> Result<Variant>;

    /// Update a variant in place; `values.standard_price = None` leaves the
    /// stored cost untouched
    fn update_variant(&mut self, id: i64, values: &VariantValues) -> Result<()>;

    /// Set the on-hand quantity of a variant
    fn adjust_stock(&mut self, variant_id: i64, quantity: f64) -> Result<()>;

    fn delete_variants(&mut self, ids: &[i64]) -> Result<()>;

    /// Persistence checkpoint; work committed here survives later failures
    fn commit(&mut self) -> Result<()>;
}
