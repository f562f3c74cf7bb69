//! In-memory catalog backend
//!
//! Backs the CLI preview and the test suite. Ids come from a single shared
//! counter, so template-attribute-value link ids are unique across the whole
//! catalog (combination identities never collide between templates).

use std::collections::HashMap;

use anyhow::{bail, Result};

use super::types::{
    Attribute, AttributeValue, Template, TemplateAttributeValue, TemplateValues, Variant,
    VariantValues,
};
use super::ProductCatalog;

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    next_id: i64,
    uoms: Vec<(i64, String)>,
    attributes: Vec<Attribute>,
    attribute_values: Vec<AttributeValue>,
    template_attribute_values: Vec<TemplateAttributeValue>,
    templates: Vec<Template>,
    variants: Vec<Variant>,
    /// (template id, attribute id) -> value ids on the attribute line
    attribute_lines: HashMap<(i64, i64), Vec<i64>>,
    commits: usize,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit of measure, returning its id (existing id on a
    /// case-insensitive name match)
    pub fn add_uom(&mut self, name: &str) -> i64 {
        if let Some((id, _)) = self
            .uoms
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
        {
            return *id;
        }
        let id = self.allocate_id();
        self.uoms.push((id, name.to_string()));
        id
    }

    /// All templates in creation order
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// All attributes in creation order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Values of one attribute in creation order
    pub fn values_of(&self, attribute_id: i64) -> Vec<&AttributeValue> {
        self.attribute_values
            .iter()
            .filter(|v| v.attribute_id == attribute_id)
            .collect()
    }

    /// Value ids currently attached to a template's attribute line
    pub fn attribute_line(&self, template_id: i64, attribute_id: i64) -> Option<&[i64]> {
        self.attribute_lines
            .get(&(template_id, attribute_id))
            .map(|v| v.as_slice())
    }

    /// Number of checkpoints issued so far
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// Render a variant's combination as "attr: value, ..." for display
    pub fn describe_combination(&self, variant: &Variant) -> String {
        let mut parts = Vec::new();
        for link_id in &variant.attribute_value_ids {
            let Some(link) = self
                .template_attribute_values
                .iter()
                .find(|l| l.id == *link_id)
            else {
                continue;
            };
            let attr = self
                .attributes
                .iter()
                .find(|a| a.id == link.attribute_id)
                .map(|a| a.name.as_str())
                .unwrap_or("?");
            let value = self
                .attribute_values
                .iter()
                .find(|v| v.id == link.value_id)
                .map(|v| v.name.as_str())
                .unwrap_or("?");
            parts.push(format!("{}: {}", attr, value));
        }
        parts.join(", ")
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn template_index(&self, id: i64) -> Result<usize> {
        match self.templates.iter().position(|t| t.id == id) {
            Some(idx) => Ok(idx),
            None => bail!("unknown template id {}", id),
        }
    }
}

impl ProductCatalog for MemoryCatalog {
    fn find_uom(&mut self, name: &str) -> Result<Option<i64>> {
        Ok(self
            .uoms
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id))
    }

    fn find_or_create_attribute(&mut self, name: &str) -> Result<Attribute> {
        if let Some(attr) = self
            .attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            return Ok(attr.clone());
        }
        let attr = Attribute {
            id: self.allocate_id(),
            name: name.to_string(),
        };
        self.attributes.push(attr.clone());
        Ok(attr)
    }

    fn find_or_create_attribute_value(
        &mut self,
        attribute_id: i64,
        name: &str,
    ) -> Result<AttributeValue> {
        if let Some(value) = self
            .attribute_values
            .iter()
            .find(|v| v.attribute_id == attribute_id && v.name.eq_ignore_ascii_case(name))
        {
            return Ok(value.clone());
        }
        let value = AttributeValue {
            id: self.allocate_id(),
            attribute_id,
            name: name.to_string(),
        };
        self.attribute_values.push(value.clone());
        Ok(value)
    }

    fn find_or_create_template_attribute_value(
        &mut self,
        template_id: i64,
        attribute_id: i64,
        value_id: i64,
    ) -> Result<TemplateAttributeValue> {
        if let Some(link) = self
            .template_attribute_values
            .iter()
            .find(|l| l.template_id == template_id && l.value_id == value_id)
        {
            return Ok(link.clone());
        }
        let link = TemplateAttributeValue {
            id: self.allocate_id(),
            template_id,
            attribute_id,
            value_id,
        };
        self.template_attribute_values.push(link.clone());
        Ok(link)
    }

    fn find_template_by_name(&mut self, name: &str) -> Result<Option<Template>> {
        Ok(self
            .templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn get_template(&mut self, id: i64) -> Result<Template> {
        let idx = self.template_index(id)?;
        Ok(self.templates[idx].clone())
    }

    fn create_template(&mut self, values: &TemplateValues) -> Result<Template> {
        let template = Template {
            id: self.allocate_id(),
            name: values.name.clone(),
            product_type: values.product_type.clone(),
            is_storable: values.is_storable,
            tracking: values.tracking,
            lot_valuated: values.lot_valuated,
            list_price: values.list_price.unwrap_or(0.0),
            standard_price: values.standard_price,
            uom_id: values.uom_id,
            purchase_uom_id: values.purchase_uom_id,
            sale_ok: values.sale_ok,
            purchase_ok: values.purchase_ok,
            description: values.description.clone(),
        };
        self.templates.push(template.clone());
        Ok(template)
    }

    fn update_template(&mut self, id: i64, values: &TemplateValues) -> Result<()> {
        let idx = self.template_index(id)?;
        let template = &mut self.templates[idx];
        template.name = values.name.clone();
        template.product_type = values.product_type.clone();
        template.is_storable = values.is_storable;
        template.tracking = values.tracking;
        template.lot_valuated = values.lot_valuated;
        template.standard_price = values.standard_price;
        template.uom_id = values.uom_id;
        template.purchase_uom_id = values.purchase_uom_id;
        template.sale_ok = values.sale_ok;
        template.purchase_ok = values.purchase_ok;
        template.description = values.description.clone();
        if let Some(price) = values.list_price {
            template.list_price = price;
        }
        Ok(())
    }

    fn set_template_list_price(&mut self, id: i64, price: f64) -> Result<()> {
        let idx = self.template_index(id)?;
        self.templates[idx].list_price = price;
        Ok(())
    }

    fn set_attribute_line(
        &mut self,
        template_id: i64,
        attribute_id: i64,
        value_ids: &[i64],
    ) -> Result<()> {
        self.attribute_lines
            .insert((template_id, attribute_id), value_ids.to_vec());
        Ok(())
    }

    fn template_variants(&mut self, template_id: i64) -> Result<Vec<Variant>> {
        Ok(self
            .variants
            .iter()
            .filter(|v| v.template_id == template_id)
            .cloned()
            .collect())
    }

    fn find_matching_variant(
        &mut self,
        template_id: i64,
        combination: &str,
    ) -> Result<Option<Variant>> {
        Ok(self
            .variants
            .iter()
            .find(|v| v.template_id == template_id && v.combination == combination)
            .cloned())
    }

    fn create_variant(&mut self, values: &VariantValues) -> Result<Variant> {
        let variant = Variant {
            id: self.allocate_id(),
            template_id: values.template_id,
            attribute_value_ids: values.attribute_value_ids.clone(),
            combination: values.combination.clone(),
            list_price: values.list_price,
            fix_price: values.fix_price,
            standard_price: values.standard_price.unwrap_or(0.0),
            on_hand: 0.0,
        };
        self.variants.push(variant.clone());
        Ok(variant)
    }

    fn update_variant(&mut self, id: i64, values: &VariantValues) -> Result<()> {
        let Some(variant) = self.variants.iter_mut().find(|v| v.id == id) else {
            bail!("unknown variant id {}", id);
        };
        variant.template_id = values.template_id;
        variant.attribute_value_ids = values.attribute_value_ids.clone();
        variant.combination = values.combination.clone();
        variant.list_price = values.list_price;
        variant.fix_price = values.fix_price;
        if let Some(cost) = values.standard_price {
            variant.standard_price = cost;
        }
        Ok(())
    }

    fn adjust_stock(&mut self, variant_id: i64, quantity: f64) -> Result<()> {
        let Some(variant) = self.variants.iter_mut().find(|v| v.id == variant_id) else {
            bail!("unknown variant id {}", variant_id);
        };
        variant.on_hand = quantity;
        Ok(())
    }

    fn delete_variants(&mut self, ids: &[i64]) -> Result<()> {
        self.variants.retain(|v| !ids.contains(&v.id));
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.commits += 1;
        Ok(())
    }
}
