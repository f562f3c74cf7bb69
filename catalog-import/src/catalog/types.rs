//! Catalog entity types shared by the import pipeline and backends

/// How a product's stock movements are tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tracking {
    /// No tracking; on-hand quantity can be set directly
    #[default]
    None,
    /// Tracked by lot number
    Lot,
    /// Tracked by serial number
    Serial,
}

impl Tracking {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tracking::None => "none",
            Tracking::Lot => "lot",
            Tracking::Serial => "serial",
        }
    }

    /// Whether stock for this product moves through lot/serial receipt
    pub fn is_lot_or_serial(&self) -> bool {
        matches!(self, Tracking::Lot | Tracking::Serial)
    }
}

impl std::fmt::Display for Tracking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named axis of variation (e.g. "color")
#[derive(Debug, Clone)]
pub struct Attribute {
    pub id: i64,
    pub name: String,
}

/// One possible setting of an attribute (e.g. "red"), scoped to its attribute
#[derive(Debug, Clone)]
pub struct AttributeValue {
    pub id: i64,
    pub attribute_id: i64,
    pub name: String,
}

/// Link tying a (template, attribute, value) triple to a catalog id
///
/// Link ids are the building blocks of combination identities.
#[derive(Debug, Clone)]
pub struct TemplateAttributeValue {
    pub id: i64,
    pub template_id: i64,
    pub attribute_id: i64,
    pub value_id: i64,
}

/// The sellable product definition, independent of attribute choice
#[derive(Debug, Clone)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub product_type: String,
    pub is_storable: bool,
    pub tracking: Tracking,
    pub lot_valuated: bool,
    pub list_price: f64,
    pub standard_price: f64,
    pub uom_id: i64,
    pub purchase_uom_id: i64,
    pub sale_ok: bool,
    pub purchase_ok: bool,
    pub description: String,
}

/// One concrete attribute-value combination of a template
#[derive(Debug, Clone)]
pub struct Variant {
    pub id: i64,
    pub template_id: i64,
    /// Template-attribute-value link ids for this variant
    pub attribute_value_ids: Vec<i64>,
    /// Canonical identity of the link id set, see [`combination_identity`]
    pub combination: String,
    pub list_price: f64,
    pub fix_price: f64,
    pub standard_price: f64,
    pub on_hand: f64,
}

/// Field payload for creating or updating a template
#[derive(Debug, Clone)]
pub struct TemplateValues {
    pub name: String,
    pub product_type: String,
    pub standard_price: f64,
    pub uom_id: i64,
    pub purchase_uom_id: i64,
    pub sale_ok: bool,
    pub purchase_ok: bool,
    pub description: String,
    pub is_storable: bool,
    pub tracking: Tracking,
    pub lot_valuated: bool,
    /// `None` leaves the stored list price untouched on update (0.0 on create)
    pub list_price: Option<f64>,
}

/// Field payload for creating or updating a variant
#[derive(Debug, Clone)]
pub struct VariantValues {
    pub template_id: i64,
    pub attribute_value_ids: Vec<i64>,
    pub combination: String,
    pub list_price: f64,
    pub fix_price: f64,
    /// `None` leaves the stored cost untouched on update (0.0 on create)
    pub standard_price: Option<f64>,
}

/// Canonical key identifying a variant's attribute-value set
///
/// Two variants of the same template with the same set of links get the same
/// identity regardless of the order the links were collected in.
pub fn combination_identity(link_ids: &[i64]) -> String {
    let mut ids = link_ids.to_vec();
    ids.sort_unstable();
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
