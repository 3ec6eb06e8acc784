use std::collections::HashMap;

/// Logical catalog entity id, unique within a collection.
pub type EntityId = i64;

/// Attribute code used as the product-type discriminator.
pub const TYPE_ATTRIBUTE: &str = "type_id";

/// Product type discriminator.
///
/// Drives child resolution: each composite type has its own relational join
/// pattern, everything else falls back to the generic per-parent relation
/// lookup. Unknown codes are carried in `Other` and are not an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductType {
    Simple,
    Bundle,
    Grouped,
    Configurable,
    Other(String),
}

impl ProductType {
    /// Parses a `type_id` discriminator code.
    pub fn from_code(code: &str) -> Self {
        match code {
            "simple" => ProductType::Simple,
            "bundle" => ProductType::Bundle,
            "grouped" => ProductType::Grouped,
            "configurable" => ProductType::Configurable,
            other => ProductType::Other(other.to_string()),
        }
    }

    /// The wire code of this type.
    pub fn code(&self) -> &str {
        match self {
            ProductType::Simple => "simple",
            ProductType::Bundle => "bundle",
            ProductType::Grouped => "grouped",
            ProductType::Configurable => "configurable",
            ProductType::Other(code) => code,
        }
    }

    /// Whether entities of this type logically contain other products.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            ProductType::Bundle | ProductType::Grouped | ProductType::Configurable
        )
    }
}

/// One catalog record being exported.
///
/// Attributes are populated incrementally: a root entity arrives with its
/// attributes already loaded, a discovered child starts bare and is filled by
/// bulk hydration. Children are stored as ids indexing into the collection
/// that owns them, never as owning references.
#[derive(Debug, Clone)]
pub struct ExportEntity {
    id: EntityId,
    product_type: ProductType,
    is_composite: bool,
    attributes: HashMap<String, String>,
    children: Vec<EntityId>,
}

impl ExportEntity {
    pub fn new(id: EntityId, product_type: ProductType) -> Self {
        Self {
            id,
            product_type,
            is_composite: false,
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// A bare child entity: empty attributes, `Simple` until hydration
    /// delivers its real `type_id`.
    pub fn child(id: EntityId) -> Self {
        Self::new(id, ProductType::Simple)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn product_type(&self) -> &ProductType {
        &self.product_type
    }

    pub fn is_composite(&self) -> bool {
        self.is_composite
    }

    pub fn set_is_composite(&mut self, is_composite: bool) {
        self.is_composite = is_composite;
    }

    pub fn attribute(&self, code: &str) -> Option<&str> {
        self.attributes.get(code).map(String::as_str)
    }

    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    pub fn set_attribute(&mut self, code: impl Into<String>, value: impl Into<String>) {
        let code = code.into();
        let value = value.into();
        if code == TYPE_ATTRIBUTE {
            self.product_type = ProductType::from_code(&value);
        }
        self.attributes.insert(code, value);
    }

    /// Merges hydrated attribute values, overwriting per key. Re-merging the
    /// same row is a no-op, which keeps bulk hydration idempotent.
    pub fn merge_attributes(&mut self, values: HashMap<String, String>) {
        for (code, value) in values {
            self.set_attribute(code, value);
        }
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Appends a child id. Self references and duplicates are dropped so a
    /// parent never lists itself and never lists the same child twice.
    pub fn add_child(&mut self, child_id: EntityId) {
        if child_id == self.id || self.children.contains(&child_id) {
            return;
        }
        self.children.push(child_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_types() {
        assert!(ProductType::Bundle.is_composite());
        assert!(ProductType::Grouped.is_composite());
        assert!(ProductType::Configurable.is_composite());
        assert!(!ProductType::Simple.is_composite());
        assert!(!ProductType::Other("giftcard".into()).is_composite());
    }

    #[test]
    fn type_code_round_trip() {
        for code in ["simple", "bundle", "grouped", "configurable", "giftcard"] {
            assert_eq!(ProductType::from_code(code).code(), code);
        }
    }

    #[test]
    fn add_child_ignores_self_and_duplicates() {
        let mut entity = ExportEntity::new(1, ProductType::Configurable);
        entity.add_child(1);
        entity.add_child(10);
        entity.add_child(10);
        entity.add_child(11);
        assert_eq!(entity.children(), &[10, 11]);
    }

    #[test]
    fn type_id_attribute_refreshes_product_type() {
        let mut child = ExportEntity::child(10);
        assert_eq!(child.product_type(), &ProductType::Simple);

        child.merge_attributes(HashMap::from([(
            TYPE_ATTRIBUTE.to_string(),
            "configurable".to_string(),
        )]));
        assert_eq!(child.product_type(), &ProductType::Configurable);
        assert_eq!(child.attribute(TYPE_ATTRIBUTE), Some("configurable"));
    }

    #[test]
    fn merge_is_idempotent() {
        let mut entity = ExportEntity::child(10);
        let row = HashMap::from([
            ("name".to_string(), "Widget".to_string()),
            ("sku".to_string(), "W-10".to_string()),
        ]);
        entity.merge_attributes(row.clone());
        entity.merge_attributes(row);
        assert_eq!(entity.attributes().len(), 2);
        assert_eq!(entity.attribute("name"), Some("Widget"));
    }
}
