//! Link-table join descriptors and the store-edition schema adapter.
//!
//! Each composite product type maps to one join descriptor. The descriptor
//! renders its own SELECT prefix for either schema edition, so the resolver
//! and the SQL source never branch on the edition themselves; adding a third
//! variant only touches this module.

/// Product entity table, used by the indirect edition to translate internal
/// row references back to logical entity ids.
const ENTITY_TABLE: &str = "catalog_product_entity";

/// Link type id of grouped-product links in the generic link table.
pub const GROUPED_LINK_TYPE_ID: i64 = 3;

/// Store-edition schema variant.
///
/// Under `Standard` the link tables store directly usable logical ids. Under
/// `Indirect` the child side of each link table stores an internal `row_id`
/// that an extra join against the entity table translates to the logical
/// `entity_id`. Both editions yield identical `(parent, child)` pair sets for
/// equivalent data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edition {
    Standard,
    Indirect,
}

/// One composite-type link join: table plus parent/child columns and an
/// optional link-type filter.
#[derive(Debug, Clone, Copy)]
pub struct LinkJoin {
    pub table: &'static str,
    pub parent_column: &'static str,
    pub child_column: &'static str,
    pub link_type_id: Option<i64>,
}

/// Bundle children live in the bundle selection table.
pub const BUNDLE_JOIN: LinkJoin = LinkJoin {
    table: "catalog_product_bundle_selection",
    parent_column: "parent_product_id",
    child_column: "product_id",
    link_type_id: None,
};

/// Grouped children live in the generic product link table, filtered to the
/// grouped link type.
pub const GROUPED_JOIN: LinkJoin = LinkJoin {
    table: "catalog_product_link",
    parent_column: "product_id",
    child_column: "linked_product_id",
    link_type_id: Some(GROUPED_LINK_TYPE_ID),
};

/// Configurable children live in the super link table.
pub const CONFIGURABLE_JOIN: LinkJoin = LinkJoin {
    table: "catalog_product_super_link",
    parent_column: "parent_id",
    child_column: "product_id",
    link_type_id: None,
};

impl LinkJoin {
    /// Renders the SELECT prefix for this join under the given edition,
    /// without any WHERE clause. Column order is always `(parent, child)`.
    pub fn select_sql(&self, edition: Edition) -> String {
        match edition {
            Edition::Standard => format!(
                "SELECT l.{parent}, l.{child} FROM {table} l",
                parent = self.parent_column,
                child = self.child_column,
                table = self.table,
            ),
            Edition::Indirect => format!(
                "SELECT l.{parent}, e.entity_id FROM {table} l \
                 INNER JOIN {entity} e ON l.{child} = e.row_id",
                parent = self.parent_column,
                child = self.child_column,
                table = self.table,
                entity = ENTITY_TABLE,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_edition_selects_link_columns_directly() {
        assert_eq!(
            BUNDLE_JOIN.select_sql(Edition::Standard),
            "SELECT l.parent_product_id, l.product_id \
             FROM catalog_product_bundle_selection l"
        );
    }

    #[test]
    fn indirect_edition_translates_row_references() {
        let sql = GROUPED_JOIN.select_sql(Edition::Indirect);
        assert_eq!(
            sql,
            "SELECT l.product_id, e.entity_id FROM catalog_product_link l \
             INNER JOIN catalog_product_entity e ON l.linked_product_id = e.row_id"
        );
    }

    #[test]
    fn only_grouped_join_carries_a_type_filter() {
        assert_eq!(BUNDLE_JOIN.link_type_id, None);
        assert_eq!(GROUPED_JOIN.link_type_id, Some(GROUPED_LINK_TYPE_ID));
        assert_eq!(CONFIGURABLE_JOIN.link_type_id, None);
    }
}
