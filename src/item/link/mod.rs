//! Child-link discovery for composite product types.

use crate::core::entity::EntityId;
use crate::error::ExportError;

/// Link-table join descriptors and the edition adapter.
pub mod schema;

/// sqlx-backed [`LinkSource`] implementation.
pub mod sql_link_source;

pub use sql_link_source::{SqlLinkSource, SqlLinkSourceBuilder};

/// One discovered parent/child edge.
pub type ParentChild = (EntityId, EntityId);

/// Discovery of child ids for groups of parent products.
///
/// The three bulk operations take the full parent-id list of one type group
/// and return every `(parent, child)` pair found in the matching link table.
/// An empty parent list must return an empty result without touching the
/// store. `relation_children` is the generic per-parent fallback used for
/// types without a dedicated join.
pub trait LinkSource {
    fn bundle_links(&self, parent_ids: &[EntityId]) -> Result<Vec<ParentChild>, ExportError>;

    fn grouped_links(&self, parent_ids: &[EntityId]) -> Result<Vec<ParentChild>, ExportError>;

    fn configurable_links(&self, parent_ids: &[EntityId]) -> Result<Vec<ParentChild>, ExportError>;

    fn relation_children(&self, parent_id: EntityId) -> Result<Vec<EntityId>, ExportError>;
}
