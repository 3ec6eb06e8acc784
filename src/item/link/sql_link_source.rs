use log::debug;
use sqlx::{Any, AnyPool, QueryBuilder};

use crate::core::entity::EntityId;
use crate::error::ExportError;
use crate::item::block_on_query;
use crate::item::link::schema::{BUNDLE_JOIN, CONFIGURABLE_JOIN, Edition, GROUPED_JOIN, LinkJoin};
use crate::item::link::{LinkSource, ParentChild};

/// Generic parent/child relation table backing the per-parent fallback.
const RELATION_TABLE: &str = "catalog_product_relation";

/// Upper bound on the number of parent ids bound into one `IN` list.
const DEFAULT_CHUNK_SIZE: usize = 500;

/// Builder for [`SqlLinkSource`].
pub struct SqlLinkSourceBuilder {
    pool: Option<AnyPool>,
    edition: Edition,
    chunk_size: usize,
}

impl Default for SqlLinkSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlLinkSourceBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            edition: Edition::Standard,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Sets the connection pool. Required.
    pub fn pool(mut self, pool: AnyPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Selects the schema edition the link queries are rendered for.
    pub fn edition(mut self, edition: Edition) -> Self {
        self.edition = edition;
        self
    }

    /// Overrides the `IN`-list chunk size.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Builds the link source.
    ///
    /// # Panics
    ///
    /// Panics if no pool has been set.
    pub fn build(self) -> SqlLinkSource {
        SqlLinkSource {
            pool: self.pool.expect("connection pool is required"),
            edition: self.edition,
            chunk_size: self.chunk_size,
        }
    }
}

/// [`LinkSource`] over the catalog link tables.
///
/// Parent-id lists are chunked into bounded `IN` lists with bound parameters,
/// so arbitrarily large type groups stay within protocol message-size limits.
/// The edition decides whether the child column is used directly or
/// translated through the entity table; the decision lives entirely in the
/// [`LinkJoin`] rendering, not here.
pub struct SqlLinkSource {
    pool: AnyPool,
    edition: Edition,
    chunk_size: usize,
}

impl SqlLinkSource {
    pub fn builder() -> SqlLinkSourceBuilder {
        SqlLinkSourceBuilder::new()
    }

    fn fetch_pairs(
        &self,
        join: &LinkJoin,
        parent_ids: &[EntityId],
    ) -> Result<Vec<ParentChild>, ExportError> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut pairs = Vec::new();
        for chunk in parent_ids.chunks(self.chunk_size) {
            let mut builder = QueryBuilder::<Any>::new(join.select_sql(self.edition));
            builder.push(" WHERE ");
            if let Some(link_type_id) = join.link_type_id {
                builder.push("l.link_type_id = ");
                builder.push_bind(link_type_id);
                builder.push(" AND ");
            }
            builder.push(format!("l.{} IN (", join.parent_column));
            let mut ids = builder.separated(", ");
            for id in chunk {
                ids.push_bind(*id);
            }
            builder.push(")");

            let rows: Vec<(i64, i64)> =
                block_on_query(builder.build_query_as().fetch_all(&self.pool))?;
            pairs.extend(rows);
        }

        debug!(
            "discovered {} links in {} for {} parents",
            pairs.len(),
            join.table,
            parent_ids.len()
        );
        Ok(pairs)
    }
}

impl LinkSource for SqlLinkSource {
    fn bundle_links(&self, parent_ids: &[EntityId]) -> Result<Vec<ParentChild>, ExportError> {
        self.fetch_pairs(&BUNDLE_JOIN, parent_ids)
    }

    fn grouped_links(&self, parent_ids: &[EntityId]) -> Result<Vec<ParentChild>, ExportError> {
        self.fetch_pairs(&GROUPED_JOIN, parent_ids)
    }

    fn configurable_links(&self, parent_ids: &[EntityId]) -> Result<Vec<ParentChild>, ExportError> {
        self.fetch_pairs(&CONFIGURABLE_JOIN, parent_ids)
    }

    fn relation_children(&self, parent_id: EntityId) -> Result<Vec<EntityId>, ExportError> {
        let mut builder = QueryBuilder::<Any>::new(format!(
            "SELECT child_id FROM {RELATION_TABLE} WHERE parent_id = "
        ));
        builder.push_bind(parent_id);

        let rows: Vec<(i64,)> = block_on_query(builder.build_query_as().fetch_all(&self.pool))?;
        Ok(rows.into_iter().map(|row| row.0).collect())
    }
}
