use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use log::debug;
use sqlx::{Any, AnyPool, QueryBuilder};

use crate::core::entity::EntityId;
use crate::core::item::{ItemReader, ItemReaderResult};
use crate::error::ExportError;
use crate::item::block_on_query;
use crate::item::eav::AttributeRow;

/// Backend suffixes of the EAV value tables.
const VALUE_TABLES: [&str; 5] = ["varchar", "int", "decimal", "text", "datetime"];

/// Default store scope holding fallback values.
const DEFAULT_STORE_ID: u32 = 0;

/// Upper bound on the number of entity ids read per query.
const DEFAULT_CHUNK_SIZE: usize = 500;

/// Builder for [`EavAttributeReader`].
pub struct EavAttributeReaderBuilder {
    pool: Option<AnyPool>,
    store_id: u32,
    entity_ids: Vec<EntityId>,
    attributes: Vec<String>,
    chunk_size: usize,
}

impl Default for EavAttributeReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EavAttributeReaderBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            store_id: DEFAULT_STORE_ID,
            entity_ids: Vec::new(),
            attributes: Vec::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Sets the connection pool. Required.
    pub fn pool(mut self, pool: AnyPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Sets the store scope attribute values are resolved for.
    pub fn store_id(mut self, store_id: u32) -> Self {
        self.store_id = store_id;
        self
    }

    /// Sets the entity ids to read attribute rows for.
    pub fn entity_ids(mut self, entity_ids: Vec<EntityId>) -> Self {
        self.entity_ids = entity_ids;
        self
    }

    /// Sets the attribute codes to fetch. An empty selection yields an
    /// immediately exhausted reader.
    pub fn attributes(mut self, attributes: Vec<String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Overrides the entity-id chunk size.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Builds the reader.
    ///
    /// # Panics
    ///
    /// Panics if no pool has been set.
    pub fn build(self) -> EavAttributeReader {
        EavAttributeReader {
            pool: self.pool.expect("connection pool is required"),
            store_id: self.store_id,
            entity_ids: self.entity_ids,
            attributes: self.attributes,
            chunk_size: self.chunk_size,
            cursor: Cell::new(0),
            buffer: RefCell::new(VecDeque::new()),
        }
    }
}

/// Lazy attribute-row source over the five EAV value tables.
///
/// Reads one entity-id chunk at a time as a single `UNION ALL` across the
/// value tables, restricted to the default scope and the requested store
/// scope; a store-scoped value overrides the default-scope value for the same
/// code. Values are cast to text on the way out, so one row shape serves all
/// backend types.
///
/// The sequence is finite and forward-only; a fresh reader must be built to
/// re-read. Uses interior mutability for the chunk cursor and row buffer, so
/// a shared reference drives the stream (single-threaded use only). Query
/// failures are fatal and propagated unchanged.
pub struct EavAttributeReader {
    pool: AnyPool,
    store_id: u32,
    entity_ids: Vec<EntityId>,
    attributes: Vec<String>,
    chunk_size: usize,
    cursor: Cell<usize>,
    buffer: RefCell<VecDeque<AttributeRow>>,
}

impl EavAttributeReader {
    pub fn builder() -> EavAttributeReaderBuilder {
        EavAttributeReaderBuilder::new()
    }

    /// Loads the next entity-id chunk into the row buffer and advances the
    /// cursor. May buffer nothing when no values exist for the chunk.
    fn read_chunk(&self) -> Result<(), ExportError> {
        let start = self.cursor.get();
        let end = (start + self.chunk_size).min(self.entity_ids.len());
        let chunk = &self.entity_ids[start..end];
        self.cursor.set(end);

        let mut builder = QueryBuilder::<Any>::new("");
        for (index, table) in VALUE_TABLES.iter().enumerate() {
            if index > 0 {
                builder.push(" UNION ALL ");
            }
            builder.push(format!(
                "SELECT v.entity_id, a.attribute_code, CAST(v.value AS CHAR) AS value, \
                 v.store_id FROM catalog_product_entity_{table} v \
                 INNER JOIN eav_attribute a ON a.attribute_id = v.attribute_id \
                 WHERE v.store_id IN (0, "
            ));
            builder.push_bind(i64::from(self.store_id));
            builder.push(") AND a.attribute_code IN (");
            let mut codes = builder.separated(", ");
            for code in &self.attributes {
                codes.push_bind(code.as_str());
            }
            builder.push(") AND v.entity_id IN (");
            let mut ids = builder.separated(", ");
            for id in chunk {
                ids.push_bind(*id);
            }
            builder.push(")");
        }

        let rows: Vec<(i64, String, Option<String>, i64)> =
            block_on_query(builder.build_query_as().fetch_all(&self.pool))?;

        debug!(
            "eav read: {} value rows for {} entities, store {}",
            rows.len(),
            chunk.len(),
            self.store_id
        );

        // Fold per entity; a store-scoped row replaces the default-scope row
        // for the same code, a default-scope row never replaces anything.
        let mut scoped: HashMap<EntityId, HashMap<String, String>> = HashMap::new();
        let mut scope_of: HashMap<(EntityId, String), i64> = HashMap::new();
        for (entity_id, code, value, row_store) in rows {
            let Some(value) = value else { continue };
            let known = scope_of.get(&(entity_id, code.clone()));
            if known.is_some() && row_store == i64::from(DEFAULT_STORE_ID) {
                continue;
            }
            scope_of.insert((entity_id, code.clone()), row_store);
            scoped.entry(entity_id).or_default().insert(code, value);
        }

        let mut buffer = self.buffer.borrow_mut();
        for id in chunk {
            if let Some(values) = scoped.remove(id) {
                buffer.push_back(AttributeRow {
                    entity_id: *id,
                    values,
                });
            }
        }
        Ok(())
    }
}

impl ItemReader<AttributeRow> for EavAttributeReader {
    fn read(&self) -> ItemReaderResult<AttributeRow> {
        loop {
            if let Some(row) = self.buffer.borrow_mut().pop_front() {
                return Ok(Some(row));
            }
            if self.attributes.is_empty() || self.cursor.get() >= self.entity_ids.len() {
                return Ok(None);
            }
            self.read_chunk()?;
        }
    }
}
