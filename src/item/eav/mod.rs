//! Streaming, store-scoped EAV attribute reads.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::AnyPool;

use crate::core::entity::EntityId;
use crate::core::item::ItemReader;
use crate::error::ExportError;

/// Chunked reader over the EAV value tables.
pub mod eav_reader;

pub use eav_reader::{EavAttributeReader, EavAttributeReaderBuilder};

/// One hydration record: an entity id plus the flat attribute values resolved
/// for the requested store scope. Transient; consumed to update the matching
/// entity and then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeRow {
    pub entity_id: EntityId,
    pub values: HashMap<String, String>,
}

/// Supplies the attribute codes a reader fetches.
///
/// This is the export-configuration boundary: which attributes end up in the
/// feed is decided outside this crate. The selection is consulted exactly
/// once, when a reader is constructed, before the first row is pulled.
pub trait AttributeSelection {
    fn attribute_codes(&self) -> Vec<String>;
}

/// Creates a fresh attribute reader per hydration pass.
///
/// Readers are forward-only and not restartable, so every bulk hydration
/// needs a new one. Callers must not invoke this with an empty id set; the
/// child resolver skips hydration entirely when there is nothing to hydrate.
pub trait AttributeReaderFactory {
    fn create(
        &self,
        store_id: u32,
        entity_ids: Vec<EntityId>,
    ) -> Result<Box<dyn ItemReader<AttributeRow>>, ExportError>;
}

/// [`AttributeReaderFactory`] wiring a connection pool to an attribute
/// selection.
pub struct SqlAttributeReaderFactory {
    pool: AnyPool,
    selection: Box<dyn AttributeSelection>,
}

impl SqlAttributeReaderFactory {
    pub fn new(pool: AnyPool, selection: Box<dyn AttributeSelection>) -> Self {
        Self { pool, selection }
    }
}

impl AttributeReaderFactory for SqlAttributeReaderFactory {
    fn create(
        &self,
        store_id: u32,
        entity_ids: Vec<EntityId>,
    ) -> Result<Box<dyn ItemReader<AttributeRow>>, ExportError> {
        let reader = EavAttributeReader::builder()
            .pool(self.pool.clone())
            .store_id(store_id)
            .entity_ids(entity_ids)
            .attributes(self.selection.attribute_codes())
            .build();
        Ok(Box::new(reader))
    }
}
