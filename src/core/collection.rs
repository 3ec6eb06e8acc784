use std::collections::HashMap;

use crate::core::entity::{EntityId, ExportEntity};
use crate::error::ExportError;

/// Container of export entities, scoped to exactly one store.
///
/// Iteration order is insertion order, backed by a stable id vector next to
/// the map, so re-iterating yields the same sequence. The collection owns its
/// entities for its whole lifetime; there is deliberately no removal
/// operation, since parents index into the collection by child id and a
/// removal would leave those indices dangling.
///
/// Single-threaded use only. One collection is created per export run for the
/// roots, and the child resolver creates a second one for the discovered
/// child pool.
#[derive(Debug)]
pub struct ExportCollection {
    store_id: u32,
    order: Vec<EntityId>,
    entities: HashMap<EntityId, ExportEntity>,
}

impl ExportCollection {
    pub fn new(store_id: u32) -> Self {
        Self {
            store_id,
            order: Vec::new(),
            entities: HashMap::new(),
        }
    }

    /// The store scope every query and attribute lookup is bound to.
    /// Immutable for the lifetime of the collection.
    pub fn store_id(&self) -> u32 {
        self.store_id
    }

    /// Adds an entity. Adding an id that is already present is a programming
    /// error; callers check `has` first.
    pub fn add(&mut self, entity: ExportEntity) -> Result<(), ExportError> {
        let id = entity.id();
        if self.entities.contains_key(&id) {
            return Err(ExportError::DuplicateEntity(id));
        }
        self.order.push(id);
        self.entities.insert(id, entity);
        Ok(())
    }

    pub fn has(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Result<&ExportEntity, ExportError> {
        self.entities.get(&id).ok_or(ExportError::MissingEntity(id))
    }

    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut ExportEntity, ExportError> {
        self.entities
            .get_mut(&id)
            .ok_or(ExportError::MissingEntity(id))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entity ids in insertion order, e.g. for bulk attribute lookups.
    pub fn ids(&self) -> Vec<EntityId> {
        self.order.clone()
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ExportEntity> {
        self.order.iter().map(|id| &self.entities[id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::ProductType;

    fn collection_with(ids: &[EntityId]) -> ExportCollection {
        let mut collection = ExportCollection::new(1);
        for &id in ids {
            collection
                .add(ExportEntity::new(id, ProductType::Simple))
                .unwrap();
        }
        collection
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let mut collection = collection_with(&[1]);
        let result = collection.add(ExportEntity::new(1, ProductType::Bundle));
        assert!(matches!(result, Err(ExportError::DuplicateEntity(1))));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn get_absent_id_is_an_error() {
        let collection = collection_with(&[1]);
        assert!(matches!(
            collection.get(2),
            Err(ExportError::MissingEntity(2))
        ));
    }

    #[test]
    fn iteration_preserves_insertion_order_and_restarts() {
        let collection = collection_with(&[5, 3, 9, 1]);
        let first: Vec<EntityId> = collection.iter().map(ExportEntity::id).collect();
        let second: Vec<EntityId> = collection.iter().map(ExportEntity::id).collect();
        assert_eq!(first, vec![5, 3, 9, 1]);
        assert_eq!(first, second);
        assert_eq!(collection.ids(), vec![5, 3, 9, 1]);
    }

    #[test]
    fn store_scope_is_fixed_at_creation() {
        let collection = ExportCollection::new(7);
        assert_eq!(collection.store_id(), 7);
        assert!(collection.is_empty());
    }
}
