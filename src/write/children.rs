use std::cell::RefCell;

use log::debug;

use crate::core::collection::ExportCollection;
use crate::core::entity::{EntityId, ExportEntity, ProductType};
use crate::error::ExportError;
use crate::item::eav::AttributeReaderFactory;
use crate::item::link::LinkSource;
use crate::write::CollectionDecorator;

/// Resolves composite children for a collection of root products.
///
/// Roots are grouped by product type; each composite type dispatches to its
/// bulk link discovery, everything else falls back to the generic per-parent
/// relation lookup. Discovered children are materialized exactly once in a
/// secondary collection regardless of how many parents reference them, wired
/// to their parents by id, and bulk-hydrated through one attribute reader
/// pass. The secondary collection is handed over via [`take_children`].
///
/// [`take_children`]: ChildrenDecorator::take_children
pub struct ChildrenDecorator<L: LinkSource> {
    links: L,
    attributes: Box<dyn AttributeReaderFactory>,
    children: RefCell<Option<ExportCollection>>,
}

impl<L: LinkSource> ChildrenDecorator<L> {
    pub fn new(links: L, attributes: Box<dyn AttributeReaderFactory>) -> Self {
        Self {
            links,
            attributes,
            children: RefCell::new(None),
        }
    }

    /// Hands over the child pool built by the last `decorate` call.
    pub fn take_children(&self) -> Option<ExportCollection> {
        self.children.borrow_mut().take()
    }

    fn create_children(
        &self,
        collection: &mut ExportCollection,
        children: &mut ExportCollection,
    ) -> Result<(), ExportError> {
        for (product_type, parent_ids) in group_by_type(collection) {
            let is_composite = product_type.is_composite();
            for &id in &parent_ids {
                let entity = collection.get_mut(id)?;
                entity.set_is_composite(is_composite);
                entity.clear_children();
            }

            debug!(
                "resolving children for {} parents of type {}",
                parent_ids.len(),
                product_type.code()
            );

            let pairs = match product_type {
                ProductType::Bundle => self.links.bundle_links(&parent_ids)?,
                ProductType::Grouped => self.links.grouped_links(&parent_ids)?,
                ProductType::Configurable => self.links.configurable_links(&parent_ids)?,
                ProductType::Simple | ProductType::Other(_) => {
                    let mut pairs = Vec::new();
                    for &parent_id in &parent_ids {
                        for child_id in self.links.relation_children(parent_id)? {
                            pairs.push((parent_id, child_id));
                        }
                    }
                    pairs
                }
            };

            for (parent_id, child_id) in pairs {
                add_child(collection, children, parent_id, child_id)?;
            }
        }
        Ok(())
    }

    /// Bulk hydration: one reader over all discovered child ids, rows merged
    /// into the matching child by id. Skipped entirely for an empty pool.
    fn hydrate(&self, store_id: u32, children: &mut ExportCollection) -> Result<(), ExportError> {
        if children.is_empty() {
            return Ok(());
        }

        let reader = self.attributes.create(store_id, children.ids())?;
        while let Some(row) = reader.read()? {
            children.get_mut(row.entity_id)?.merge_attributes(row.values);
        }
        Ok(())
    }
}

impl<L: LinkSource> CollectionDecorator for ChildrenDecorator<L> {
    fn decorate(&self, collection: &mut ExportCollection) -> Result<(), ExportError> {
        let mut children = ExportCollection::new(collection.store_id());
        self.create_children(collection, &mut children)?;
        self.hydrate(collection.store_id(), &mut children)?;
        *self.children.borrow_mut() = Some(children);
        Ok(())
    }
}

/// Partitions the collection's entities by product type, groups in first-seen
/// order, ids in insertion order within each group.
fn group_by_type(collection: &ExportCollection) -> Vec<(ProductType, Vec<EntityId>)> {
    let mut groups: Vec<(ProductType, Vec<EntityId>)> = Vec::new();
    for entity in collection.iter() {
        let product_type = entity.product_type().clone();
        match groups.iter_mut().find(|(ty, _)| *ty == product_type) {
            Some((_, ids)) => ids.push(entity.id()),
            None => groups.push((product_type, vec![entity.id()])),
        }
    }
    groups
}

/// Materializes one child per distinct id and appends it to the parent.
/// One-hop self references are dropped.
fn add_child(
    collection: &mut ExportCollection,
    children: &mut ExportCollection,
    parent_id: EntityId,
    child_id: EntityId,
) -> Result<(), ExportError> {
    if parent_id == child_id {
        return Ok(());
    }
    if !children.has(child_id) {
        children.add(ExportEntity::child(child_id))?;
    }
    collection.get_mut(parent_id)?.add_child(child_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_keep_first_seen_order() {
        let mut collection = ExportCollection::new(1);
        for (id, code) in [
            (1, "bundle"),
            (2, "simple"),
            (3, "bundle"),
            (4, "grouped"),
        ] {
            collection
                .add(ExportEntity::new(id, ProductType::from_code(code)))
                .unwrap();
        }

        let groups = group_by_type(&collection);
        let summary: Vec<(&str, Vec<EntityId>)> = groups
            .iter()
            .map(|(ty, ids)| (ty.code(), ids.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("bundle", vec![1, 3]),
                ("simple", vec![2]),
                ("grouped", vec![4]),
            ]
        );
    }

    #[test]
    fn add_child_materializes_each_id_once() {
        let mut collection = ExportCollection::new(1);
        collection
            .add(ExportEntity::new(1, ProductType::Grouped))
            .unwrap();
        collection
            .add(ExportEntity::new(2, ProductType::Grouped))
            .unwrap();
        let mut children = ExportCollection::new(1);

        add_child(&mut collection, &mut children, 1, 20).unwrap();
        add_child(&mut collection, &mut children, 2, 20).unwrap();

        assert_eq!(children.len(), 1);
        assert_eq!(collection.get(1).unwrap().children(), &[20]);
        assert_eq!(collection.get(2).unwrap().children(), &[20]);
    }

    #[test]
    fn add_child_drops_self_reference() {
        let mut collection = ExportCollection::new(1);
        collection
            .add(ExportEntity::new(1, ProductType::Configurable))
            .unwrap();
        let mut children = ExportCollection::new(1);

        add_child(&mut collection, &mut children, 1, 1).unwrap();

        assert!(children.is_empty());
        assert!(collection.get(1).unwrap().children().is_empty());
    }
}
