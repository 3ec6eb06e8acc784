use log::info;
use uuid::Uuid;

use crate::core::collection::ExportCollection;
use crate::error::ExportError;
use crate::item::link::LinkSource;
use crate::write::CollectionDecorator;
use crate::write::children::ChildrenDecorator;

/// The external feed-writer boundary.
///
/// Implementations accept the enriched root collection and its child pool for
/// one store scope and emit one output node per root entity, including nested
/// child nodes resolved through the child pool by id. The underlying output
/// stream must be flushed after each top-level write; `flush` forces any
/// remaining buffered output down.
pub trait FeedWriter {
    fn write_products(
        &mut self,
        roots: &ExportCollection,
        children: &ExportCollection,
    ) -> Result<(), ExportError>;

    fn flush(&mut self) -> Result<(), ExportError>;
}

/// One product export pass for a store scope: resolve children, then hand the
/// enriched collections to the feed writer.
pub struct ProductExport<L: LinkSource> {
    children: ChildrenDecorator<L>,
}

impl<L: LinkSource> ProductExport<L> {
    pub fn new(children: ChildrenDecorator<L>) -> Self {
        Self { children }
    }

    pub fn write(
        &self,
        collection: &mut ExportCollection,
        writer: &mut dyn FeedWriter,
    ) -> Result<(), ExportError> {
        let run_id = Uuid::new_v4();
        let store_id = collection.store_id();
        info!("start of product export, store: {store_id}, run: {run_id}");

        self.children.decorate(collection)?;
        let children = self
            .children
            .take_children()
            .unwrap_or_else(|| ExportCollection::new(store_id));

        writer.write_products(collection, &children)?;
        writer.flush()?;

        info!(
            "end of product export, store: {store_id}, run: {run_id}, roots: {}, children: {}",
            collection.len(),
            children.len()
        );
        Ok(())
    }
}
