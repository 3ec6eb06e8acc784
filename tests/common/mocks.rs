//! Mock link sources and attribute reader factories.
use mockall::mock;

use catalog_export_rs::core::entity::EntityId;
use catalog_export_rs::core::item::ItemReader;
use catalog_export_rs::error::ExportError;
use catalog_export_rs::item::eav::{AttributeReaderFactory, AttributeRow};
use catalog_export_rs::item::link::{LinkSource, ParentChild};

mock! {
    pub Links {}
    impl LinkSource for Links {
        fn bundle_links(&self, parent_ids: &[EntityId]) -> Result<Vec<ParentChild>, ExportError>;
        fn grouped_links(&self, parent_ids: &[EntityId]) -> Result<Vec<ParentChild>, ExportError>;
        fn configurable_links(&self, parent_ids: &[EntityId]) -> Result<Vec<ParentChild>, ExportError>;
        fn relation_children(&self, parent_id: EntityId) -> Result<Vec<EntityId>, ExportError>;
    }
}

mock! {
    pub ReaderFactory {}
    impl AttributeReaderFactory for ReaderFactory {
        fn create(
            &self,
            store_id: u32,
            entity_ids: Vec<EntityId>,
        ) -> Result<Box<dyn ItemReader<AttributeRow>>, ExportError>;
    }
}
