pub mod mocks;

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use catalog_export_rs::core::entity::EntityId;
use catalog_export_rs::core::item::{ItemReader, ItemReaderResult};
use catalog_export_rs::item::eav::AttributeRow;

/// In-memory attribute-row source standing in for the EAV reader.
pub struct StubAttributeReader {
    rows: RefCell<VecDeque<AttributeRow>>,
}

impl StubAttributeReader {
    pub fn new(rows: Vec<AttributeRow>) -> Self {
        Self {
            rows: RefCell::new(rows.into()),
        }
    }
}

impl ItemReader<AttributeRow> for StubAttributeReader {
    fn read(&self) -> ItemReaderResult<AttributeRow> {
        Ok(self.rows.borrow_mut().pop_front())
    }
}

pub fn attribute_row(entity_id: EntityId, values: &[(&str, &str)]) -> AttributeRow {
    AttributeRow {
        entity_id,
        values: values
            .iter()
            .map(|(code, value)| (code.to_string(), value.to_string()))
            .collect::<HashMap<String, String>>(),
    }
}
