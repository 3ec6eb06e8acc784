use std::collections::HashMap;

use log::info;
use serde::Serialize;

use crate::core::entity::EntityId;
use crate::core::item::{ItemReader, ItemWriter};
use crate::error::ExportError;
use crate::item::eav::AttributeRow;

/// One structured category node for the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRecord {
    pub entity_id: EntityId,
    pub attributes: HashMap<String, String>,
}

impl From<AttributeRow> for CategoryRecord {
    fn from(row: AttributeRow) -> Self {
        Self {
            entity_id: row.entity_id,
            attributes: row.values,
        }
    }
}

/// Streams a category attribute source into a record writer: one structured
/// record per category row, then a flush.
pub struct CategoryExport<R: ItemReader<AttributeRow>> {
    reader: R,
}

impl<R: ItemReader<AttributeRow>> CategoryExport<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn write_to(&self, writer: &impl ItemWriter<CategoryRecord>) -> Result<(), ExportError> {
        let mut count = 0usize;
        while let Some(row) = self.reader.read()? {
            writer.write(&[CategoryRecord::from(row)])?;
            count += 1;
        }
        writer.flush()?;

        info!("category export: wrote {count} records");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::core::item::{ItemReaderResult, ItemWriterResult};

    struct StubReader {
        rows: RefCell<VecDeque<AttributeRow>>,
    }

    impl ItemReader<AttributeRow> for StubReader {
        fn read(&self) -> ItemReaderResult<AttributeRow> {
            Ok(self.rows.borrow_mut().pop_front())
        }
    }

    #[derive(Default)]
    struct JsonLinesWriter {
        lines: RefCell<Vec<String>>,
        flushed: RefCell<bool>,
    }

    impl ItemWriter<CategoryRecord> for JsonLinesWriter {
        fn write(&self, items: &[CategoryRecord]) -> ItemWriterResult {
            for item in items {
                let line = serde_json::to_string(item)
                    .map_err(|e| ExportError::Writer(e.to_string()))?;
                self.lines.borrow_mut().push(line);
            }
            Ok(())
        }

        fn flush(&self) -> ItemWriterResult {
            *self.flushed.borrow_mut() = true;
            Ok(())
        }
    }

    fn row(entity_id: EntityId, name: &str) -> AttributeRow {
        AttributeRow {
            entity_id,
            values: HashMap::from([("name".to_string(), name.to_string())]),
        }
    }

    #[test]
    fn writes_one_record_per_row_then_flushes() {
        let reader = StubReader {
            rows: RefCell::new(VecDeque::from([row(100, "Shoes"), row(101, "Boots")])),
        };
        let writer = JsonLinesWriter::default();

        CategoryExport::new(reader).write_to(&writer).unwrap();

        let lines = writer.lines.borrow();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"entity_id\":100"));
        assert!(lines[0].contains("Shoes"));
        assert!(lines[1].contains("\"entity_id\":101"));
        assert!(*writer.flushed.borrow());
    }

    #[test]
    fn empty_source_still_flushes() {
        let reader = StubReader {
            rows: RefCell::new(VecDeque::new()),
        };
        let writer = JsonLinesWriter::default();

        CategoryExport::new(reader).write_to(&writer).unwrap();

        assert!(writer.lines.borrow().is_empty());
        assert!(*writer.flushed.borrow());
    }
}
