#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # catalog-export-rs

 Exports a hierarchical product catalog from a relational store into
 collections consumed by an external merchandising/search feed writer. The
 crate covers the graph-construction and bulk-hydration pipeline: resolving
 composite children per product type and hydrating every discovered entity
 with store-scoped attribute values.

 ## Core Concepts

 - **ExportCollection:** insertion-ordered container of export entities,
   scoped to one store.
 - **ChildrenDecorator:** groups root entities by product type, discovers
   children through the per-type link joins (bundle, grouped, configurable,
   generic fallback), deduplicates them into a secondary collection and
   hydrates them in one pass.
 - **EavAttributeReader:** lazy, chunked attribute-row source over the EAV
   value tables, with store-view fallback to the default scope.
 - **Edition:** schema-variant adapter; the indirect variant translates
   internal row references to logical entity ids with one extra join.
 - **FeedWriter / ItemWriter:** the out-of-scope writer boundaries the
   enriched collections are handed to.

 ## Example

```rust,no_run
use catalog_export_rs::core::collection::ExportCollection;
use catalog_export_rs::core::entity::{ExportEntity, ProductType};
use catalog_export_rs::item::eav::SqlAttributeReaderFactory;
use catalog_export_rs::item::link::{SqlLinkSource, schema::Edition};
use catalog_export_rs::write::CollectionDecorator;
use catalog_export_rs::write::children::ChildrenDecorator;
# use catalog_export_rs::item::eav::AttributeSelection;
# struct Selection;
# impl AttributeSelection for Selection {
#     fn attribute_codes(&self) -> Vec<String> {
#         vec!["name".into(), "sku".into(), "type_id".into()]
#     }
# }

# async fn example(pool: sqlx::AnyPool) -> Result<(), Box<dyn std::error::Error>> {
let links = SqlLinkSource::builder()
    .pool(pool.clone())
    .edition(Edition::Standard)
    .build();
let attributes = SqlAttributeReaderFactory::new(pool, Box::new(Selection));
let decorator = ChildrenDecorator::new(links, Box::new(attributes));

let mut roots = ExportCollection::new(1);
roots.add(ExportEntity::new(1, ProductType::Bundle))?;

decorator.decorate(&mut roots)?;
let children = decorator.take_children().expect("decorated");
assert!(roots.get(1)?.is_composite());
# let _ = children;
# Ok(())
# }
```
 */

/// Entities, collections and the reader/writer seams.
pub mod core;

/// Error types for export operations.
pub mod error;

#[doc(inline)]
pub use error::*;

/// Relational item sources: EAV attribute reads and link discovery.
pub mod item;

/// Export-side components: decorators and writer boundaries.
pub mod write;
