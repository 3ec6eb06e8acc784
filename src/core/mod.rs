/// Insertion-ordered, store-scoped entity container.
pub mod collection;

/// Export entity and product-type dispatch.
pub mod entity;

/// Reader and writer seams shared by the export components.
pub mod item;
