//! Export-side components: collection decoration and the writer boundaries.

use crate::core::collection::ExportCollection;
use crate::error::ExportError;

/// Category export over a category attribute source.
pub mod categories;

/// The child resolver decorator.
pub mod children;

/// Product export orchestration and the feed-writer seam.
pub mod products;

/// Enriches a populated collection in place before it is written.
///
/// Decorators run once per export pass, after the root collection has been
/// filled and before the writer consumes it. Any failure aborts the run.
pub trait CollectionDecorator {
    fn decorate(&self, collection: &mut ExportCollection) -> Result<(), ExportError>;
}
