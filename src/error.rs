use thiserror::Error;

use crate::core::entity::EntityId;

/// Export error
///
/// Every failure aborts the export run for its store scope: there is no
/// partial-success mode and no retry. Duplicate and missing entity ids are
/// programming errors surfaced as results rather than panics.
#[derive(Error, Debug)]
pub enum ExportError {
    /// A relational query failed. Fatal, propagated as-is.
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// An entity id was added to a collection that already holds it.
    #[error("duplicate entity {0} in collection")]
    DuplicateEntity(EntityId),

    /// An entity id was requested from a collection that does not hold it.
    #[error("entity {0} not found in collection")]
    MissingEntity(EntityId),

    /// The feed writer rejected a record or failed to flush.
    #[error("feed writer: {0}")]
    Writer(String),
}
