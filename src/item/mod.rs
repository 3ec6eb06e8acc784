//! Relational item sources: streaming EAV attribute reads and child-link
//! discovery.

use std::future::Future;

/// Streaming EAV attribute reader.
pub mod eav;

/// Child-link discovery over the catalog link tables.
pub mod link;

/// Runs an async sqlx operation from the synchronous reader API.
///
/// Requires a multi-threaded tokio runtime, matching the blocking,
/// single-pass execution model of an export run.
pub(crate) fn block_on_query<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
