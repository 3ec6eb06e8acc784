use crate::error::ExportError;

/// Result of a single read: `Ok(Some(item))` for an item, `Ok(None)` once the
/// source is exhausted.
pub type ItemReaderResult<T> = Result<Option<T>, ExportError>;

/// Result of a write or flush operation.
pub type ItemWriterResult = Result<(), ExportError>;

/// A forward-only item source.
///
/// Readers are finite but not restartable: once `read` has returned
/// `Ok(None)`, a fresh reader must be constructed to re-read the source.
/// Implementations use interior mutability so that a shared reference is
/// enough to drive the stream.
pub trait ItemReader<T> {
    fn read(&self) -> ItemReaderResult<T>;
}

/// A chunk-oriented record sink.
///
/// `flush` must push any buffered output down to the underlying stream; the
/// export calls it after each logical unit of work.
pub trait ItemWriter<T> {
    fn write(&self, items: &[T]) -> ItemWriterResult;

    fn flush(&self) -> ItemWriterResult;
}
