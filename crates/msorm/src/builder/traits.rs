use crate::buffer::Buffer;
use crate::filter::FilterQuery;
use crate::query::Query;

/// Writes a query into a buffer without a statement terminator.
///
/// The filter writer calls back into this to render subqueries, sharing the
/// caller's placeholder numbering.
pub trait QueryWriter: Send + Sync {
    fn write(&self, buffer: &mut Buffer, query: &Query);
}

/// Writes a filter tree into a buffer.
pub trait FilterWriter: Send + Sync {
    fn write(&self, buffer: &mut Buffer, filter: &FilterQuery, query: &dyn QueryWriter);
}
