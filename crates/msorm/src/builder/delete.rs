use std::sync::Arc;

use crate::buffer::BufferFactory;
use crate::filter::FilterQuery;
use crate::value::Value;

use super::traits::{FilterWriter, QueryWriter};

/// Renders `DELETE` statements.
#[derive(Clone)]
pub struct DeleteBuilder {
    factory: BufferFactory,
    query: Arc<dyn QueryWriter>,
    filter: Arc<dyn FilterWriter>,
}

impl std::fmt::Debug for DeleteBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteBuilder")
            .field("factory", &self.factory)
            .finish_non_exhaustive()
    }
}

impl DeleteBuilder {
    pub fn new(
        factory: BufferFactory,
        query: Arc<dyn QueryWriter>,
        filter: Arc<dyn FilterWriter>,
    ) -> Self {
        Self {
            factory,
            query,
            filter,
        }
    }

    /// Build `DELETE FROM [table] WHERE ...;`.
    ///
    /// An empty filter deletes every row.
    pub fn build(&self, table: &str, filter: &FilterQuery) -> (String, Vec<Value>) {
        let mut buffer = self.factory.create();

        buffer.write_str("DELETE FROM ");
        buffer.write_escape(table);

        if !filter.is_none() {
            buffer.write_str(" WHERE ");
            self.filter.write(&mut buffer, filter, self.query.as_ref());
        }

        buffer.write_char(';');
        buffer.into_parts()
    }
}
