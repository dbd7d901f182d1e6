use std::sync::Arc;

use tracing::trace;

use crate::buffer::{Buffer, BufferFactory};
use crate::config::DialectConfig;
use crate::error::{OrmError, OrmResult};
use crate::schema::{Index, SchemaOp};

use super::filter::Filter;
use super::select::QueryBuilder;
use super::table::{write_column_list, write_options};
use super::traits::{FilterWriter, QueryWriter};

/// Renders index migrations.
///
/// Filter values of a filtered index are written as literals.
#[derive(Clone)]
pub struct IndexBuilder {
    factory: BufferFactory,
    query: Arc<dyn QueryWriter>,
    filter: Arc<dyn FilterWriter>,
}

impl std::fmt::Debug for IndexBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexBuilder")
            .field("factory", &self.factory)
            .finish_non_exhaustive()
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        let factory = BufferFactory::new(DialectConfig::default().ddl());
        let filter: Arc<dyn FilterWriter> = Arc::new(Filter);
        let query = Arc::new(QueryBuilder::new(factory.clone(), Arc::clone(&filter)));
        Self::new(factory, query, filter)
    }
}

impl IndexBuilder {
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

    /// Build `CREATE INDEX` or `DROP INDEX`.
    pub fn build(&self, index: &Index) -> OrmResult<String> {
        let mut buffer = self.factory.create();

        match index.op {
            SchemaOp::Create => self.write_create(&mut buffer, index),
            SchemaOp::Drop => self.write_drop(&mut buffer, index),
            op @ (SchemaOp::Alter | SchemaOp::Rename) => {
                let message = format!("{op:?} of index {} on table {}", index.name, index.table);
                trace!(target: "msorm.sql", %message, "unsupported schema operation");
                return Err(OrmError::unsupported(message));
            }
        }

        write_options(&mut buffer, &index.options);
        buffer.write_char(';');

        Ok(buffer.into_sql())
    }

    fn write_create(&self, buffer: &mut Buffer, index: &Index) {
        if index.optional {
            buffer.write_str("IF NOT EXISTS (SELECT 1 FROM sys.indexes WHERE name = ");
            buffer.write_quoted(&index.name);
            buffer.write_str(" AND object_id = OBJECT_ID('");
            buffer.write_escape(&index.table);
            buffer.write_str("')) ");
        }

        buffer.write_str("CREATE ");
        if index.unique {
            buffer.write_str("UNIQUE NONCLUSTERED ");
        }
        buffer.write_str("INDEX ");
        buffer.write_escape(&index.name);
        buffer.write_str(" ON ");
        buffer.write_escape(&index.table);
        write_column_list(buffer, &index.columns);

        // Unique indexes ignore NULLs so that several rows may omit the key.
        if index.unique {
            buffer.write_str(" WHERE ");
            for (i, column) in index.columns.iter().enumerate() {
                if i > 0 {
                    buffer.write_str(" AND ");
                }
                buffer.write_escape(column);
                buffer.write_str(" IS NOT NULL");
            }
        }

        if !index.filter.is_none() {
            buffer.write_str(if index.unique { " AND " } else { " WHERE " });
            self.filter.write(buffer, &index.filter, self.query.as_ref());
        }
    }

    fn write_drop(&self, buffer: &mut Buffer, index: &Index) {
        buffer.write_str("DROP INDEX ");
        if index.optional {
            buffer.write_str("IF EXISTS ");
        }
        buffer.write_escape(&index.name);
        buffer.write_str(" ON ");
        buffer.write_escape(&index.table);
    }
}
