//! The wired set of SQL Server writers.

use std::sync::Arc;

use crate::buffer::BufferFactory;
use crate::builder::{
    DeleteBuilder, Filter, FilterWriter, IndexBuilder, InsertAllBuilder, InsertBuilder,
    QueryBuilder, QueryWriter, TableBuilder, UpdateBuilder,
};
use crate::config::AdapterConfig;
use crate::ident::{EscapeCache, Escaper};

/// One instance of every writer, sharing a single escape cache.
///
/// DML writers bind values to placeholders; the table and index writers
/// inline them.
#[derive(Debug, Clone)]
pub struct Dialect {
    config: AdapterConfig,
    escaper: Escaper,
    query: Arc<QueryBuilder>,
    insert: InsertBuilder,
    insert_all: InsertAllBuilder,
    update: UpdateBuilder,
    delete: DeleteBuilder,
    table: TableBuilder,
    index: IndexBuilder,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::mssql()
    }
}

impl Dialect {
    /// SQL Server with the default configuration.
    pub fn mssql() -> Self {
        Self::new(AdapterConfig::default())
    }

    pub fn new(config: AdapterConfig) -> Self {
        let cache = Arc::new(EscapeCache::new());
        let dml = BufferFactory::with_cache(config.dialect.clone(), Arc::clone(&cache));
        let ddl = BufferFactory::with_cache(config.dialect.ddl(), Arc::clone(&cache));

        let filter: Arc<dyn FilterWriter> = Arc::new(Filter::new());
        let query = Arc::new(QueryBuilder::new(dml.clone(), Arc::clone(&filter)));
        let query_writer: Arc<dyn QueryWriter> = query.clone();

        Self {
            escaper: Escaper::with_cache(&config.dialect, cache),
            insert: InsertBuilder::new(dml.clone()),
            insert_all: InsertAllBuilder::new(dml.clone()),
            update: UpdateBuilder::new(dml.clone(), Arc::clone(&query_writer), Arc::clone(&filter)),
            delete: DeleteBuilder::new(dml, Arc::clone(&query_writer), Arc::clone(&filter)),
            table: TableBuilder::new(ddl.clone(), config.column_mapper),
            index: IndexBuilder::new(ddl, query_writer, filter),
            query,
            config,
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Escaper sharing the writers' cache.
    pub fn escaper(&self) -> &Escaper {
        &self.escaper
    }

    pub fn query(&self) -> &QueryBuilder {
        &self.query
    }

    pub fn insert(&self) -> &InsertBuilder {
        &self.insert
    }

    pub fn insert_all(&self) -> &InsertAllBuilder {
        &self.insert_all
    }

    pub fn update(&self) -> &UpdateBuilder {
        &self.update
    }

    pub fn delete(&self) -> &DeleteBuilder {
        &self.delete
    }

    pub fn table(&self) -> &TableBuilder {
        &self.table
    }

    pub fn index(&self) -> &IndexBuilder {
        &self.index
    }
}
