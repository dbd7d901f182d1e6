use std::sync::Arc;

use crate::buffer::{Buffer, BufferFactory};
use crate::filter::FilterQuery;
use crate::query::{JoinQuery, Query, SelectQuery, SortQuery, SqlQuery};
use crate::value::Value;

use super::filter::Filter;
use super::traits::{FilterWriter, QueryWriter};

/// Renders `SELECT` statements.
///
/// Paging uses `TOP n` when there is no offset and
/// `OFFSET n ROWS FETCH NEXT m ROWS ONLY` otherwise; an offset without a
/// sort gets `ORDER BY 1 ASC` because T-SQL requires an ordering for
/// `OFFSET`.
#[derive(Clone)]
pub struct QueryBuilder {
    factory: BufferFactory,
    filter: Arc<dyn FilterWriter>,
}

impl std::fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("factory", &self.factory)
            .finish_non_exhaustive()
    }
}

impl QueryBuilder {
    pub fn new(factory: BufferFactory, filter: Arc<dyn FilterWriter>) -> Self {
        Self { factory, filter }
    }

    /// Build the statement and its arguments.
    ///
    /// Structured queries end with `;`; a raw statement is returned as given.
    pub fn build(&self, query: &Query) -> (String, Vec<Value>) {
        let mut buffer = self.factory.create();
        self.write(&mut buffer, query);
        if raw_statement(query).is_none() {
            buffer.write_char(';');
        }
        buffer.into_parts()
    }

    fn write_select(&self, buffer: &mut Buffer, select: &SelectQuery, limit: u64, offset: u64) {
        buffer.write_str("SELECT");

        if select.distinct {
            buffer.write_str(" DISTINCT");
        }

        if limit > 0 && offset == 0 {
            buffer.write_str(" TOP ");
            buffer.write_str(&limit.to_string());
        }

        if select.fields.is_empty() {
            buffer.write_str(" *");
            return;
        }

        buffer.write_char(' ');
        for (i, field) in select.fields.iter().enumerate() {
            if i > 0 {
                buffer.write_str(", ");
            }
            buffer.write_escape(field);
        }
    }

    fn write_from(&self, buffer: &mut Buffer, table: &str) {
        if table.is_empty() {
            return;
        }
        buffer.write_str(" FROM ");
        buffer.write_escape(table);
    }

    fn write_joins(&self, buffer: &mut Buffer, joins: &[JoinQuery]) {
        for join in joins {
            buffer.write_char(' ');
            buffer.write_str(&join.mode);
            buffer.add_arguments(&join.arguments);

            if join.table.is_empty() {
                continue;
            }

            buffer.write_char(' ');
            buffer.write_escape(&join.table);

            let mut on = false;
            if !join.from.is_empty() && !join.to.is_empty() {
                buffer.write_str(" ON ");
                buffer.write_escape(&join.from);
                buffer.write_char('=');
                buffer.write_escape(&join.to);
                on = true;
            }

            if !join.filter.is_none() {
                buffer.write_str(if on { " AND " } else { " ON " });
                self.filter.write(buffer, &join.filter, self);
            }
        }
    }

    fn write_where(&self, buffer: &mut Buffer, filter: &FilterQuery) {
        if filter.is_none() {
            return;
        }
        buffer.write_str(" WHERE ");
        self.filter.write(buffer, filter, self);
    }

    fn write_group_by(&self, buffer: &mut Buffer, fields: &[String]) {
        buffer.write_str(" GROUP BY ");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                buffer.write_char(',');
            }
            buffer.write_escape(field);
        }
    }

    fn write_having(&self, buffer: &mut Buffer, filter: &FilterQuery) {
        if filter.is_none() {
            return;
        }
        buffer.write_str(" HAVING ");
        self.filter.write(buffer, filter, self);
    }

    fn write_order_by(&self, buffer: &mut Buffer, sorts: &[SortQuery], offset: u64) {
        if sorts.is_empty() {
            if offset > 0 {
                buffer.write_str(" ORDER BY 1 ASC");
            }
            return;
        }

        buffer.write_str(" ORDER BY ");
        for (i, sort) in sorts.iter().enumerate() {
            if i > 0 {
                buffer.write_char(',');
            }
            buffer.write_escape(&sort.field);
            buffer.write_str(if sort.asc { " ASC" } else { " DESC" });
        }
    }

    fn write_paging(&self, buffer: &mut Buffer, limit: u64, offset: u64) {
        if offset == 0 {
            return;
        }

        buffer.write_str(&format!(" OFFSET {offset} ROWS"));
        if limit > 0 {
            buffer.write_str(&format!(" FETCH NEXT {limit} ROWS ONLY"));
        }
    }
}

/// The raw statement of `query`, if it has non-empty text.
fn raw_statement(query: &Query) -> Option<&SqlQuery> {
    query.sql.as_ref().filter(|sql| !sql.statement.is_empty())
}

impl QueryWriter for QueryBuilder {
    fn write(&self, buffer: &mut Buffer, query: &Query) {
        if let Some(sql) = raw_statement(query) {
            buffer.write_str(&sql.statement);
            buffer.add_arguments(&sql.values);
            return;
        }

        self.write_select(buffer, &query.select, query.limit, query.offset);
        self.write_from(buffer, &query.table);
        self.write_joins(buffer, &query.joins);
        self.write_where(buffer, &query.filter);

        if !query.group.fields.is_empty() {
            self.write_group_by(buffer, &query.group.fields);
            self.write_having(buffer, &query.group.filter);
        }

        self.write_order_by(buffer, &query.sorts, query.offset);
        self.write_paging(buffer, query.limit, query.offset);

        if let Some(lock) = query.lock.as_deref().filter(|l| !l.is_empty()) {
            buffer.write_char(' ');
            buffer.write_str(lock);
        }
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(BufferFactory::default(), Arc::new(Filter))
    }
}
