//! Query AST.
//!
//! [`Query`] describes a `SELECT`. It is a plain value assembled with
//! consuming builder methods and rendered by
//! [`QueryBuilder`](crate::builder::QueryBuilder).
//!
//! ```ignore
//! use msorm::{FilterQuery, Query};
//!
//! let q = Query::from("users")
//!     .select(["id", "name"])
//!     .filter(FilterQuery::eq("active", true))
//!     .sort_desc("created_at")
//!     .limit(10);
//! ```

use crate::filter::FilterQuery;
use crate::value::Value;

/// Projection list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    pub fields: Vec<String>,
    pub distinct: bool,
}

/// One join clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinQuery {
    /// Join keyword, e.g. `JOIN` or `LEFT JOIN`, or a whole raw join when
    /// `table` is empty.
    pub mode: String,
    pub table: String,
    pub from: String,
    pub to: String,
    /// Values bound to placeholders inside a raw `mode`.
    pub arguments: Vec<Value>,
    pub filter: FilterQuery,
}

impl JoinQuery {
    /// Join `table` on `from = to`.
    pub fn new(
        mode: impl Into<String>,
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            mode: mode.into(),
            table: table.into(),
            from: from.into(),
            to: to.into(),
            ..Default::default()
        }
    }

    /// A raw join fragment with its bound values.
    pub fn raw(sql: impl Into<String>, arguments: impl IntoIterator<Item = Value>) -> Self {
        Self {
            mode: sql.into(),
            arguments: arguments.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Add an extra condition to the `ON` clause.
    pub fn with_filter(mut self, filter: FilterQuery) -> Self {
        self.filter = filter;
        self
    }
}

/// `GROUP BY` fields and `HAVING` filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupQuery {
    pub fields: Vec<String>,
    pub filter: FilterQuery,
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, PartialEq)]
pub struct SortQuery {
    pub field: String,
    pub asc: bool,
}

impl SortQuery {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            asc: true,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            asc: false,
        }
    }
}

/// A raw statement that replaces structured rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlQuery {
    pub statement: String,
    pub values: Vec<Value>,
}

/// `SELECT` description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub table: String,
    pub select: SelectQuery,
    pub joins: Vec<JoinQuery>,
    pub filter: FilterQuery,
    pub group: GroupQuery,
    pub sorts: Vec<SortQuery>,
    pub limit: u64,
    pub offset: u64,
    /// Clause appended after everything else, e.g. a table hint.
    pub lock: Option<String>,
    pub sql: Option<SqlQuery>,
}

impl From<&str> for Query {
    fn from(table: &str) -> Self {
        Self::new(table)
    }
}

impl From<String> for Query {
    fn from(table: String) -> Self {
        Self::new(table)
    }
}

impl Query {
    /// Query over `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    /// Raw statement with bound values.
    pub fn raw(statement: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            sql: Some(SqlQuery {
                statement: statement.into(),
                values: values.into_iter().collect(),
            }),
            ..Default::default()
        }
    }

    /// Replace the projection.
    pub fn select<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.select.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn distinct(mut self) -> Self {
        self.select.distinct = true;
        self
    }

    pub fn join(mut self, join: JoinQuery) -> Self {
        self.joins.push(join);
        self
    }

    /// `JOIN table ON from=to`.
    pub fn join_on(
        self,
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.join(JoinQuery::new("JOIN", table, from, to))
    }

    /// `LEFT JOIN table ON from=to`.
    pub fn left_join_on(
        self,
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.join(JoinQuery::new("LEFT JOIN", table, from, to))
    }

    /// Add a `WHERE` condition, combined with `AND`.
    pub fn filter(mut self, filter: FilterQuery) -> Self {
        self.filter = std::mem::take(&mut self.filter).and_with(filter);
        self
    }

    pub fn group<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.group.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Add a `HAVING` condition, combined with `AND`.
    pub fn having(mut self, filter: FilterQuery) -> Self {
        self.group.filter = std::mem::take(&mut self.group.filter).and_with(filter);
        self
    }

    pub fn sort(mut self, sort: SortQuery) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn sort_asc(self, field: impl Into<String>) -> Self {
        self.sort(SortQuery::asc(field))
    }

    pub fn sort_desc(self, field: impl Into<String>) -> Self {
        self.sort(SortQuery::desc(field))
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn lock(mut self, lock: impl Into<String>) -> Self {
        self.lock = Some(lock.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_parts() {
        let q = Query::from("users")
            .select(["id", "name"])
            .distinct()
            .filter(FilterQuery::eq("a", 1))
            .filter(FilterQuery::eq("b", 2))
            .sort_desc("id")
            .limit(5)
            .offset(10);

        assert_eq!(q.table, "users");
        assert_eq!(q.select.fields, vec!["id", "name"]);
        assert!(q.select.distinct);
        assert_eq!(
            q.filter,
            FilterQuery::And(vec![FilterQuery::eq("a", 1), FilterQuery::eq("b", 2)])
        );
        assert_eq!(q.sorts, vec![SortQuery::desc("id")]);
        assert_eq!((q.limit, q.offset), (5, 10));
    }

    #[test]
    fn raw_query_keeps_values() {
        let q = Query::raw("SELECT 1 WHERE @p1 = 1", [Value::Int(1)]);
        let sql = q.sql.unwrap();
        assert_eq!(sql.statement, "SELECT 1 WHERE @p1 = 1");
        assert_eq!(sql.values, vec![Value::Int(1)]);
    }

    #[test]
    fn raw_join() {
        let j = JoinQuery::raw("JOIN roles ON roles.id = @p1", [Value::Int(3)]);
        assert!(j.table.is_empty());
        assert_eq!(j.arguments.len(), 1);
    }
}
