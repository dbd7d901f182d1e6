//! SQL Server adapter: builds statements with a [`Dialect`] and runs them on
//! a caller-supplied [`Connection`].
//!
//! ```ignore
//! use msorm::{Adapter, FilterQuery, Query};
//!
//! let adapter = Adapter::new(conn);
//! let rows = adapter
//!     .query(&Query::from("users").filter(FilterQuery::eq("active", true)))
//!     .await?;
//! ```

use tracing::{debug, warn};

use crate::builder::UpdateBuilder;
use crate::client::{Connection, ExecResult};
use crate::config::AdapterConfig;
use crate::dialect::Dialect;
use crate::error::{ConstraintKind, DriverError, OrmError, OrmResult};
use crate::filter::FilterQuery;
use crate::mutate::Mutates;
use crate::query::Query;
use crate::row::RowExt;
use crate::schema::{Index, Table};
use crate::value::Value;

/// Runs built statements on a connection.
#[derive(Debug, Clone)]
pub struct Adapter<C> {
    conn: C,
    dialect: Dialect,
}

impl<C: Connection> Adapter<C> {
    /// Adapter with the default SQL Server configuration.
    pub fn new(conn: C) -> Self {
        Self::with_config(conn, AdapterConfig::default())
    }

    pub fn with_config(conn: C, config: AdapterConfig) -> Self {
        Self {
            conn,
            dialect: Dialect::new(config),
        }
    }

    /// Adapter name.
    pub fn name(&self) -> &'static str {
        "mssql"
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    pub fn into_inner(self) -> C {
        self.conn
    }

    /// Run a `SELECT`.
    pub async fn query(&self, query: &Query) -> OrmResult<Vec<C::Row>> {
        let (sql, args) = self.dialect.query().build(query);
        self.do_query(&sql, &args).await
    }

    /// Run `mode(field)` over `query`, e.g. `mode = "COUNT"`, `field = "*"`.
    ///
    /// Returns the first column of the first row, `0` when there is none.
    pub async fn aggregate(&self, query: &Query, mode: &str, field: &str) -> OrmResult<i64> {
        let aggregate = format!("^{mode}({}) AS result", self.dialect.escaper().escape(field));

        let mut query = query.clone();
        query.select.fields = std::iter::once(aggregate)
            .chain(query.group.fields.iter().cloned())
            .collect();

        let rows = self.query(&query).await?;
        match rows.first() {
            Some(row) => Ok(row.try_get_i64(0)?.unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// Insert one row and return the generated primary key.
    ///
    /// With an empty `primary` no key is requested and `None` is returned.
    /// A requested key that does not come back is reported as a unique
    /// violation: the driver does not surface one distinctly for this
    /// statement shape.
    pub async fn insert(
        &self,
        table: &str,
        primary: &str,
        mutates: &Mutates,
    ) -> OrmResult<Option<i64>> {
        let (sql, args) = self.dialect.insert().build(table, primary, mutates);

        if primary.is_empty() {
            self.do_exec(&sql, &args).await?;
            return Ok(None);
        }

        let rows = self.do_query(&sql, &args).await.map_err(missing_id)?;
        let id = match rows.first() {
            Some(row) => row.try_get_i64(0)?.unwrap_or(0),
            None => 0,
        };

        if id == 0 {
            warn!(target: "msorm.sql", table, primary, "insert returned no id");
            return Err(OrmError::constraint(ConstraintKind::Unique, "", None));
        }

        Ok(Some(id))
    }

    /// Insert several rows and return their generated keys in row order.
    ///
    /// A `NULL` key in the returned rows is a decode error.
    pub async fn insert_all(
        &self,
        table: &str,
        primary: &str,
        fields: &[String],
        rows: &[Mutates],
    ) -> OrmResult<Vec<i64>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let (sql, args) = self
            .dialect
            .insert_all()
            .build(table, primary, fields, rows);

        if primary.is_empty() {
            self.do_exec(&sql, &args).await?;
            return Ok(Vec::new());
        }

        let returned = self.do_query(&sql, &args).await.map_err(missing_id)?;
        let mut ids = Vec::with_capacity(returned.len());
        for (i, row) in returned.iter().enumerate() {
            match row.try_get_i64(0)? {
                Some(id) => ids.push(id),
                None => {
                    return Err(OrmError::decode(0, format!("inserted row {i} returned a NULL id")));
                }
            }
        }

        if ids.is_empty() {
            warn!(target: "msorm.sql", table, primary, "insert returned no ids");
            return Err(OrmError::constraint(ConstraintKind::Unique, "", None));
        }

        Ok(ids)
    }

    /// Update rows matching `filter`, returning the number affected.
    pub async fn update(
        &self,
        table: &str,
        primary: &str,
        mutates: &Mutates,
        filter: &FilterQuery,
    ) -> OrmResult<u64> {
        if !UpdateBuilder::has_assignments(primary, mutates) {
            return Err(OrmError::validation(format!(
                "update of {table} has no columns to set"
            )));
        }

        let (sql, args) = self.dialect.update().build(table, primary, mutates, filter);
        Ok(self.do_exec(&sql, &args).await?.rows_affected)
    }

    /// Delete rows matching `filter`, returning the number affected.
    pub async fn delete(&self, table: &str, filter: &FilterQuery) -> OrmResult<u64> {
        let (sql, args) = self.dialect.delete().build(table, filter);
        Ok(self.do_exec(&sql, &args).await?.rows_affected)
    }

    /// Run a raw statement.
    pub async fn exec(&self, sql: &str, args: &[Value]) -> OrmResult<ExecResult> {
        self.do_exec(sql, args).await
    }

    /// Apply a table migration.
    pub async fn apply_table(&self, table: &Table) -> OrmResult<()> {
        let sql = self.dialect.table().build(table)?;
        self.do_exec(&sql, &[]).await.map(|_| ())
    }

    /// Apply an index migration.
    pub async fn apply_index(&self, index: &Index) -> OrmResult<()> {
        let sql = self.dialect.index().build(index)?;
        self.do_exec(&sql, &[]).await.map(|_| ())
    }

    async fn do_exec(&self, sql: &str, args: &[Value]) -> OrmResult<ExecResult> {
        debug!(
            target: "msorm.sql",
            op = "adapter-exec",
            sql = %sql,
            param_count = args.len(),
        );
        self.conn.exec(sql, args).await.map_err(classify)
    }

    async fn do_query(&self, sql: &str, args: &[Value]) -> OrmResult<Vec<C::Row>> {
        debug!(
            target: "msorm.sql",
            op = "adapter-query",
            sql = %sql,
            param_count = args.len(),
        );
        self.conn.query(sql, args).await.map_err(classify)
    }
}

fn classify(err: DriverError) -> OrmError {
    let err = OrmError::from_driver_error(err);
    if let Some(kind) = err.constraint_kind() {
        warn!(target: "msorm.sql", %kind, error = %err, "constraint violation");
    }
    err
}

/// A failed insert that requested an id surfaces as a unique violation
/// unless the driver already reported a specific constraint.
fn missing_id(err: OrmError) -> OrmError {
    match err {
        OrmError::Driver(source) => OrmError::UniqueViolation {
            key: String::new(),
            source: Some(source),
        },
        other => other,
    }
}
