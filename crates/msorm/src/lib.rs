//! # msorm
//!
//! SQL Server (T-SQL) statement builders for ORM adapters.
//!
//! ## Features
//!
//! - **Plain AST in, T-SQL out**: [`Query`], [`FilterQuery`], [`Mutates`],
//!   [`Table`] and [`Index`] values are rendered to a statement plus its
//!   ordered arguments
//! - **Placeholders**: `@p1, @p2, ...`, always matching argument positions,
//!   including inside subqueries
//! - **Identifier escaping**: `user.name` → `[user].[name]`, memoized in a
//!   shared concurrent cache
//! - **T-SQL paging**: `TOP n` or `OFFSET ... FETCH NEXT`, with an implicit
//!   `ORDER BY 1` when needed
//! - **Identity inserts**: `OUTPUT INSERTED.<pk>` and `IDENTITY_INSERT` toggling
//! - **Constraint errors**: driver messages classified into unique, foreign key
//!   and check violations
//!
//! ## Building statements
//!
//! ```ignore
//! use msorm::{Dialect, FilterQuery, Query};
//!
//! let dialect = Dialect::mssql();
//! let (sql, args) = dialect.query().build(
//!     &Query::from("users")
//!         .filter(FilterQuery::eq("status", "active"))
//!         .sort_desc("created_at")
//!         .limit(10),
//! );
//! assert_eq!(
//!     sql,
//!     "SELECT TOP 10 * FROM [users] WHERE [status]=@p1 ORDER BY [created_at] DESC;"
//! );
//! ```
//!
//! ## Running statements
//!
//! [`Adapter`] wraps any [`Connection`] implementation and maps driver errors
//! to [`OrmError`]. Statements are logged with `tracing` under the
//! `msorm.sql` target.

pub mod adapter;
pub mod buffer;
pub mod builder;
pub mod client;
pub mod config;
pub mod dialect;
pub mod error;
pub mod filter;
pub mod ident;
pub mod mutate;
pub mod prelude;
pub mod query;
pub mod row;
pub mod schema;
pub mod value;

pub use adapter::Adapter;
pub use buffer::{Buffer, BufferFactory};
pub use builder::{
    ColumnMapper, DeleteBuilder, Filter, FilterWriter, IndexBuilder, InsertAllBuilder,
    InsertBuilder, MappedType, QueryBuilder, QueryWriter, TableBuilder, UpdateBuilder,
    map_column,
};
pub use client::{Connection, ExecResult};
pub use config::{AdapterConfig, DialectConfig, Quote};
pub use dialect::Dialect;
pub use error::{ConstraintKind, DriverError, OrmError, OrmResult, classify_constraint};
pub use filter::{CompareOp, FilterQuery, Operand, SubQuery};
pub use ident::{EscapeCache, Escaper};
pub use mutate::{Mutate, Mutates, set_all};
pub use query::{GroupQuery, JoinQuery, Query, SelectQuery, SortQuery, SqlQuery};
pub use row::{Row, RowExt};
pub use schema::{
    Column, ColumnType, Definition, ForeignKeyReference, Index, Key, KeyType, SchemaOp, Table,
};
pub use value::Value;
