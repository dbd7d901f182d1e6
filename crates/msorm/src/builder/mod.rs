//! SQL Server statement writers.
//!
//! Each writer turns one AST value into T-SQL:
//!
//! - [`QueryBuilder`]: `SELECT` with `TOP` or `OFFSET ... FETCH` paging.
//! - [`InsertBuilder`] / [`InsertAllBuilder`]: `INSERT` with `OUTPUT INSERTED`
//!   and `IDENTITY_INSERT` toggling.
//! - [`UpdateBuilder`] / [`DeleteBuilder`].
//! - [`TableBuilder`] / [`IndexBuilder`]: schema statements with inlined literals.
//!
//! DML writers return the statement and its arguments; placeholders are
//! `@p1, @p2, ...` in argument order.

pub mod column;
pub mod delete;
pub mod filter;
pub mod index;
pub mod insert;
pub mod insert_all;
pub mod select;
pub mod table;
pub mod traits;
pub mod update;

pub use column::{ColumnMapper, MappedType, map_column};
pub use delete::DeleteBuilder;
pub use filter::Filter;
pub use index::IndexBuilder;
pub use insert::InsertBuilder;
pub use insert_all::InsertAllBuilder;
pub use select::QueryBuilder;
pub use table::TableBuilder;
pub use traits::{FilterWriter, QueryWriter};
pub use update::UpdateBuilder;

#[cfg(test)]
mod tests;
