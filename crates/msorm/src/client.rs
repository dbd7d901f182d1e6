//! Connection seam between the adapter and a SQL Server driver.

use crate::error::DriverError;
use crate::row::Row;
use crate::value::Value;

/// Outcome of a statement that returns no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub last_insert_id: i64,
    pub rows_affected: u64,
}

/// A driver connection (or transaction) the adapter runs statements on.
///
/// Placeholders are `@p1, @p2, ...`, matching `args` by position. Errors
/// should carry the driver's message text unchanged so constraint
/// violations can be classified.
pub trait Connection: Send + Sync {
    type Row: Row;

    /// Execute a statement and report affected rows.
    fn exec(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = Result<ExecResult, DriverError>> + Send;

    /// Execute a statement and return its rows.
    fn query(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = Result<Vec<Self::Row>, DriverError>> + Send;
}
