//! Common imports.
//!
//! ```ignore
//! use msorm::prelude::*;
//! ```

pub use crate::adapter::Adapter;
pub use crate::client::{Connection, ExecResult};
pub use crate::dialect::Dialect;
pub use crate::error::{OrmError, OrmResult};
pub use crate::filter::{FilterQuery, SubQuery};
pub use crate::mutate::{Mutate, Mutates};
pub use crate::query::{JoinQuery, Query, SortQuery};
pub use crate::row::{Row, RowExt};
pub use crate::schema::{Column, ColumnType, Index, Key, Table};
pub use crate::value::Value;
