//! Positional access to result rows.

use crate::error::{OrmError, OrmResult};
use crate::value::Value;

/// A result row returned by a [`Connection`](crate::Connection).
pub trait Row: Send {
    /// Number of columns.
    fn len(&self) -> usize;

    /// Value of the column at `index`, `None` when out of range.
    fn value(&self, index: usize) -> Option<Value>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Typed accessors over [`Row`].
pub trait RowExt: Row {
    /// Integer column; `None` for SQL `NULL`.
    fn try_get_i64(&self, index: usize) -> OrmResult<Option<i64>> {
        match self.value(index) {
            None => Err(OrmError::decode(index, "column index out of range")),
            Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| OrmError::decode(index, format!("expected integer, got {value:?}"))),
        }
    }
}

impl<R: Row + ?Sized> RowExt for R {}

impl Row for Vec<Value> {
    fn len(&self) -> usize {
        <[Value]>::len(self)
    }

    fn value(&self, index: usize) -> Option<Value> {
        self.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_row_access() {
        let row = vec![Value::Int(5), Value::Null, Value::from("x")];
        assert_eq!(Row::len(&row), 3);
        assert_eq!(row.try_get_i64(0).unwrap(), Some(5));
        assert_eq!(row.try_get_i64(1).unwrap(), None);
        assert!(row.try_get_i64(2).is_err());
        assert!(matches!(row.try_get_i64(9), Err(OrmError::Decode { index: 9, .. })));
    }
}
