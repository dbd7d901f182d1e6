//! Mutation sets for insert and update.

use std::collections::BTreeMap;

use crate::value::Value;

/// Operation applied to one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutate {
    /// `column = value`
    Set(Value),
    /// `column = column + value`
    Inc(Value),
    /// Raw assignment: the map key is the SQL text, bound to these values.
    Fragment(Vec<Value>),
}

impl Mutate {
    /// The value of a `Set`, if this is one.
    pub fn set_value(&self) -> Option<&Value> {
        match self {
            Mutate::Set(v) => Some(v),
            _ => None,
        }
    }
}

/// Column → operation map.
///
/// Ordered so the column list and the value list of one statement are
/// produced by the same iteration.
pub type Mutates = BTreeMap<String, Mutate>;

/// Build a [`Mutates`] of `Set` operations.
pub fn set_all<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Mutates
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), Mutate::Set(v.into())))
        .collect()
}
