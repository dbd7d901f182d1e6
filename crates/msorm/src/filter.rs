//! Filter tree.
//!
//! A [`FilterQuery`] is the boolean predicate of a `WHERE`, `HAVING`, join
//! `ON` or filtered index clause.
//!
//! ```ignore
//! use msorm::FilterQuery;
//!
//! let filter = FilterQuery::eq("status", "active")
//!     .and_with(FilterQuery::gt("age", 18));
//! ```

use crate::query::Query;
use crate::value::Value;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    /// SQL spelling of the operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
        }
    }
}

/// A nested query rendered with a prefix, e.g. `ANY(SELECT ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubQuery {
    pub prefix: String,
    pub query: Box<Query>,
}

impl SubQuery {
    pub fn new(prefix: impl Into<String>, query: Query) -> Self {
        Self {
            prefix: prefix.into(),
            query: Box::new(query),
        }
    }
}

/// Right-hand side of a comparison or an element of an `IN` list.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Value),
    Query(Box<Query>),
    SubQuery(SubQuery),
}

impl Operand {
    /// Whether this operand renders as a nested `SELECT`.
    pub fn is_query(&self) -> bool {
        matches!(self, Operand::Query(_) | Operand::SubQuery(_))
    }
}

macro_rules! impl_operand_from_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(v: $t) -> Self {
                    Operand::Value(v.into())
                }
            }
        )*
    };
}

impl_operand_from_value!(
    Value,
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    &str,
    String,
    Vec<u8>,
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::FixedOffset>,
    uuid::Uuid,
    serde_json::Value
);

#[cfg(feature = "rust_decimal")]
impl_operand_from_value!(rust_decimal::Decimal);

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        Operand::Value(v.into())
    }
}

impl From<Query> for Operand {
    fn from(q: Query) -> Self {
        Operand::Query(Box::new(q))
    }
}

impl From<SubQuery> for Operand {
    fn from(q: SubQuery) -> Self {
        Operand::SubQuery(q)
    }
}

/// Boolean predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterQuery {
    And(Vec<FilterQuery>),
    Or(Vec<FilterQuery>),
    Not(Vec<FilterQuery>),
    Compare {
        field: String,
        op: CompareOp,
        value: Operand,
    },
    Nil {
        field: String,
        negated: bool,
    },
    In {
        field: String,
        values: Vec<Operand>,
        negated: bool,
    },
    Like {
        field: String,
        pattern: Value,
        negated: bool,
    },
    /// Raw SQL with its own placeholders and the values bound to them.
    Fragment {
        sql: String,
        values: Vec<Value>,
    },
}

impl Default for FilterQuery {
    fn default() -> Self {
        FilterQuery::And(Vec::new())
    }
}

impl FilterQuery {
    /// Whether this filter renders nothing: a logical node none of whose
    /// children render.
    pub fn is_none(&self) -> bool {
        match self {
            FilterQuery::And(children) | FilterQuery::Or(children) | FilterQuery::Not(children) => {
                children.iter().all(FilterQuery::is_none)
            }
            _ => false,
        }
    }

    pub fn and(children: impl IntoIterator<Item = FilterQuery>) -> Self {
        FilterQuery::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = FilterQuery>) -> Self {
        FilterQuery::Or(children.into_iter().collect())
    }

    pub fn not(children: impl IntoIterator<Item = FilterQuery>) -> Self {
        FilterQuery::Not(children.into_iter().collect())
    }

    fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<Operand>) -> Self {
        FilterQuery::Compare {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::compare(field, CompareOp::Ne, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::compare(field, CompareOp::Lte, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::compare(field, CompareOp::Gte, value)
    }

    pub fn nil(field: impl Into<String>) -> Self {
        FilterQuery::Nil {
            field: field.into(),
            negated: false,
        }
    }

    pub fn not_nil(field: impl Into<String>) -> Self {
        FilterQuery::Nil {
            field: field.into(),
            negated: true,
        }
    }

    pub fn in_<V: Into<Operand>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        FilterQuery::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    pub fn nin<V: Into<Operand>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        FilterQuery::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        }
    }

    pub fn like(field: impl Into<String>, pattern: impl Into<Value>) -> Self {
        FilterQuery::Like {
            field: field.into(),
            pattern: pattern.into(),
            negated: false,
        }
    }

    pub fn not_like(field: impl Into<String>, pattern: impl Into<Value>) -> Self {
        FilterQuery::Like {
            field: field.into(),
            pattern: pattern.into(),
            negated: true,
        }
    }

    pub fn fragment(sql: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        FilterQuery::Fragment {
            sql: sql.into(),
            values: values.into_iter().collect(),
        }
    }

    /// Combine with another filter under `AND`, flattening an existing `AND`.
    pub fn and_with(self, other: FilterQuery) -> Self {
        if other.is_none() {
            return self;
        }
        match self {
            FilterQuery::And(mut children) => {
                children.push(other);
                FilterQuery::And(children)
            }
            filter => FilterQuery::And(vec![filter, other]),
        }
    }

    /// Combine with another filter under `OR`, flattening an existing `OR`.
    pub fn or_with(self, other: FilterQuery) -> Self {
        if self.is_none() {
            return other;
        }
        match self {
            FilterQuery::Or(mut children) => {
                children.push(other);
                FilterQuery::Or(children)
            }
            filter => FilterQuery::Or(vec![filter, other]),
        }
    }
}
