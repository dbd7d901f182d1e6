//! Schema AST for table and index migrations.

use crate::filter::FilterQuery;
use crate::value::Value;

/// Schema operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaOp {
    #[default]
    Create,
    Alter,
    Rename,
    Drop,
}

/// Semantic column type, mapped to a native type by a
/// [`ColumnMapper`](crate::builder::ColumnMapper).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColumnType {
    Id,
    BigId,
    Bool,
    #[default]
    Int,
    BigInt,
    Float,
    Decimal,
    String,
    Text,
    Json,
    Date,
    DateTime,
    Time,
    /// Native type passed through verbatim.
    Custom(String),
}

/// Column definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub op: SchemaOp,
    pub rename: String,
    pub unique: bool,
    pub required: bool,
    pub primary: bool,
    pub limit: u32,
    pub precision: u32,
    pub scale: u32,
    pub default: Option<Value>,
    pub options: String,
}

impl Column {
    /// A column to add.
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            ..Default::default()
        }
    }

    /// A column to rename.
    pub fn rename(name: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op: SchemaOp::Rename,
            rename: to.into(),
            ..Default::default()
        }
    }

    /// A column to drop.
    pub fn drop(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op: SchemaOp::Drop,
            ..Default::default()
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }
}

/// Key constraint type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyType {
    #[default]
    Primary,
    Unique,
    Foreign,
}

impl KeyType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            KeyType::Primary => "PRIMARY KEY",
            KeyType::Unique => "UNIQUE",
            KeyType::Foreign => "FOREIGN KEY",
        }
    }
}

/// Target of a foreign key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKeyReference {
    pub table: String,
    pub columns: Vec<String>,
    pub on_delete: String,
    pub on_update: String,
}

/// Key constraint definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Key {
    pub op: SchemaOp,
    pub name: String,
    pub ty: KeyType,
    pub columns: Vec<String>,
    pub rename: String,
    pub reference: Option<ForeignKeyReference>,
    pub options: String,
}

impl Key {
    fn with_columns<S: Into<String>>(ty: KeyType, columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            ty,
            columns: columns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn primary<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self::with_columns(KeyType::Primary, columns)
    }

    pub fn unique<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self::with_columns(KeyType::Unique, columns)
    }

    pub fn foreign<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        reference: ForeignKeyReference,
    ) -> Self {
        Self {
            reference: Some(reference),
            ..Self::with_columns(KeyType::Foreign, columns)
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }
}

/// One entry of a table definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Column(Column),
    Key(Key),
    Raw(String),
}

impl From<Column> for Definition {
    fn from(c: Column) -> Self {
        Definition::Column(c)
    }
}

impl From<Key> for Definition {
    fn from(k: Key) -> Self {
        Definition::Key(k)
    }
}

/// Table migration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub op: SchemaOp,
    pub name: String,
    pub rename: String,
    /// Guard the statement with an existence check.
    pub optional: bool,
    pub definitions: Vec<Definition>,
    pub options: String,
}

impl Table {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Create,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn alter(name: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Alter,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn rename(name: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Rename,
            name: name.into(),
            rename: to.into(),
            ..Default::default()
        }
    }

    pub fn drop(name: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Drop,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn definition(mut self, def: impl Into<Definition>) -> Self {
        self.definitions.push(def.into());
        self
    }

    pub fn column(self, column: Column) -> Self {
        self.definition(column)
    }

    pub fn key(self, key: Key) -> Self {
        self.definition(key)
    }

    pub fn raw(self, sql: impl Into<String>) -> Self {
        self.definition(Definition::Raw(sql.into()))
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }
}

/// Index migration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    pub op: SchemaOp,
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
    pub unique: bool,
    pub optional: bool,
    /// Extra predicate for a filtered index.
    pub filter: FilterQuery,
    pub options: String,
}

impl Index {
    pub fn create<S: Into<String>>(
        table: impl Into<String>,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            op: SchemaOp::Create,
            table: table.into(),
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn drop(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Drop,
            table: table.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn filter(mut self, filter: FilterQuery) -> Self {
        self.filter = filter;
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }
}
