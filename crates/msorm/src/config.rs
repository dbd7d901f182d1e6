//! Dialect and adapter configuration.

use crate::builder::column::{ColumnMapper, map_column};

/// Identifier and value quoting rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quote {
    /// Opening identifier quote.
    pub id_prefix: String,
    /// Closing identifier quote.
    pub id_suffix: String,
    /// Replacement for a closing quote found inside an identifier.
    pub id_suffix_escape: String,
    /// String literal quote.
    pub value_quote: String,
    /// Replacement for a literal quote found inside a string literal.
    pub value_quote_escape: String,
}

impl Default for Quote {
    fn default() -> Self {
        Self {
            id_prefix: "[".to_string(),
            id_suffix: "]".to_string(),
            id_suffix_escape: "]]".to_string(),
            value_quote: "'".to_string(),
            value_quote_escape: "''".to_string(),
        }
    }
}

/// Rendering rules shared by every writer of a dialect.
///
/// The default is SQL Server: `@p1, @p2, ...` placeholders, bracketed
/// identifiers, `1`/`0` booleans and `^` as the escape bypass marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DialectConfig {
    /// Placeholder token written for each bound value.
    pub placeholder: String,
    /// Whether the placeholder is followed by its 1-based ordinal.
    pub ordinal: bool,
    /// Identifier and literal quoting.
    pub quote: Quote,
    /// Literal used for `true`.
    pub bool_true: String,
    /// Literal used for `false`.
    pub bool_false: String,
    /// Leading marker that disables identifier escaping.
    pub escape_bypass: char,
    /// Render values as SQL literals instead of placeholders.
    pub inline_values: bool,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            placeholder: "@p".to_string(),
            ordinal: true,
            quote: Quote::default(),
            bool_true: "1".to_string(),
            bool_false: "0".to_string(),
            escape_bypass: '^',
            inline_values: false,
        }
    }
}

impl DialectConfig {
    /// Create the SQL Server configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The same rules with values inlined as literals, for DDL statements.
    pub fn ddl(&self) -> Self {
        self.clone().with_inline_values(true)
    }

    /// Set the placeholder token.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Enable or disable ordinal numbering after the placeholder token.
    pub fn with_ordinal(mut self, ordinal: bool) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Set the quoting rules.
    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.quote = quote;
        self
    }

    /// Set the boolean literals.
    pub fn with_bool_literals(mut self, t: impl Into<String>, f: impl Into<String>) -> Self {
        self.bool_true = t.into();
        self.bool_false = f.into();
        self
    }

    /// Set the escape bypass marker.
    pub fn with_escape_bypass(mut self, marker: char) -> Self {
        self.escape_bypass = marker;
        self
    }

    /// Render values inline instead of binding them.
    pub fn with_inline_values(mut self, inline: bool) -> Self {
        self.inline_values = inline;
        self
    }
}

/// Configuration for a [`Dialect`](crate::Dialect) and its [`Adapter`](crate::Adapter).
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Rendering rules.
    pub dialect: DialectConfig,
    /// Column type mapper used by the schema writers.
    pub column_mapper: ColumnMapper,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            dialect: DialectConfig::default(),
            column_mapper: map_column,
        }
    }
}

impl AdapterConfig {
    /// Create the SQL Server adapter configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the dialect rules.
    pub fn with_dialect(mut self, dialect: DialectConfig) -> Self {
        self.dialect = dialect;
        self
    }

    /// Replace the column type mapper.
    pub fn with_column_mapper(mut self, mapper: ColumnMapper) -> Self {
        self.column_mapper = mapper;
        self
    }
}
