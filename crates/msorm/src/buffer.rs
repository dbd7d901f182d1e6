//! Statement buffer: SQL text plus the ordered argument list.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::config::DialectConfig;
use crate::ident::{EscapeCache, Escaper};
use crate::value::{Value, write_quoted};

/// Accumulates SQL text and the arguments bound to its placeholders.
///
/// A buffer belongs to exactly one build call. Placeholders are numbered by
/// argument position, so the placeholder for the Nth argument is always
/// `@pN`, including across nested subqueries and raw fragments written into
/// the same buffer.
#[derive(Debug, Clone)]
pub struct Buffer {
    sql: String,
    arguments: Vec<Value>,
    config: Arc<DialectConfig>,
    escaper: Escaper,
}

impl Buffer {
    /// Create an empty buffer.
    pub fn new(config: Arc<DialectConfig>, escaper: Escaper) -> Self {
        Self {
            sql: String::new(),
            arguments: Vec::new(),
            config,
            escaper,
        }
    }

    /// Append raw SQL text.
    pub fn write_str(&mut self, s: &str) -> &mut Self {
        self.sql.push_str(s);
        self
    }

    /// Append a single character.
    pub fn write_char(&mut self, c: char) -> &mut Self {
        self.sql.push(c);
        self
    }

    /// Append an escaped identifier.
    pub fn write_escape(&mut self, field: &str) -> &mut Self {
        let escaped = self.escaper.escape(field);
        self.sql.push_str(&escaped);
        self
    }

    /// Append a value.
    ///
    /// Writes the next placeholder and binds `value`, or in inline mode
    /// writes `value` as a SQL literal.
    pub fn write_value(&mut self, value: &Value) -> &mut Self {
        if self.config.inline_values {
            value.write_literal(&mut self.sql, &self.config);
            return self;
        }

        self.arguments.push(value.clone());
        self.sql.push_str(&self.config.placeholder);
        if self.config.ordinal {
            let _ = write!(self.sql, "{}", self.arguments.len());
        }
        self
    }

    /// Append a quoted string literal, doubling embedded quotes.
    pub fn write_quoted(&mut self, s: &str) -> &mut Self {
        write_quoted(&mut self.sql, s, &self.config);
        self
    }

    /// Append a comma-separated list of values.
    pub fn write_values<'a>(&mut self, values: impl IntoIterator<Item = &'a Value>) -> &mut Self {
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.sql.push(',');
            }
            self.write_value(value);
        }
        self
    }

    /// Bind arguments without writing placeholders.
    ///
    /// Used for raw fragments that already contain their own placeholders;
    /// the arguments still take their positions in the numbering.
    pub fn add_arguments<'a>(&mut self, values: impl IntoIterator<Item = &'a Value>) -> &mut Self {
        self.arguments.extend(values.into_iter().cloned());
        self
    }

    /// The escaper used by [`write_escape`](Buffer::write_escape).
    pub fn escaper(&self) -> &Escaper {
        &self.escaper
    }

    /// Length of the SQL text so far.
    pub fn len(&self) -> usize {
        self.sql.len()
    }

    /// Whether no SQL text has been written.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// The SQL text so far.
    pub fn as_str(&self) -> &str {
        &self.sql
    }

    /// The arguments bound so far.
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// Consume the buffer into its SQL text and arguments.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.arguments)
    }

    /// Consume the buffer into its SQL text.
    pub fn into_sql(self) -> String {
        self.sql
    }
}

/// Creates buffers that share one configuration and escape cache.
#[derive(Debug, Clone)]
pub struct BufferFactory {
    config: Arc<DialectConfig>,
    escaper: Escaper,
}

impl BufferFactory {
    /// Create a factory with its own escape cache.
    pub fn new(config: DialectConfig) -> Self {
        Self::with_cache(config, Arc::new(EscapeCache::new()))
    }

    /// Create a factory backed by a shared escape cache.
    pub fn with_cache(config: DialectConfig, cache: Arc<EscapeCache>) -> Self {
        let escaper = Escaper::with_cache(&config, cache);
        Self {
            config: Arc::new(config),
            escaper,
        }
    }

    /// Create a new empty buffer.
    pub fn create(&self) -> Buffer {
        Buffer::new(Arc::clone(&self.config), self.escaper.clone())
    }

    /// The configuration handed to each buffer.
    pub fn config(&self) -> &DialectConfig {
        &self.config
    }
}

impl Default for BufferFactory {
    fn default() -> Self {
        Self::new(DialectConfig::default())
    }
}
