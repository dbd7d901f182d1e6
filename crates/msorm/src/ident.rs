//! SQL identifier escaping.
//!
//! [`Escaper`] turns table and column references into bracketed T-SQL
//! identifiers:
//!
//! - `user.name` → `[user].[name]`
//! - `user.*` → `[user].*`
//! - `count(*) as total` → `count(*) AS [total]`
//! - `^NOW()` → `NOW()` (the leading marker disables escaping)
//!
//! Results are memoized in an [`EscapeCache`], which is shared by every
//! writer of one [`Dialect`](crate::Dialect).
//!
//! # Example
//! ```ignore
//! use msorm::{DialectConfig, Escaper};
//!
//! let escaper = Escaper::new(&DialectConfig::default());
//! assert_eq!(escaper.escape("users.id"), "[users].[id]");
//! ```

use std::sync::Arc;

use dashmap::DashMap;

use crate::config::DialectConfig;

/// The subset of [`DialectConfig`] that affects identifier escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EscapeRules {
    prefix: String,
    suffix: String,
    suffix_escape: String,
    bypass: char,
}

impl EscapeRules {
    fn from_config(config: &DialectConfig) -> Self {
        Self {
            prefix: config.quote.id_prefix.clone(),
            suffix: config.quote.id_suffix.clone(),
            suffix_escape: config.quote.id_suffix_escape.clone(),
            bypass: config.escape_bypass,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    rules: Arc<EscapeRules>,
    field: String,
}

/// Concurrent memo of escaped identifiers.
///
/// Entries are never evicted: the set of identifiers an application uses is
/// small and fixed.
#[derive(Debug, Default)]
pub struct EscapeCache {
    entries: DashMap<CacheKey, String>,
}

impl EscapeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Escapes identifiers according to a dialect's quoting rules.
#[derive(Debug, Clone)]
pub struct Escaper {
    rules: Arc<EscapeRules>,
    cache: Arc<EscapeCache>,
}

impl Escaper {
    /// Create an escaper with its own cache.
    pub fn new(config: &DialectConfig) -> Self {
        Self::with_cache(config, Arc::new(EscapeCache::new()))
    }

    /// Create an escaper backed by a shared cache.
    pub fn with_cache(config: &DialectConfig, cache: Arc<EscapeCache>) -> Self {
        Self {
            rules: Arc::new(EscapeRules::from_config(config)),
            cache,
        }
    }

    /// The cache backing this escaper.
    pub fn cache(&self) -> &Arc<EscapeCache> {
        &self.cache
    }

    /// Escape a field or table reference.
    pub fn escape(&self, field: &str) -> String {
        if field.is_empty()
            || field == "*"
            || (self.rules.prefix.is_empty() && self.rules.suffix.is_empty())
        {
            return field.to_string();
        }

        let key = CacheKey {
            rules: Arc::clone(&self.rules),
            field: field.to_string(),
        };
        if let Some(hit) = self.cache.entries.get(&key) {
            return hit.value().clone();
        }

        // Computed without holding a shard guard: escaping recurses.
        let escaped = self.compute(field);
        self.cache.entries.insert(key, escaped.clone());
        escaped
    }

    fn compute(&self, field: &str) -> String {
        if let Some(raw) = field.strip_prefix(self.rules.bypass) {
            return raw.to_string();
        }

        if let Some(i) = field.to_ascii_lowercase().find(" as ") {
            return format!(
                "{} AS {}",
                self.escape(&field[..i]),
                self.escape(&field[i + 4..])
            );
        }

        if let Some((open, close)) = paren_span(field) {
            return format!(
                "{}{}{}",
                &field[..=open],
                self.escape(&field[open + 1..close]),
                &field[close..]
            );
        }

        if let Some(qualifier) = field.strip_suffix(".*") {
            return format!("{}.*", self.quote_segments(qualifier));
        }

        if field.ends_with('*') {
            return field.to_string();
        }

        self.quote_segments(field)
    }

    fn quote_segments(&self, field: &str) -> String {
        let rules = &self.rules;
        let mut out = String::with_capacity(field.len() + 4);
        for (i, segment) in field.split('.').enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&rules.prefix);
            if rules.suffix.is_empty() {
                out.push_str(segment);
            } else {
                out.push_str(&segment.replace(rules.suffix.as_str(), &rules.suffix_escape));
            }
            out.push_str(&rules.suffix);
        }
        out
    }
}

/// Byte offsets of the first `(` and its matching `)`.
fn paren_span(field: &str) -> Option<(usize, usize)> {
    let open = field.find('(')?;
    let mut depth = 0usize;
    for (i, c) in field[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some((open, open + i));
                }
            }
            _ => {}
        }
    }
    None
}
