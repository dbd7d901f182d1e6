use tracing::trace;

use crate::buffer::{Buffer, BufferFactory};
use crate::config::DialectConfig;
use crate::error::{OrmError, OrmResult};
use crate::schema::{Column, Definition, Key, KeyType, SchemaOp, Table};
use crate::value::Value;

use super::column::{ColumnMapper, map_column};

/// Renders table migrations.
///
/// Values (column defaults) are written as literals, never bound.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    factory: BufferFactory,
    mapper: ColumnMapper,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new(BufferFactory::new(DialectConfig::default().ddl()), map_column)
    }
}

impl TableBuilder {
    pub fn new(factory: BufferFactory, mapper: ColumnMapper) -> Self {
        Self { factory, mapper }
    }

    /// Build the statement(s) for one table operation.
    ///
    /// An alter renders one `;`-terminated statement per definition.
    pub fn build(&self, table: &Table) -> OrmResult<String> {
        let mut buffer = self.factory.create();

        match table.op {
            SchemaOp::Create => self.write_create(&mut buffer, table),
            SchemaOp::Alter => self.write_alter(&mut buffer, table)?,
            SchemaOp::Rename => self.write_rename(&mut buffer, table),
            SchemaOp::Drop => self.write_drop(&mut buffer, table),
        }

        Ok(buffer.into_sql())
    }

    fn write_create(&self, buffer: &mut Buffer, table: &Table) {
        if table.optional {
            write_object_guard(buffer, &table.name, "IS NULL");
        }

        buffer.write_str("CREATE TABLE ");
        buffer.write_escape(&table.name);

        if !table.definitions.is_empty() {
            buffer.write_str(" (");
            for (i, def) in table.definitions.iter().enumerate() {
                if i > 0 {
                    buffer.write_str(", ");
                }
                match def {
                    Definition::Column(column) => self.write_column(buffer, column),
                    Definition::Key(key) => self.write_key(buffer, key),
                    Definition::Raw(sql) => {
                        buffer.write_str(sql);
                    }
                }
            }
            buffer.write_char(')');
        }

        write_options(buffer, &table.options);
        buffer.write_char(';');
    }

    fn write_alter(&self, buffer: &mut Buffer, table: &Table) -> OrmResult<()> {
        for def in &table.definitions {
            if let Definition::Column(column) = def {
                if column.op == SchemaOp::Rename {
                    buffer.write_str("EXEC sp_rename '");
                    buffer.write_escape(&table.name);
                    buffer.write_char('.');
                    buffer.write_escape(&column.name);
                    buffer.write_str("', ");
                    buffer.write_escape(&column.rename);
                    buffer.write_str(", 'COLUMN';");
                    continue;
                }
            }

            buffer.write_str("ALTER TABLE ");
            buffer.write_escape(&table.name);
            buffer.write_char(' ');

            match def {
                Definition::Column(column) => match column.op {
                    SchemaOp::Create => {
                        buffer.write_str("ADD ");
                        self.write_column(buffer, column);
                    }
                    SchemaOp::Drop => {
                        buffer.write_str("DROP COLUMN ");
                        buffer.write_escape(&column.name);
                    }
                    SchemaOp::Alter | SchemaOp::Rename => {
                        return Err(unsupported(format!(
                            "altering column {} of table {}",
                            column.name, table.name
                        )));
                    }
                },
                Definition::Key(key) => match key.op {
                    SchemaOp::Create => {
                        buffer.write_str("ADD ");
                        self.write_key(buffer, key);
                    }
                    op => {
                        return Err(unsupported(format!(
                            "{op:?} of key {:?} on table {}",
                            key.name, table.name
                        )));
                    }
                },
                Definition::Raw(sql) => {
                    buffer.write_str(sql);
                }
            }

            write_options(buffer, &table.options);
            buffer.write_char(';');
        }

        Ok(())
    }

    fn write_rename(&self, buffer: &mut Buffer, table: &Table) {
        buffer.write_str("EXEC sp_rename ");
        buffer.write_escape(&table.name);
        buffer.write_str(", ");
        buffer.write_escape(&table.rename);
        buffer.write_char(';');
    }

    fn write_drop(&self, buffer: &mut Buffer, table: &Table) {
        if table.optional {
            write_object_guard(buffer, &table.name, "IS NOT NULL");
        }

        buffer.write_str("DROP TABLE ");
        buffer.write_escape(&table.name);
        buffer.write_char(';');
    }

    fn write_column(&self, buffer: &mut Buffer, column: &Column) {
        let mapped = (self.mapper)(column);

        buffer.write_escape(&column.name);
        buffer.write_char(' ');
        buffer.write_str(&mapped.sql_type);

        if mapped.size != 0 {
            buffer.write_char('(');
            buffer.write_str(&mapped.size.to_string());
            if mapped.scale != 0 {
                buffer.write_char(',');
                buffer.write_str(&mapped.scale.to_string());
            }
            buffer.write_char(')');
        }

        if column.unique {
            buffer.write_str(" UNIQUE");
        }
        if column.required {
            buffer.write_str(" NOT NULL");
        }
        if column.primary {
            buffer.write_str(" PRIMARY KEY");
        }

        if let Some(default) = &column.default {
            buffer.write_str(" DEFAULT ");
            write_default(buffer, default, mapped.time_format);
        }

        write_options(buffer, &column.options);
    }

    fn write_key(&self, buffer: &mut Buffer, key: &Key) {
        if !key.name.is_empty() {
            buffer.write_str("CONSTRAINT ");
            buffer.write_escape(&key.name);
            buffer.write_char(' ');
        }

        buffer.write_str(key.ty.as_sql());

        write_column_list(buffer, &key.columns);

        let reference = key.reference.as_ref().filter(|_| key.ty == KeyType::Foreign);
        if let Some(reference) = reference {
            buffer.write_str(" REFERENCES ");
            buffer.write_escape(&reference.table);
            write_column_list(buffer, &reference.columns);

            if !reference.on_delete.is_empty() {
                buffer.write_str(" ON DELETE ");
                buffer.write_str(&reference.on_delete);
            }
            if !reference.on_update.is_empty() {
                buffer.write_str(" ON UPDATE ");
                buffer.write_str(&reference.on_update);
            }
        }

        write_options(buffer, &key.options);
    }
}

fn unsupported(message: String) -> OrmError {
    trace!(target: "msorm.sql", %message, "unsupported schema operation");
    OrmError::unsupported(message)
}

/// `IF OBJECT_ID('[t]', 'U') <check> `
fn write_object_guard(buffer: &mut Buffer, table: &str, check: &str) {
    buffer.write_str("IF OBJECT_ID('");
    buffer.write_escape(table);
    buffer.write_str("', 'U') ");
    buffer.write_str(check);
    buffer.write_char(' ');
}

/// ` ([a], [b])`
pub(crate) fn write_column_list(buffer: &mut Buffer, columns: &[String]) {
    buffer.write_str(" (");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            buffer.write_str(", ");
        }
        buffer.write_escape(column);
    }
    buffer.write_char(')');
}

pub(crate) fn write_options(buffer: &mut Buffer, options: &str) {
    if options.is_empty() {
        return;
    }
    buffer.write_char(' ');
    buffer.write_str(options);
}

fn write_default(buffer: &mut Buffer, value: &Value, time_format: Option<&'static str>) {
    let layout = |fallback: &'static str| time_format.unwrap_or(fallback);
    let formatted = match value {
        Value::Date(d) => d.format(layout("%Y-%m-%d")).to_string(),
        Value::Time(t) => t.format(layout("%H:%M:%S")).to_string(),
        Value::DateTime(dt) => dt.format(layout("%Y-%m-%d %H:%M:%S")).to_string(),
        Value::DateTimeOffset(dt) => dt.format(layout("%Y-%m-%d %H:%M:%S")).to_string(),
        Value::Int(_) | Value::Float(_) => {
            if let Ok(json) = serde_json::to_string(value) {
                buffer.write_str(&json);
                return;
            }
            buffer.write_value(value);
            return;
        }
        _ => {
            buffer.write_value(value);
            return;
        }
    };
    buffer.write_quoted(&formatted);
}
