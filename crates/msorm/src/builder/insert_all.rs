use crate::buffer::BufferFactory;
use crate::mutate::Mutates;
use crate::value::Value;

use super::insert::{write_identity_insert, write_output};

/// Renders multi-row `INSERT` statements.
#[derive(Debug, Clone, Default)]
pub struct InsertAllBuilder {
    factory: BufferFactory,
}

impl InsertAllBuilder {
    pub fn new(factory: BufferFactory) -> Self {
        Self { factory }
    }

    /// Build one `INSERT` with a `VALUES` tuple per row.
    ///
    /// Columns come from `fields`; a field a row does not `Set` renders
    /// `DEFAULT`. `IDENTITY_INSERT` is toggled when `fields` contains
    /// `primary`.
    pub fn build(
        &self,
        table: &str,
        primary: &str,
        fields: &[String],
        rows: &[Mutates],
    ) -> (String, Vec<Value>) {
        let mut buffer = self.factory.create();
        let identity_insert = !primary.is_empty() && fields.iter().any(|f| f == primary);

        if identity_insert {
            write_identity_insert(&mut buffer, table, true);
            buffer.write_char(' ');
        }

        buffer.write_str("INSERT INTO ");
        buffer.write_escape(table);

        if fields.is_empty() {
            write_output(&mut buffer, primary);
            buffer.write_str(" DEFAULT VALUES;");
        } else {
            buffer.write_str(" (");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    buffer.write_char(',');
                }
                buffer.write_escape(field);
            }
            buffer.write_char(')');

            write_output(&mut buffer, primary);
            buffer.write_str(" VALUES ");

            for (i, row) in rows.iter().enumerate() {
                if i > 0 {
                    buffer.write_char(',');
                }
                buffer.write_char('(');
                for (j, field) in fields.iter().enumerate() {
                    if j > 0 {
                        buffer.write_char(',');
                    }
                    match row.get(field).and_then(|m| m.set_value()) {
                        Some(value) => buffer.write_value(value),
                        None => buffer.write_str("DEFAULT"),
                    };
                }
                buffer.write_char(')');
            }
            buffer.write_char(';');
        }

        if identity_insert {
            buffer.write_char(' ');
            write_identity_insert(&mut buffer, table, false);
        }

        buffer.into_parts()
    }
}
