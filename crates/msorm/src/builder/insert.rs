use crate::buffer::{Buffer, BufferFactory};
use crate::mutate::Mutates;
use crate::value::Value;

/// Renders single-row `INSERT` statements.
#[derive(Debug, Clone, Default)]
pub struct InsertBuilder {
    factory: BufferFactory,
}

impl InsertBuilder {
    pub fn new(factory: BufferFactory) -> Self {
        Self { factory }
    }

    /// Build `INSERT INTO [table] (...) OUTPUT [INSERTED].[primary] VALUES (...);`.
    ///
    /// Only `Set` operations are inserted. When `primary` is set explicitly
    /// the statement is wrapped in `IDENTITY_INSERT` toggles.
    pub fn build(&self, table: &str, primary: &str, mutates: &Mutates) -> (String, Vec<Value>) {
        let mut buffer = self.factory.create();
        let identity_insert = !primary.is_empty()
            && mutates.get(primary).and_then(|m| m.set_value()).is_some();

        if identity_insert {
            write_identity_insert(&mut buffer, table, true);
            buffer.write_char(' ');
        }

        buffer.write_str("INSERT INTO ");
        buffer.write_escape(table);

        let sets: Vec<(&str, &Value)> = mutates
            .iter()
            .filter_map(|(field, mutate)| mutate.set_value().map(|v| (field.as_str(), v)))
            .collect();

        if !sets.is_empty() {
            buffer.write_str(" (");
            for (i, (field, _)) in sets.iter().enumerate() {
                if i > 0 {
                    buffer.write_char(',');
                }
                buffer.write_escape(field);
            }
            buffer.write_char(')');
        }

        write_output(&mut buffer, primary);

        if sets.is_empty() {
            buffer.write_str(" DEFAULT VALUES");
        } else {
            buffer.write_str(" VALUES (");
            buffer.write_values(sets.iter().map(|(_, v)| *v));
            buffer.write_char(')');
        }
        buffer.write_char(';');

        if identity_insert {
            buffer.write_char(' ');
            write_identity_insert(&mut buffer, table, false);
        }

        buffer.into_parts()
    }
}

pub(crate) fn write_identity_insert(buffer: &mut Buffer, table: &str, on: bool) {
    buffer.write_str("SET IDENTITY_INSERT ");
    buffer.write_escape(table);
    buffer.write_str(if on { " ON;" } else { " OFF;" });
}

pub(crate) fn write_output(buffer: &mut Buffer, primary: &str) {
    if primary.is_empty() {
        return;
    }
    buffer.write_str(" OUTPUT ");
    buffer.write_escape(&format!("INSERTED.{primary}"));
}
