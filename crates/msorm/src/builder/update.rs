use std::sync::Arc;

use crate::buffer::BufferFactory;
use crate::filter::FilterQuery;
use crate::mutate::{Mutate, Mutates};
use crate::value::Value;

use super::traits::{FilterWriter, QueryWriter};

/// Renders `UPDATE` statements.
#[derive(Clone)]
pub struct UpdateBuilder {
    factory: BufferFactory,
    query: Arc<dyn QueryWriter>,
    filter: Arc<dyn FilterWriter>,
}

impl std::fmt::Debug for UpdateBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateBuilder")
            .field("factory", &self.factory)
            .finish_non_exhaustive()
    }
}

impl UpdateBuilder {
    pub fn new(
        factory: BufferFactory,
        query: Arc<dyn QueryWriter>,
        filter: Arc<dyn FilterWriter>,
    ) -> Self {
        Self {
            factory,
            query,
            filter,
        }
    }

    /// Whether `mutates` has anything to assign once `primary` is skipped.
    pub fn has_assignments(primary: &str, mutates: &Mutates) -> bool {
        mutates.keys().any(|field| field != primary)
    }

    /// Build `UPDATE [table] SET ... WHERE ...;`.
    ///
    /// The primary field is never assigned. `Inc` renders `[f]=[f]+@pN` and a
    /// `Fragment` writes its key verbatim with its values bound.
    pub fn build(
        &self,
        table: &str,
        primary: &str,
        mutates: &Mutates,
        filter: &FilterQuery,
    ) -> (String, Vec<Value>) {
        let mut buffer = self.factory.create();

        buffer.write_str("UPDATE ");
        buffer.write_escape(table);
        buffer.write_str(" SET ");

        let assignments = mutates.iter().filter(|(field, _)| field.as_str() != primary);
        for (i, (field, mutate)) in assignments.enumerate() {
            if i > 0 {
                buffer.write_char(',');
            }
            match mutate {
                Mutate::Set(value) => {
                    buffer.write_escape(field);
                    buffer.write_char('=');
                    buffer.write_value(value);
                }
                Mutate::Inc(value) => {
                    buffer.write_escape(field);
                    buffer.write_char('=');
                    buffer.write_escape(field);
                    buffer.write_char('+');
                    buffer.write_value(value);
                }
                Mutate::Fragment(values) => {
                    buffer.write_str(field);
                    buffer.add_arguments(values);
                }
            }
        }

        if !filter.is_none() {
            buffer.write_str(" WHERE ");
            self.filter.write(&mut buffer, filter, self.query.as_ref());
        }

        buffer.write_char(';');
        buffer.into_parts()
    }
}
