use crate::buffer::Buffer;
use crate::filter::{FilterQuery, Operand, SubQuery};

use super::traits::{FilterWriter, QueryWriter};

/// Renders [`FilterQuery`] trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Filter;

impl Filter {
    pub fn new() -> Self {
        Self
    }

    fn write_logical(
        &self,
        buffer: &mut Buffer,
        op: &str,
        children: &[FilterQuery],
        query: &dyn QueryWriter,
    ) {
        let children: Vec<&FilterQuery> = children.iter().filter(|c| !c.is_none()).collect();
        let grouped = children.len() > 1;

        if grouped {
            buffer.write_char('(');
        }
        for (i, child) in children.into_iter().enumerate() {
            if i > 0 {
                buffer.write_str(op);
            }
            self.write(buffer, child, query);
        }
        if grouped {
            buffer.write_char(')');
        }
    }

    fn write_operand(&self, buffer: &mut Buffer, operand: &Operand, query: &dyn QueryWriter) {
        match operand {
            Operand::Value(value) => {
                buffer.write_value(value);
            }
            Operand::Query(q) => {
                buffer.write_char('(');
                query.write(buffer, q);
                buffer.write_char(')');
            }
            Operand::SubQuery(sub) => {
                buffer.write_str(&sub.prefix);
                buffer.write_char('(');
                query.write(buffer, &sub.query);
                buffer.write_char(')');
            }
        }
    }

    fn write_in(
        &self,
        buffer: &mut Buffer,
        field: &str,
        values: &[Operand],
        negated: bool,
        query: &dyn QueryWriter,
    ) {
        if values.is_empty() {
            // `IN ()` is not valid T-SQL.
            buffer.write_str(if negated { "1=1" } else { "1=0" });
            return;
        }

        buffer.write_escape(field);
        buffer.write_str(if negated { " NOT IN " } else { " IN " });

        // A lone subquery is the whole list; a prefix has no meaning after `IN`.
        if let [Operand::Query(q) | Operand::SubQuery(SubQuery { query: q, .. })] = values {
            buffer.write_char('(');
            query.write(buffer, q);
            buffer.write_char(')');
            return;
        }

        buffer.write_char('(');
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                buffer.write_char(',');
            }
            self.write_operand(buffer, value, query);
        }
        buffer.write_char(')');
    }
}

impl FilterWriter for Filter {
    fn write(&self, buffer: &mut Buffer, filter: &FilterQuery, query: &dyn QueryWriter) {
        match filter {
            FilterQuery::And(children) => self.write_logical(buffer, " AND ", children, query),
            FilterQuery::Or(children) => self.write_logical(buffer, " OR ", children, query),
            FilterQuery::Not(children) => {
                if filter.is_none() {
                    return;
                }
                buffer.write_str("NOT ");
                self.write_logical(buffer, " AND ", children, query);
            }
            FilterQuery::Compare { field, op, value } => {
                buffer.write_escape(field);
                buffer.write_str(op.as_sql());
                self.write_operand(buffer, value, query);
            }
            FilterQuery::Nil { field, negated } => {
                buffer.write_escape(field);
                buffer.write_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            FilterQuery::In {
                field,
                values,
                negated,
            } => self.write_in(buffer, field, values, *negated, query),
            FilterQuery::Like {
                field,
                pattern,
                negated,
            } => {
                buffer.write_escape(field);
                buffer.write_str(if *negated { " NOT LIKE " } else { " LIKE " });
                buffer.write_value(pattern);
            }
            FilterQuery::Fragment { sql, values } => {
                buffer.write_str(sql);
                buffer.add_arguments(values);
            }
        }
    }
}
