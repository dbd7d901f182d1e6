//! Column type mapping.

use crate::schema::{Column, ColumnType};

/// Longest `NVARCHAR(n)` SQL Server accepts.
pub const MAX_NVARCHAR_LENGTH: u32 = 4000;

/// Length used for string columns without a limit.
pub const DEFAULT_STRING_LENGTH: u32 = 255;

/// Native type of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub sql_type: String,
    /// First size parameter, `0` for none.
    pub size: u32,
    /// Second size parameter, `0` for none.
    pub scale: u32,
    /// `chrono` layout for date/time defaults.
    pub time_format: Option<&'static str>,
}

impl MappedType {
    fn plain(sql_type: impl Into<String>) -> Self {
        Self {
            sql_type: sql_type.into(),
            size: 0,
            scale: 0,
            time_format: None,
        }
    }

    fn sized(mut self, size: u32, scale: u32) -> Self {
        self.size = size;
        self.scale = scale;
        self
    }

    fn with_time_format(mut self, layout: &'static str) -> Self {
        self.time_format = Some(layout);
        self
    }
}

/// Maps a column to its native type.
pub type ColumnMapper = fn(&Column) -> MappedType;

/// SQL Server column mapping.
pub fn map_column(column: &Column) -> MappedType {
    match &column.ty {
        ColumnType::Id => MappedType::plain("INT NOT NULL IDENTITY(1,1)"),
        ColumnType::BigId => MappedType::plain("BIGINT NOT NULL IDENTITY(1,1)"),
        ColumnType::Bool => MappedType::plain("BIT"),
        ColumnType::Int => MappedType::plain("INT"),
        ColumnType::BigInt => MappedType::plain("BIGINT"),
        ColumnType::Float => MappedType::plain("FLOAT").sized(column.precision, 0),
        ColumnType::Decimal => {
            MappedType::plain("DECIMAL").sized(column.precision, column.scale)
        }
        ColumnType::String => {
            let limit = match column.limit {
                0 => DEFAULT_STRING_LENGTH,
                n => n.min(MAX_NVARCHAR_LENGTH),
            };
            MappedType::plain("NVARCHAR").sized(limit, 0)
        }
        ColumnType::Text | ColumnType::Json => MappedType::plain("NVARCHAR(MAX)"),
        ColumnType::Date => MappedType::plain("DATE").with_time_format("%Y-%m-%d"),
        ColumnType::DateTime => {
            MappedType::plain("DATETIMEOFFSET").with_time_format("%Y-%m-%d %H:%M:%S")
        }
        ColumnType::Time => MappedType::plain("TIME").with_time_format("%H:%M:%S"),
        ColumnType::Custom(native) => MappedType::plain(native.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped(column: Column) -> (String, u32, u32) {
        let m = map_column(&column);
        (m.sql_type, m.size, m.scale)
    }

    #[test]
    fn identity_types() {
        assert_eq!(
            mapped(Column::new("id", ColumnType::Id)).0,
            "INT NOT NULL IDENTITY(1,1)"
        );
        assert_eq!(
            mapped(Column::new("id", ColumnType::BigId)).0,
            "BIGINT NOT NULL IDENTITY(1,1)"
        );
    }

    #[test]
    fn string_limits() {
        assert_eq!(
            mapped(Column::new("s", ColumnType::String)),
            ("NVARCHAR".into(), 255, 0)
        );
        assert_eq!(
            mapped(Column::new("s", ColumnType::String).limit(50)),
            ("NVARCHAR".into(), 50, 0)
        );
        assert_eq!(
            mapped(Column::new("s", ColumnType::String).limit(10_000)),
            ("NVARCHAR".into(), 4000, 0)
        );
    }

    #[test]
    fn numeric_precision() {
        assert_eq!(
            mapped(Column::new("d", ColumnType::Decimal).precision(10).scale(2)),
            ("DECIMAL".into(), 10, 2)
        );
        assert_eq!(
            mapped(Column::new("f", ColumnType::Float).precision(24)),
            ("FLOAT".into(), 24, 0)
        );
    }

    #[test]
    fn text_and_temporal_types() {
        assert_eq!(mapped(Column::new("t", ColumnType::Text)).0, "NVARCHAR(MAX)");
        assert_eq!(mapped(Column::new("j", ColumnType::Json)).0, "NVARCHAR(MAX)");
        let dt = map_column(&Column::new("at", ColumnType::DateTime));
        assert_eq!(dt.sql_type, "DATETIMEOFFSET");
        assert_eq!(dt.time_format, Some("%Y-%m-%d %H:%M:%S"));
        assert_eq!(map_column(&Column::new("b", ColumnType::Bool)).sql_type, "BIT");
    }

    #[test]
    fn custom_passes_through() {
        assert_eq!(
            mapped(Column::new("g", ColumnType::Custom("GEOGRAPHY".into()))).0,
            "GEOGRAPHY"
        );
    }
}
