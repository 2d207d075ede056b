// hiveq-core/src/infrastructure/bridge/types.rs

/// How a result column is read out of a `java.sql.ResultSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Bool,
    Int,
    Float,
    /// Everything else, read with `getString` (DECIMAL, dates, maps, arrays...).
    Text,
}

// Constants from java.sql.Types
const BIT: i32 = -7;
const TINYINT: i32 = -6;
const BIGINT: i32 = -5;
const INTEGER: i32 = 4;
const SMALLINT: i32 = 5;
const FLOAT: i32 = 6;
const REAL: i32 = 7;
const DOUBLE: i32 = 8;
const BOOLEAN: i32 = 16;

impl ColumnKind {
    pub fn from_sql_type(sql_type: i32) -> Self {
        match sql_type {
            BOOLEAN | BIT => ColumnKind::Bool,
            TINYINT | SMALLINT | INTEGER | BIGINT => ColumnKind::Int,
            FLOAT | REAL | DOUBLE => ColumnKind::Float,
            _ => ColumnKind::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_type_mapping() {
        assert_eq!(ColumnKind::from_sql_type(16), ColumnKind::Bool);
        assert_eq!(ColumnKind::from_sql_type(-5), ColumnKind::Int);
        assert_eq!(ColumnKind::from_sql_type(4), ColumnKind::Int);
        assert_eq!(ColumnKind::from_sql_type(8), ColumnKind::Float);
        // DECIMAL keeps its exact text form
        assert_eq!(ColumnKind::from_sql_type(3), ColumnKind::Text);
        // VARCHAR, TIMESTAMP, ARRAY
        assert_eq!(ColumnKind::from_sql_type(12), ColumnKind::Text);
        assert_eq!(ColumnKind::from_sql_type(93), ColumnKind::Text);
        assert_eq!(ColumnKind::from_sql_type(2003), ColumnKind::Text);
    }
}
