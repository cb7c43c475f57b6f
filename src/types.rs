use std::sync::LazyLock;

use regex::Regex;

/// Values that can appear in a result row or be bound as query parameters.
///
/// One enum is shared between the inline statement preparer and the wire codec so
/// helper functions never branch on driver types:
/// ```rust
/// use pipeline_middleware::prelude::*;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// NULL value
    Null,
    /// Ordered list of values; used by the statement preparer for comma-joined
    /// substitution (`IN (...)` style) and as an argument-unpacking convenience.
    List(Vec<RowValues>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let RowValues::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[RowValues]> {
        if let RowValues::List(values) = self {
            Some(values)
        } else {
            None
        }
    }
}

static DDL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(create|alter|truncate|drop)\s").expect("valid DDL regex")
});

static DML_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(insert|delete|update|replace)\s").expect("valid DML regex")
});

/// Coarse statement classification by leading keyword.
///
/// The classification drives which fields of a pipeline result are authoritative:
/// DDL statements report only success, DML statements report affected rows and the
/// last insert rowid, everything else is treated as a row-producing query.
///
/// Callers must classify the SQL actually sent to the server (post-translation),
/// since dialect translation can change the leading keyword (upsert rewrites
/// `INSERT` to `REPLACE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `CREATE`, `ALTER`, `TRUNCATE`, `DROP`
    Ddl,
    /// `INSERT`, `DELETE`, `UPDATE`, `REPLACE`
    Dml,
    /// Anything else, assumed to produce rows.
    Select,
}

impl StatementKind {
    #[must_use]
    pub fn classify(sql: &str) -> Self {
        if DDL_RE.is_match(sql) {
            StatementKind::Ddl
        } else if DML_RE.is_match(sql) {
            StatementKind::Dml
        } else {
            StatementKind::Select
        }
    }
}
