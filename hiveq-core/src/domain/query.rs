// hiveq-core/src/domain/query.rs

use crate::domain::error::DomainError;
use std::fmt;
use std::path::PathBuf;

/// Where the configuration says the SQL lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    Inline(String),
    File(PathBuf),
}

/// A non-blank SQL statement. Surrounding whitespace is trimmed, the rest
/// reaches the driver verbatim (no splitting, no binding).
///
/// Construction is the only validation point: once a `Query` exists the
/// executor never has to check for blank input again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn parse(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyQuery);
        }
        Ok(Query(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
