// hiveq-core/src/ports/connector.rs

// What the export pipeline needs from a database, without knowing that a JVM
// and a JDBC driver sit behind it.

use crate::domain::{ConnectionConfig, Query, QueryResult};
use crate::error::HiveqError;

/// One open connection to the server.
pub trait Connector {
    /// Runs a single statement and fetches every row eagerly.
    fn execute(&mut self, query: &Query) -> Result<QueryResult, HiveqError>;

    /// Releases the server-side session. Calling it twice is a no-op.
    fn close(&mut self) -> Result<(), HiveqError>;

    fn engine_name(&self) -> &str;
}

/// Produces a `Connector` from parsed connection parameters.
pub trait ConnectionOpener {
    fn open<'a>(&'a self, config: &ConnectionConfig) -> Result<Box<dyn Connector + 'a>, HiveqError>;
}
