// hiveq-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::domain::{Query, QueryResult};
use crate::error::HiveqError;
use crate::ports::connector::Connector;

/// Runs one statement with timing. The connector does the actual work.
#[instrument(skip(connector, query), fields(engine = connector.engine_name(), query.len = query.as_str().len()))]
pub fn execute_query(connector: &mut dyn Connector, query: &Query) -> Result<QueryResult, HiveqError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query);

    let result = connector.execute(query);
    let duration = start.elapsed();

    match result {
        Ok(result) => {
            info!(
                rows = result.row_count(),
                columns = result.column_count(),
                "✅ Query finished in {:.2?}",
                duration
            );
            Ok(result)
        }
        Err(e) => {
            // The message itself is reported once, by the caller.
            warn!("❌ Query failed after {:.2?}", duration);
            Err(e)
        }
    }
}
