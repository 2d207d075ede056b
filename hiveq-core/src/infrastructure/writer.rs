// hiveq-core/src/infrastructure/writer.rs

use std::path::Path;

use tracing::{info, instrument};

use crate::domain::QueryResult;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

pub const DEFAULT_OUTPUT_PATH: &str = "output.csv";

/// Render a result as RFC 4180 CSV: header line, then one line per row.
/// Fields containing a comma, a quote or a line break are quoted.
pub fn render_csv(result: &QueryResult) -> Result<Vec<u8>, InfrastructureError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(&result.columns)?;
    for row in &result.rows {
        wtr.write_record(row.iter().map(|v| v.to_field()))?;
    }

    wtr.into_inner()
        .map_err(|e| InfrastructureError::Io(e.into_error()))
}

/// Write `result` to `path`, replacing any previous file.
///
/// The whole document is rendered in memory first, so a failure leaves the
/// destination untouched.
#[instrument(skip(result), fields(rows = result.row_count(), columns = result.column_count()))]
pub fn write_csv(result: &QueryResult, path: &Path) -> Result<(), InfrastructureError> {
    let bytes = render_csv(result)?;
    atomic_write(path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "📝 CSV written");
    Ok(())
}
