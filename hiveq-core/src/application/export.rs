// hiveq-core/src/application/export.rs
//
// USE CASE: connect -> query -> write, exactly once.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use crate::application::engine::execute_query;
use crate::application::plan::ExportPlan;
use crate::error::HiveqError;
use crate::infrastructure::writer::write_csv;
use crate::ports::connector::ConnectionOpener;

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub rows: usize,
    pub columns: usize,
    /// `None` when the statement produced no result set and nothing was written.
    pub output: Option<PathBuf>,
    pub elapsed: Duration,
}

/// The CSV is written only after the whole result is in memory, so a failed
/// connection or query leaves any existing output file untouched.
#[instrument(skip_all, fields(output = %plan.output.display()))]
pub fn run_export(opener: &dyn ConnectionOpener, plan: &ExportPlan) -> Result<ExportSummary, HiveqError> {
    let start = Instant::now();

    let mut connector = opener.open(&plan.connection)?;
    let outcome = execute_query(connector.as_mut(), &plan.query);
    if let Err(e) = connector.close() {
        warn!("Failed to close connection: {}", e);
    }
    let result = outcome?;

    if !result.has_result_set() {
        info!("Statement returned no result set, no CSV written");
        return Ok(ExportSummary {
            rows: 0,
            columns: 0,
            output: None,
            elapsed: start.elapsed(),
        });
    }

    write_csv(&result, &plan.output)?;

    Ok(ExportSummary {
        rows: result.row_count(),
        columns: result.column_count(),
        output: Some(plan.output.clone()),
        elapsed: start.elapsed(),
    })
}
