// hiveq-core/src/application/mod.rs

pub mod engine;
pub mod export;
pub mod plan;

#[cfg(test)]
pub(crate) mod testing;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI only needs `use hiveq_core::application::{plan_export, run_export};`

pub use engine::execute_query;
pub use export::{ExportSummary, run_export};
pub use plan::{ExportPlan, QueryInput, plan_export};
