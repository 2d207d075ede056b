// hiveq/src/commands/export.rs
//
// USE CASE: config -> query -> JVM bridge -> Hive -> CSV.

use std::io::{self, IsTerminal};

use hiveq_core::HiveqError;
use hiveq_core::application::{QueryInput, plan_export, run_export};
use hiveq_core::infrastructure::bridge::{BridgeOptions, JvmBridge};
use hiveq_core::infrastructure::config::load_profile;
use tracing::info;

use crate::cli::Cli;

pub fn execute(cli: Cli) -> Result<(), HiveqError> {
    // A. Config (no network yet)
    let profile = load_profile(&cli.config, cli.tag.as_deref())?;

    // B. Query + output path. A blank query stops here, before the JVM starts.
    let stdin = io::stdin();
    if cli.query.is_none() && profile.query.is_none() && stdin.is_terminal() {
        eprintln!("Enter SQL, then press Ctrl-D to run it:");
    }
    let plan = plan_export(
        profile,
        QueryInput {
            query: cli.query,
            output: cli.output,
            stdin: stdin.lock(),
        },
    )?;
    info!(
        server = %plan.connection.display_target(),
        output = %plan.output.display(),
        "Export planned"
    );

    // C. Bridge runtime, started once for the whole process
    let bridge = JvmBridge::start(&BridgeOptions::from_config(&plan.connection))?;

    // D. Connect, run, write
    let summary = run_export(&bridge, &plan)?;

    match summary.output {
        Some(path) => println!(
            "✨ Query executed successfully. Wrote {} rows to '{}' in {:.2?}.",
            summary.rows,
            path.display(),
            summary.elapsed
        ),
        None => println!("✨ Statement executed successfully. No result set returned."),
    }

    Ok(())
}
