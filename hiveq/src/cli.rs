// hiveq/src/cli.rs
//
// Single source of truth for the CLI definition (Clap struct).

use clap::Parser;
use hiveq_core::infrastructure::config::DEFAULT_CONFIG_PATH;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hiveq")]
#[command(
    about = "Runs one SQL query against Hive through its JDBC driver and writes the rows to CSV",
    long_about = None
)]
#[command(version)]
#[command(after_help = "\
Examples:
  hiveq --query 'SELECT * FROM sales LIMIT 10'
  hiveq --config my_config.yaml --tag InputQuery1 --output results.csv
  cat report.sql | hiveq -o report.csv

Exit codes: 0 success, 2 usage, 3 config, 4 empty query, 5 connection, 6 query, 7 output file")]
pub struct Cli {
    /// Path to the YAML connection config
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Section of a tagged config file (ex: "InputQuery1")
    #[arg(long, short)]
    pub tag: Option<String>,

    /// SQL to execute. Read from stdin until EOF when neither this flag nor the config provides one
    #[arg(long, short)]
    pub query: Option<String>,

    /// CSV destination (default: config 'output', '<query_file>.csv', then output.csv)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use clap::Parser;

    #[test]
    fn test_cli_parse_defaults() {
        let args = Cli::parse_from(["hiveq"]);
        assert_eq!(args.config.to_string_lossy(), "config.yaml");
        assert_eq!(args.tag, None);
        assert_eq!(args.query, None);
        assert_eq!(args.output, None);
    }

    #[test]
    fn test_cli_parse_all_flags() {
        let args = Cli::parse_from([
            "hiveq",
            "--config",
            "/etc/hiveq/prod.yaml",
            "-t",
            "InputQuery2",
            "--query",
            "SELECT 1",
            "-o",
            "/tmp/out.csv",
        ]);
        assert_eq!(args.config.to_string_lossy(), "/etc/hiveq/prod.yaml");
        assert_eq!(args.tag.as_deref(), Some("InputQuery2"));
        assert_eq!(args.query.as_deref(), Some("SELECT 1"));
        assert_eq!(args.output, Some(PathBuf::from("/tmp/out.csv")));
    }

    #[test]
    fn test_cli_rejects_unknown_flag() -> Result<()> {
        let parsed = Cli::try_parse_from(["hiveq", "--db-path", "x"]);
        if parsed.is_ok() {
            anyhow::bail!("unknown flag should be rejected");
        }
        Ok(())
    }
}
