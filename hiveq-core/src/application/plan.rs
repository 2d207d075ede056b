// hiveq-core/src/application/plan.rs
//
// Decides which SQL runs and where the CSV goes, before anything touches the
// network. A blank query stops the run here.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::{ConnectionConfig, Query, QuerySource};
use crate::error::HiveqError;
use crate::infrastructure::config::ExportProfile;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::writer::DEFAULT_OUTPUT_PATH;

/// Fully resolved inputs of one export run.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub connection: ConnectionConfig,
    pub query: Query,
    pub output: PathBuf,
}

/// Command-line overrides, plus the reader used when no SQL is given at all.
pub struct QueryInput<R: Read> {
    pub query: Option<String>,
    pub output: Option<PathBuf>,
    pub stdin: R,
}

/// Query precedence: flag, config `query`, config `query_file`, stdin.
/// Output precedence: flag, config `output`, `<query_file>.csv`, `output.csv`.
pub fn plan_export<R: Read>(profile: ExportProfile, input: QueryInput<R>) -> Result<ExportPlan, HiveqError> {
    let QueryInput {
        query: query_flag,
        output: output_flag,
        mut stdin,
    } = input;

    let mut query_file = None;
    let text = match (query_flag, profile.query) {
        (Some(sql), _) => {
            debug!("Query taken from the command line");
            sql
        }
        (None, Some(QuerySource::Inline(sql))) => {
            debug!("Query taken from the config");
            sql
        }
        (None, Some(QuerySource::File(path))) => {
            info!(path = %path.display(), "Reading query file");
            let sql = fs::read_to_string(&path).map_err(|e| InfrastructureError::InvalidValue {
                key: "query_file".into(),
                reason: format!("cannot read '{}': {}", path.display(), e),
            })?;
            query_file = Some(path);
            sql
        }
        (None, None) => {
            debug!("Reading query from standard input until EOF");
            let mut sql = String::new();
            stdin.read_to_string(&mut sql)?;
            sql
        }
    };

    let query = Query::parse(text)?;

    let output = output_flag
        .or(profile.output)
        .or_else(|| query_file.map(|p| p.with_extension("csv")))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

    Ok(ExportPlan {
        connection: profile.connection,
        query,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthMechanism, Endpoint};
    use crate::ErrorKind;
    use anyhow::Result;
    use std::io;
    use tempfile::tempdir;

    fn profile(query: Option<QuerySource>, output: Option<PathBuf>) -> ExportProfile {
        ExportProfile {
            connection: ConnectionConfig {
                endpoint: Endpoint::HostPort {
                    host: "localhost".into(),
                    port: 10000,
                },
                driver_class: "org.apache.hive.jdbc.HiveDriver".into(),
                username: "hive".into(),
                password: None,
                driver_jar: None,
                database: None,
                auth: AuthMechanism::None,
                kerberos_principal: None,
                jvm_options: vec![],
            },
            query,
            output,
        }
    }

    fn input(query: Option<&str>, output: Option<&str>, stdin: &'static str) -> QueryInput<&'static [u8]> {
        QueryInput {
            query: query.map(String::from),
            output: output.map(PathBuf::from),
            stdin: stdin.as_bytes(),
        }
    }

    #[test]
    fn test_flag_wins_and_default_output() -> Result<()> {
        let plan = plan_export(
            profile(Some(QuerySource::Inline("SELECT 2".into())), None),
            input(Some("SELECT 1"), None, "SELECT 3"),
        )?;
        assert_eq!(plan.query.as_str(), "SELECT 1");
        assert_eq!(plan.output, PathBuf::from("output.csv"));
        Ok(())
    }

    #[test]
    fn test_multiline_stdin_until_eof() -> Result<()> {
        let plan = plan_export(
            profile(None, None),
            input(None, Some("r.csv"), "SELECT a,\n       b\nFROM t\n"),
        )?;
        assert_eq!(plan.query.as_str(), "SELECT a,\n       b\nFROM t");
        assert_eq!(plan.output, PathBuf::from("r.csv"));
        Ok(())
    }

    #[test]
    fn test_blank_query_rejected_from_every_source() -> Result<()> {
        let cases = [
            plan_export(profile(None, None), input(Some("  "), None, "")),
            plan_export(profile(None, None), input(None, None, "\n \n\t")),
            plan_export(
                profile(Some(QuerySource::Inline("   ".into())), None),
                input(None, None, ""),
            ),
        ];
        for case in cases {
            let err = case.err().ok_or_else(|| anyhow::anyhow!("expected failure"))?;
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        Ok(())
    }

    #[test]
    fn test_query_file_drives_output_name() -> Result<()> {
        let dir = tempdir()?;
        let sql = dir.path().join("daily_sales.sql");
        fs::write(&sql, "SELECT * FROM sales\n")?;

        let plan = plan_export(
            profile(Some(QuerySource::File(sql.clone())), None),
            input(None, None, ""),
        )?;
        assert_eq!(plan.query.as_str(), "SELECT * FROM sales");
        assert_eq!(plan.output, dir.path().join("daily_sales.csv"));

        let plan = plan_export(
            profile(
                Some(QuerySource::File(sql)),
                Some(dir.path().join("configured.csv")),
            ),
            input(None, None, ""),
        )?;
        assert_eq!(plan.output, dir.path().join("configured.csv"));
        Ok(())
    }

    #[test]
    fn test_unreadable_query_file_is_config_error() -> Result<()> {
        let dir = tempdir()?;
        let err = plan_export(
            profile(Some(QuerySource::File(dir.path().join("missing.sql"))), None),
            input(None, None, ""),
        )
        .err()
        .ok_or_else(|| anyhow::anyhow!("expected failure"))?;
        assert_eq!(err.kind(), ErrorKind::Config);
        Ok(())
    }

    #[test]
    fn test_stdin_read_error_is_io() -> Result<()> {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("pipe closed"))
            }
        }
        let err = plan_export(
            profile(None, None),
            QueryInput {
                query: None,
                output: None,
                stdin: Broken,
            },
        )
        .err()
        .ok_or_else(|| anyhow::anyhow!("expected failure"))?;
        assert_eq!(err.kind(), ErrorKind::Io);
        Ok(())
    }
}
