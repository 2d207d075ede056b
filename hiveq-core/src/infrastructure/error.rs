// hiveq-core/src/infrastructure/error.rs

use crate::error::ErrorKind;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum BridgeError {
    #[error("Could not start the JVM: {0}")]
    #[diagnostic(
        code(hiveq::infra::bridge::start),
        help("Install a JRE and set JAVA_HOME (or put 'java' on PATH).")
    )]
    StartFailed(String),

    #[error("The JVM bridge runtime is already started in this process")]
    #[diagnostic(code(hiveq::infra::bridge::already_started))]
    AlreadyStarted,

    #[error("Driver artifact not found at '{0}'")]
    #[diagnostic(
        code(hiveq::infra::bridge::driver_jar),
        help("Point 'hive_driver_jar' at the standalone Hive JDBC jar.")
    )]
    DriverJarMissing(String),

    #[error("Driver class '{class}' could not be loaded: {message}")]
    #[diagnostic(
        code(hiveq::infra::bridge::driver_class),
        help("Check 'hive_driver_class' and that the driver jar is on the class path.")
    )]
    DriverClass { class: String, message: String },

    #[error("Connection to '{target}' failed: {message}")]
    #[diagnostic(
        code(hiveq::infra::bridge::connect),
        help("Check host, port, credentials and the 'auth' mechanism.")
    )]
    Connect { target: String, message: String },

    #[error("JNI Error: {0}")]
    #[diagnostic(code(hiveq::infra::bridge::jni))]
    Jni(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- CONFIG / YAML ---
    #[error("Configuration file not found at '{0}'")]
    #[diagnostic(
        code(hiveq::infra::config_missing),
        help("Create a config.yaml or pass --config <path>.")
    )]
    ConfigNotFound(String),

    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(hiveq::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Missing required config key '{key}' in '{path}'")]
    #[diagnostic(code(hiveq::infra::config::missing_key))]
    MissingKey { key: String, path: String },

    #[error("Invalid value for config key '{key}': {reason}")]
    #[diagnostic(code(hiveq::infra::config::invalid_value))]
    InvalidValue { key: String, reason: String },

    #[error("Tag '{tag}' not found in '{path}' (available: {available})")]
    #[diagnostic(code(hiveq::infra::config::tag))]
    TagNotFound {
        tag: String,
        path: String,
        available: String,
    },

    // --- DRIVER BRIDGE ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Bridge(#[from] BridgeError),

    // --- QUERY ---
    #[error("Query failed: {0}")]
    #[diagnostic(code(hiveq::infra::query))]
    Query(String),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(hiveq::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    #[diagnostic(code(hiveq::infra::csv))]
    Csv(#[from] csv::Error),
}

impl InfrastructureError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InfrastructureError::ConfigNotFound(_)
            | InfrastructureError::YamlError(_)
            | InfrastructureError::MissingKey { .. }
            | InfrastructureError::InvalidValue { .. }
            | InfrastructureError::TagNotFound { .. } => ErrorKind::Config,
            InfrastructureError::Bridge(_) => ErrorKind::Connection,
            InfrastructureError::Query(_) => ErrorKind::Query,
            InfrastructureError::Io(_) | InfrastructureError::Csv(_) => ErrorKind::Io,
        }
    }

    pub fn missing_key(key: &str, path: &std::path::Path) -> Self {
        InfrastructureError::MissingKey {
            key: key.to_string(),
            path: path.display().to_string(),
        }
    }
}

// Shortcut for `?` on raw jni calls that have no Java exception to report.
impl From<jni::errors::Error> for InfrastructureError {
    fn from(err: jni::errors::Error) -> Self {
        InfrastructureError::Bridge(BridgeError::Jni(err.to_string()))
    }
}
