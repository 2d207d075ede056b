// hiveq-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum HiveqError {
    // --- DOMAIN ERRORS (validation) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (config, bridge, IO) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

/// Coarse classification used for logging and the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Validation,
    Connection,
    Query,
    Io,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            // 2 is left to clap for usage errors
            ErrorKind::Config => 3,
            ErrorKind::Validation => 4,
            ErrorKind::Connection => 5,
            ErrorKind::Query => 6,
            ErrorKind::Io => 7,
        }
    }
}

impl HiveqError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HiveqError::Domain(DomainError::EmptyQuery) => ErrorKind::Validation,
            HiveqError::Domain(DomainError::UnknownAuth(_)) => ErrorKind::Config,
            HiveqError::Infrastructure(e) => e.kind(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }
}

impl From<std::io::Error> for HiveqError {
    fn from(err: std::io::Error) -> Self {
        HiveqError::Infrastructure(InfrastructureError::Io(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_exits_non_zero_and_distinct() {
        let kinds = [
            ErrorKind::Config,
            ErrorKind::Validation,
            ErrorKind::Connection,
            ErrorKind::Query,
            ErrorKind::Io,
        ];
        let mut codes: Vec<u8> = kinds.iter().map(|k| k.exit_code()).collect();
        assert!(codes.iter().all(|c| *c != 0));
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_io_error_classified_as_io() {
        let err = HiveqError::from(std::io::Error::other("disk full"));
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn test_blank_query_classified_as_validation() {
        let err = HiveqError::from(DomainError::EmptyQuery);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
