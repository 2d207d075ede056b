// hiveq-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Query is empty")]
    #[diagnostic(
        code(hiveq::domain::empty_query),
        help("Pass SQL with --query, set 'query'/'query_file' in the config, or pipe it on stdin.")
    )]
    EmptyQuery,

    #[error("Unknown authentication mechanism '{0}'")]
    #[diagnostic(
        code(hiveq::domain::auth),
        help("Use one of NONE, NOSASL, LDAP, KERBEROS, CUSTOM.")
    )]
    UnknownAuth(String),
}
