// hiveq-core/src/domain/connection.rs

use crate::domain::error::DomainError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATABASE: &str = "default";

/// Where the Hive server lives: either a full JDBC URL or host + port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Url(String),
    HostPort { host: String, port: u16 },
}

/// SASL mechanism expected by HiveServer2.
///
/// `None`, `Ldap` and `Custom` all use the driver's default PLAIN transport with
/// user/password properties; they differ only in what the server checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMechanism {
    #[default]
    None,
    NoSasl,
    Ldap,
    Kerberos,
    Custom,
}

impl AuthMechanism {
    pub fn requires_password(self) -> bool {
        matches!(self, AuthMechanism::Ldap | AuthMechanism::Custom)
    }
}

impl FromStr for AuthMechanism {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(AuthMechanism::None),
            "NOSASL" => Ok(AuthMechanism::NoSasl),
            "LDAP" => Ok(AuthMechanism::Ldap),
            "KERBEROS" => Ok(AuthMechanism::Kerberos),
            "CUSTOM" => Ok(AuthMechanism::Custom),
            _ => Err(DomainError::UnknownAuth(s.to_string())),
        }
    }
}

impl fmt::Display for AuthMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthMechanism::None => "NONE",
            AuthMechanism::NoSasl => "NOSASL",
            AuthMechanism::Ldap => "LDAP",
            AuthMechanism::Kerberos => "KERBEROS",
            AuthMechanism::Custom => "CUSTOM",
        };
        f.write_str(name)
    }
}

/// Parsed, immutable connection parameters. Built once by the config loader.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub endpoint: Endpoint,
    pub driver_class: String,
    pub username: String,
    pub password: Option<String>,
    pub driver_jar: Option<PathBuf>,
    pub database: Option<String>,
    pub auth: AuthMechanism,
    pub kerberos_principal: Option<String>,
    pub jvm_options: Vec<String>,
}

impl ConnectionConfig {
    /// JDBC URL passed to `Driver.connect`. Credentials are never part of it.
    pub fn jdbc_url(&self) -> String {
        match &self.endpoint {
            Endpoint::Url(url) => url.clone(),
            Endpoint::HostPort { host, port } => {
                let database = self.database.as_deref().unwrap_or(DEFAULT_DATABASE);
                let mut url = format!("jdbc:hive2://{}:{}/{}", host, port, database);
                match self.auth {
                    AuthMechanism::NoSasl => url.push_str(";auth=noSasl"),
                    AuthMechanism::Kerberos => {
                        if let Some(principal) = &self.kerberos_principal {
                            url.push_str(";principal=");
                            url.push_str(principal);
                        }
                    }
                    AuthMechanism::None | AuthMechanism::Ldap | AuthMechanism::Custom => {}
                }
                url
            }
        }
    }

    /// Host name for log lines, without credentials or URL parameters.
    pub fn display_target(&self) -> String {
        match &self.endpoint {
            Endpoint::Url(url) => url.split(';').next().unwrap_or(url.as_str()).to_string(),
            Endpoint::HostPort { host, port } => format!("{}:{}", host, port),
        }
    }
}

// Hand-written so the password never ends up in a log line.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("endpoint", &self.endpoint)
            .field("driver_class", &self.driver_class)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("driver_jar", &self.driver_jar)
            .field("database", &self.database)
            .field("auth", &self.auth)
            .field("kerberos_principal", &self.kerberos_principal)
            .field("jvm_options", &self.jvm_options)
            .finish()
    }
}
