// hiveq-core/src/infrastructure/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value as YamlValue};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::domain::{AuthMechanism, ConnectionConfig, Endpoint, QuerySource};
use crate::infrastructure::config::section::{RawSection, non_blank};
use crate::infrastructure::error::InfrastructureError;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const ENV_PASSWORD: &str = "HIVEQ_PASSWORD";
pub const ENV_USERNAME: &str = "HIVEQ_USERNAME";

/// Everything one configuration section describes: how to connect, and
/// optionally which SQL to run and where to put the CSV.
#[derive(Debug, Clone)]
pub struct ExportProfile {
    pub connection: ConnectionConfig,
    pub query: Option<QuerySource>,
    pub output: Option<PathBuf>,
}

// --- LOADER ---

#[instrument]
pub fn load_profile(config_path: &Path, tag: Option<&str>) -> Result<ExportProfile, InfrastructureError> {
    if !config_path.is_file() {
        return Err(InfrastructureError::ConfigNotFound(
            config_path.display().to_string(),
        ));
    }
    info!(path = ?config_path, "Loading connection config");

    let content = fs::read_to_string(config_path)?;
    let document: YamlValue = if content.trim().is_empty() {
        YamlValue::Null
    } else {
        serde_yaml::from_str(&content)?
    };

    let section = select_section(document, tag, config_path)?;
    let mut raw: RawSection = serde_yaml::from_value(section)?;

    // Layering: the environment wins over the file for credentials.
    apply_env_overrides(&mut raw, |key| std::env::var(key).ok());

    build_profile(raw, config_path)
}

/// Picks the root mapping, or the mapping stored under `tag`.
fn select_section(
    document: YamlValue,
    tag: Option<&str>,
    config_path: &Path,
) -> Result<YamlValue, InfrastructureError> {
    let root = match document {
        YamlValue::Null => Mapping::new(),
        YamlValue::Mapping(m) => m,
        _ => {
            return Err(InfrastructureError::InvalidValue {
                key: "<root>".into(),
                reason: "the configuration must be a key/value mapping".into(),
            });
        }
    };

    let Some(tag) = tag else {
        let tags = tag_names(&root);
        if !tags.is_empty() && !root.contains_key("hive_driver_class") {
            warn!(available = %tags.join(", "), "Config looks tagged; select a section with --tag");
        }
        return Ok(YamlValue::Mapping(root));
    };

    match root.get(tag) {
        Some(YamlValue::Mapping(section)) => Ok(YamlValue::Mapping(section.clone())),
        Some(YamlValue::Null) => Ok(YamlValue::Mapping(Mapping::new())),
        Some(_) => Err(InfrastructureError::InvalidValue {
            key: tag.to_string(),
            reason: "a tagged section must be a key/value mapping".into(),
        }),
        None => Err(InfrastructureError::TagNotFound {
            tag: tag.to_string(),
            path: config_path.display().to_string(),
            available: {
                let tags = tag_names(&root);
                if tags.is_empty() {
                    "none".to_string()
                } else {
                    tags.join(", ")
                }
            },
        }),
    }
}

fn tag_names(root: &Mapping) -> Vec<String> {
    root.iter()
        .filter(|(_, v)| v.is_mapping())
        .filter_map(|(k, _)| k.as_str().map(String::from))
        .collect()
}

fn apply_env_overrides(raw: &mut RawSection, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup(ENV_USERNAME).filter(|v| !v.trim().is_empty()) {
        info!(var = ENV_USERNAME, "Overriding username via ENV");
        raw.username = Some(val);
    }
    if let Some(val) = lookup(ENV_PASSWORD).filter(|v| !v.is_empty()) {
        info!(var = ENV_PASSWORD, "Overriding password via ENV");
        raw.password = Some(val);
    }
}

fn build_profile(raw: RawSection, config_path: &Path) -> Result<ExportProfile, InfrastructureError> {
    raw.validate().map_err(|errors| {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        match fields.into_iter().next() {
            Some((key, errs)) => InfrastructureError::InvalidValue {
                key: key.to_string(),
                reason: errs
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .next()
                    .unwrap_or_else(|| "invalid value".to_string()),
            },
            None => InfrastructureError::InvalidValue {
                key: "<section>".into(),
                reason: errors.to_string(),
            },
        }
    })?;

    let base_dir = config_dir(config_path);
    let required = |value: &Option<String>, key: &str| {
        non_blank(value).ok_or_else(|| InfrastructureError::missing_key(key, config_path))
    };

    // 1. Endpoint: a full URL wins over host + port
    let endpoint = match non_blank(&raw.hive_jdbc_url) {
        Some(url) => {
            if !url.starts_with("jdbc:") {
                return Err(InfrastructureError::InvalidValue {
                    key: "hive_jdbc_url".into(),
                    reason: format!("'{}' is not a JDBC URL (expected 'jdbc:hive2://...')", url),
                });
            }
            Endpoint::Url(url)
        }
        None => {
            let host = required(&raw.host, "host")?;
            let port = raw
                .port
                .ok_or_else(|| InfrastructureError::missing_key("port", config_path))?;
            let port = u16::try_from(port).map_err(|_| InfrastructureError::InvalidValue {
                key: "port".into(),
                reason: "must be between 1 and 65535".into(),
            })?;
            Endpoint::HostPort { host, port }
        }
    };

    // 2. Driver + credentials
    let driver_class = required(&raw.hive_driver_class, "hive_driver_class")?;
    let username = required(&raw.username, "username")?;

    let auth = match non_blank(&raw.auth) {
        Some(text) => text
            .parse::<AuthMechanism>()
            .map_err(|e| InfrastructureError::InvalidValue {
                key: "auth".into(),
                reason: e.to_string(),
            })?,
        None => AuthMechanism::default(),
    };

    // Blank passwords are missing, others are kept untrimmed.
    let password = raw.password.filter(|p| !p.trim().is_empty());
    if auth.requires_password() && password.is_none() {
        return Err(InfrastructureError::missing_key("password", config_path));
    }

    let kerberos_principal = non_blank(&raw.kerberos_principal);
    if auth == AuthMechanism::Kerberos
        && matches!(endpoint, Endpoint::HostPort { .. })
        && kerberos_principal.is_none()
    {
        return Err(InfrastructureError::missing_key("kerberos_principal", config_path));
    }

    let connection = ConnectionConfig {
        endpoint,
        driver_class,
        username,
        password,
        driver_jar: non_blank(&raw.hive_driver_jar).map(|p| resolve(&base_dir, &p)),
        database: non_blank(&raw.database),
        auth,
        kerberos_principal,
        jvm_options: raw
            .jvm_options
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect(),
    };

    // 3. Optional query + output
    let query = match (raw.query, non_blank(&raw.query_file)) {
        (Some(sql), _) if !sql.trim().is_empty() => Some(QuerySource::Inline(sql)),
        (_, Some(file)) => Some(QuerySource::File(resolve(&base_dir, &file))),
        _ => None,
    };
    let output = non_blank(&raw.output).map(|p| resolve(&base_dir, &p));

    Ok(ExportProfile {
        connection,
        query,
        output,
    })
}

fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Relative paths in the config are relative to the config file itself.
fn resolve(base_dir: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}
