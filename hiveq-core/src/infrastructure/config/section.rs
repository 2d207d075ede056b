// hiveq-core/src/infrastructure/config/section.rs
//
// Raw, permissive view of one configuration section. Every key is optional
// here; `loader` decides what is required.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub(crate) struct RawSection {
    pub hive_jdbc_url: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub host: Option<String>,

    #[serde(default, deserialize_with = "scalar_port")]
    #[validate(range(min = 1, max = 65535, message = "must be between 1 and 65535"))]
    pub port: Option<u64>,

    pub hive_driver_class: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub password: Option<String>,

    pub hive_driver_jar: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub database: Option<String>,

    pub auth: Option<String>,

    pub kerberos_principal: Option<String>,

    #[serde(default)]
    pub jvm_options: Vec<String>,

    pub query: Option<String>,

    pub query_file: Option<String>,

    pub output: Option<String>,
}

/// Trimmed value, `None` when absent or blank.
pub(crate) fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

// YAML happily types `password: 12345` or `database: 2024` as numbers.
fn scalar_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Option::<serde_yaml::Value>::deserialize(d)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_yaml::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(D::Error::custom("expected a scalar value")),
    }
}

fn scalar_port<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    match Option::<serde_yaml::Value>::deserialize(d)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("port must be a positive integer, got {}", n))),
        Some(serde_yaml::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_yaml::Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("port must be a positive integer, got '{}'", s))),
        Some(_) => Err(D::Error::custom("port must be a positive integer")),
    }
}
