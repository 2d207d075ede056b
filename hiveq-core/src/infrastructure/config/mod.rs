// hiveq-core/src/infrastructure/config/mod.rs

pub mod loader;
mod section;

pub use loader::{DEFAULT_CONFIG_PATH, ENV_PASSWORD, ENV_USERNAME, ExportProfile, load_profile};
