// hiveq-core/src/infrastructure/mod.rs

pub mod bridge;
pub mod config;
pub mod error;
pub mod fs;
pub mod writer;

pub use bridge::{BridgeOptions, HiveConnection, JvmBridge};
pub use config::{ExportProfile, load_profile};
pub use writer::write_csv;
