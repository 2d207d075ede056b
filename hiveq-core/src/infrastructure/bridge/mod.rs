// hiveq-core/src/infrastructure/bridge/mod.rs
//
// The Hive JDBC driver runs inside a JVM hosted by this process. The bridge
// starts that JVM once, then hands out connections through the
// `ConnectionOpener` port.

mod connection;
mod java;
mod runtime;
pub mod types;

pub use connection::HiveConnection;
pub use runtime::{BridgeOptions, JvmBridge};
