// hiveq-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Traits)
// Contracts between the export pipeline and whatever talks to Hive.
pub mod ports;

// 2. Domain
// Connection parameters, queries, result sets. Depends on nothing else.
pub mod domain;

// 3. Infrastructure (Adapters)
// YAML loader, JVM/JDBC bridge, CSV writer.
pub mod infrastructure;

// 4. Application (Use Cases)
// Query resolution and the config -> connect -> query -> write pipeline.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::{ErrorKind, HiveqError};
