pub mod connection;
pub mod error;
pub mod query;
pub mod result;

// Re-exports to keep imports short elsewhere
pub use connection::{AuthMechanism, ConnectionConfig, Endpoint};
pub use error::DomainError;
pub use query::{Query, QuerySource};
pub use result::{QueryResult, Value};
