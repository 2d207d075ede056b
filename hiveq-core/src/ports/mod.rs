pub mod connector;

pub use connector::{ConnectionOpener, Connector};
