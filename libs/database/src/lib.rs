//! Database connectors and utilities
//!
//! # Features
//!
//! - `cassandra` (default) - Cassandra/ScyllaDB support via the `scylla` driver
//! - `config` - `core_config::FromEnv` support for connection settings
//! - `all` - All features
//!
//! # Example
//!
//! ```ignore
//! use database::cassandra::{ConnectionConfig, open_with_retry};
//!
//! let config = ConnectionConfig::new("127.0.0.1").with_retry_attempts(5);
//! let session = open_with_retry(&config).await?;
//! ```

// Always available modules
pub mod common;

#[cfg(feature = "cassandra")]
pub mod cassandra;

pub use common::{ConnectionError, RetryConfig, RetryExhausted};
