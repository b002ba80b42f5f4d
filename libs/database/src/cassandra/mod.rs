//! Cassandra/ScyllaDB session lifecycle and statement execution
//!
//! Uses the `scylla` driver, which speaks CQL to both Apache Cassandra and
//! ScyllaDB.
//!
//! # Example
//!
//! ```ignore
//! use database::cassandra::{
//!     CassandraSessionManager, ConnectionConfig, SessionLifecycle, StatementExecutor,
//! };
//!
//! let mut manager = CassandraSessionManager::new(ConnectionConfig::new("127.0.0.1"));
//! let session = manager.open().await?;
//! let outcome = session
//!     .execute("SELECT subject FROM security.certificates WHERE serial_no=?", &[
//!         CqlValue::Text("67890".into()),
//!     ])
//!     .await;
//! manager.close().await;
//! ```

mod config;
mod connector;
mod executor;
mod health;
mod session;

pub use config::{ConnectionConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use connector::{connect, open_with_retry};
pub use executor::{QueryOutcome, StatementExecutor, count_bind_markers};
pub use health::check_health;
pub use session::{CassandraSession, CassandraSessionManager, SessionLifecycle};

// Re-export scylla types for convenience
pub use scylla::value::{CqlTimestamp, CqlValue};
