//! Cassandra test infrastructure
//!
//! Provides a `TestCassandra` helper that runs a single-node Cassandra
//! container for integration tests.

use std::time::Duration;

use database::cassandra::{CassandraSession, ConnectionConfig, open_with_retry};
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use tracing::info;

const CQL_PORT: u16 = 9042;

/// Test Cassandra wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestCassandra;
///
/// # async fn example() {
/// let cassandra = TestCassandra::new().await;
/// let session = cassandra.session();
/// assert!(session.is_open());
/// # }
/// ```
pub struct TestCassandra {
    #[allow(dead_code)]
    container: ContainerAsync<GenericImage>,
    session: CassandraSession,
    pub config: ConnectionConfig,
}

impl TestCassandra {
    /// Start a Cassandra 5 container and connect to it
    ///
    /// The native transport comes up a little after the log line we wait for,
    /// so the first connection goes through `open_with_retry`.
    pub async fn new() -> Self {
        let container = GenericImage::new("cassandra", "5.0")
            .with_exposed_port(CQL_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout(
                "Starting listening for CQL clients",
            ))
            .with_env_var("MAX_HEAP_SIZE", "512M")
            .with_env_var("HEAP_NEWSIZE", "128M")
            .start()
            .await
            .expect("Failed to start Cassandra container");

        let host_port = container
            .get_host_port_ipv4(CQL_PORT)
            .await
            .expect("Failed to get Cassandra port");

        let config = ConnectionConfig::new("127.0.0.1")
            .with_port(host_port)
            .with_retry_attempts(30)
            .with_retry_delay(Duration::from_secs(2));

        let session = open_with_retry(&config)
            .await
            .expect("Cassandra container never accepted CQL connections");

        info!("Test Cassandra ready on port {}", host_port);

        Self {
            container,
            session,
            config,
        }
    }

    /// Session connected to the container
    pub fn session(&self) -> &CassandraSession {
        &self.session
    }
}
