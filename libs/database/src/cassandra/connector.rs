use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use tracing::{error, info, warn};

use super::session::CassandraSession;
use super::{ConnectionConfig, health};
use crate::common::{ConnectionError, RetryExhausted, retry_with_fixed_delay};

/// Make a single connection attempt to `config.contact_point()`
///
/// Builds a driver session and verifies it by reading `release_version` from
/// `system.local`. If the handshake or the verification fails, whatever the
/// driver had set up is dropped before the error is returned.
///
/// # Example
/// ```ignore
/// use database::cassandra::{ConnectionConfig, connect};
///
/// let session = connect(&ConnectionConfig::new("127.0.0.1")).await?;
/// ```
pub async fn connect(config: &ConnectionConfig) -> Result<CassandraSession, ConnectionError> {
    let contact_point = config.contact_point();
    info!("Attempting to connect to Cassandra at {}", contact_point);

    let mut builder = SessionBuilder::new()
        .known_node(&contact_point)
        .connection_timeout(config.connect_timeout());

    if let Some((username, password)) = config.credentials() {
        builder = builder.user(username, password);
    }

    let session: Session = builder.build().await.map_err(|e| {
        error!("Connection error: {}", e);
        ConnectionError::from(e)
    })?;

    let server_version = match health::release_version(&session).await {
        Ok(version) => version,
        Err(e) => {
            error!("Connection error: {}", e);
            drop(session);
            return Err(ConnectionError::new(e.to_string()));
        }
    };

    info!(
        "Connected to Cassandra at {} (release {})",
        contact_point,
        server_version.as_deref().unwrap_or("unknown")
    );

    Ok(CassandraSession::new(session, config.clone(), server_version))
}

/// Connect with the fixed-delay retry budget carried by `config`
///
/// # Example
/// ```ignore
/// use database::cassandra::{ConnectionConfig, open_with_retry};
///
/// let config = ConnectionConfig::new("127.0.0.1").with_retry_attempts(30);
/// let session = open_with_retry(&config).await?;
/// ```
pub async fn open_with_retry(
    config: &ConnectionConfig,
) -> Result<CassandraSession, RetryExhausted<ConnectionError>> {
    retry_with_fixed_delay(|_| connect(config), &config.retry_config())
        .await
        .inspect_err(|e| warn!("Failed to connect to Cassandra: {}", e))
}
