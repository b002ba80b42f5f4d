use async_trait::async_trait;
use scylla::client::session::Session;
use tracing::{debug, info};

use super::{ConnectionConfig, StatementExecutor, connect};
use crate::common::ConnectionError;

/// An established connection to the cluster
///
/// Owns the driver session together with the configuration it was opened
/// with. The driver session is released exactly once: by [`close`], or by
/// `Drop` if the handle goes away without being closed.
///
/// [`close`]: CassandraSession::close
pub struct CassandraSession {
    inner: Option<Session>,
    config: ConnectionConfig,
    server_version: Option<String>,
}

impl CassandraSession {
    pub(crate) fn new(
        session: Session,
        config: ConnectionConfig,
        server_version: Option<String>,
    ) -> Self {
        Self {
            inner: Some(session),
            config,
            server_version,
        }
    }

    /// Configuration this session was opened with
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// `release_version` reported by the node at connect time
    pub fn server_version(&self) -> Option<&str> {
        self.server_version.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    pub(crate) fn driver(&self) -> Option<&Session> {
        self.inner.as_ref()
    }

    /// Close the session and release the driver resources
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) -> bool {
        match self.inner.take() {
            Some(session) => {
                // dropping the driver session shuts down its connection pool
                drop(session);
                info!("Closed Cassandra session to {}", self.config.contact_point());
                true
            }
            None => false,
        }
    }
}

impl Drop for CassandraSession {
    fn drop(&mut self) {
        if self.inner.is_some() {
            debug!("Cassandra session dropped without close, releasing");
            self.release();
        }
    }
}

impl std::fmt::Debug for CassandraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CassandraSession")
            .field("contact_point", &self.config.contact_point())
            .field("open", &self.is_open())
            .field("server_version", &self.server_version)
            .finish()
    }
}

/// Owner of at most one live session
///
/// `open` makes a single attempt; retrying is the caller's business. `close`
/// is a no-op when nothing is open, so it is safe on every exit path.
#[async_trait]
pub trait SessionLifecycle: Send {
    type Session: StatementExecutor;

    /// Configuration every `open` connects with
    fn config(&self) -> &ConnectionConfig;

    /// Make one connection attempt. A previously open session is closed first.
    async fn open(&mut self) -> Result<&Self::Session, ConnectionError>;

    /// The live session, if any
    fn session(&self) -> Option<&Self::Session>;

    /// Close and release the live session, if any
    async fn close(&mut self);
}

/// [`SessionLifecycle`] backed by the scylla driver
#[derive(Debug)]
pub struct CassandraSessionManager {
    config: ConnectionConfig,
    session: Option<CassandraSession>,
}

impl CassandraSessionManager {
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }
}

#[async_trait]
impl SessionLifecycle for CassandraSessionManager {
    type Session = CassandraSession;

    fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    async fn open(&mut self) -> Result<&CassandraSession, ConnectionError> {
        if let Some(previous) = self.session.take() {
            previous.close();
        }

        let session = connect(&self.config).await?;
        Ok(&*self.session.insert(session))
    }

    fn session(&self) -> Option<&CassandraSession> {
        self.session.as_ref()
    }

    async fn close(&mut self) {
        match self.session.take() {
            Some(session) => session.close(),
            None => debug!("close called without an open session"),
        }
    }
}
