//! Startup driver: connect with a fixed retry budget, ensure the schema, run
//! the demo insert and lookup, close.

use std::fmt;

use database::cassandra::{QueryOutcome, SessionLifecycle, StatementExecutor};
use database::common::ConnectionError;
use domain_certificates::{CertificateRepository, Lookup, NewCertificate, SchemaReport};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

/// Where the bootstrap currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// Nothing attempted yet
    Disconnected,

    /// Connection attempt `attempt` (1-based) in progress
    Connecting { attempt: u32 },

    /// A session is open
    Connected,

    /// Demo finished and the session is closed
    Ready,

    /// Retry budget spent without connecting
    Failed,
}

impl BootstrapState {
    /// Check if transition is valid
    pub fn can_transition_to(&self, next: BootstrapState) -> bool {
        use BootstrapState::*;

        match (*self, next) {
            (Disconnected, Connecting { attempt }) => attempt == 1,
            (Connecting { attempt }, Connecting { attempt: following }) => following == attempt + 1,
            (Connecting { .. }, Connected) | (Connecting { .. }, Failed) => true,
            (Connected, Ready) => true,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BootstrapState::Ready | BootstrapState::Failed)
    }
}

impl fmt::Display for BootstrapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting { attempt } => write!(f, "connecting (attempt {attempt})"),
            Self::Connected => write!(f, "connected"),
            Self::Ready => write!(f, "ready"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to connect to Cassandra after {attempts} attempt(s): {last_error}")]
    RetriesExhausted {
        attempts: u32,
        last_error: ConnectionError,
    },

    #[error("Invalid bootstrap transition from {from} to {to}")]
    InvalidTransition {
        from: BootstrapState,
        to: BootstrapState,
    },

    #[error("Session vanished after a successful connect")]
    SessionUnavailable,
}

/// Everything the demo phase observed
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    /// Connection attempts it took to get a session
    pub attempts: u32,
    pub schema: SchemaReport,
    pub insert: QueryOutcome,
    pub lookup: Lookup,
}

/// Drives one [`SessionLifecycle`] from `Disconnected` to a terminal state
pub struct Bootstrap<L: SessionLifecycle> {
    lifecycle: L,
    demo: NewCertificate,
    state: BootstrapState,
    history: Vec<BootstrapState>,
}

impl<L: SessionLifecycle> Bootstrap<L> {
    pub fn new(lifecycle: L, demo: NewCertificate) -> Self {
        Self {
            lifecycle,
            demo,
            state: BootstrapState::Disconnected,
            history: vec![BootstrapState::Disconnected],
        }
    }

    pub fn state(&self) -> BootstrapState {
        self.state
    }

    /// Every state visited so far, starting with `Disconnected`
    pub fn history(&self) -> &[BootstrapState] {
        &self.history
    }

    pub fn lifecycle(&self) -> &L {
        &self.lifecycle
    }

    fn transition(&mut self, next: BootstrapState) -> Result<(), BootstrapError> {
        if !self.state.can_transition_to(next) {
            return Err(BootstrapError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    /// Open a session, retrying with the configured fixed delay
    ///
    /// Returns the number of attempts used. Attempts are strictly sequential
    /// and no pause follows the last failure.
    #[instrument(skip(self), fields(contact_point = %self.lifecycle.config().contact_point()))]
    pub async fn connect(&mut self) -> Result<u32, BootstrapError> {
        let retry = self.lifecycle.config().retry_config();
        let mut attempt = 1;
        self.transition(BootstrapState::Connecting { attempt })?;

        loop {
            let opened = self.lifecycle.open().await.map(|_| ());

            match opened {
                Ok(()) => {
                    self.transition(BootstrapState::Connected)?;
                    return Ok(attempt);
                }
                Err(e) => match retry.next_delay(attempt) {
                    Some(delay) => {
                        warn!(
                            "Cassandra not ready yet. Retrying in {:?} (attempt {}/{})",
                            delay, attempt, retry.max_attempts
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        self.transition(BootstrapState::Connecting { attempt })?;
                    }
                    None => {
                        self.transition(BootstrapState::Failed)?;
                        error!("Failed to connect to Cassandra after {} attempt(s)", attempt);
                        return Err(BootstrapError::RetriesExhausted {
                            attempts: attempt,
                            last_error: e,
                        });
                    }
                },
            }
        }
    }

    /// Connect, ensure the schema, run the demo and close the session
    ///
    /// Statement failures are logged and reported but never abort the run;
    /// only an exhausted connection budget is an error.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<DemoReport, BootstrapError> {
        let attempts = self.connect().await?;

        let demo = match self.lifecycle.session() {
            Some(session) => Some(run_demo(session, &self.demo).await),
            None => None,
        };

        self.lifecycle.close().await;

        let Some((schema, insert, lookup)) = demo else {
            return Err(BootstrapError::SessionUnavailable);
        };

        self.transition(BootstrapState::Ready)?;
        info!("Bootstrap finished after {} connection attempt(s)", attempts);

        Ok(DemoReport {
            attempts,
            schema,
            insert,
            lookup,
        })
    }
}

async fn run_demo<S>(session: &S, demo: &NewCertificate) -> (SchemaReport, QueryOutcome, Lookup)
where
    S: StatementExecutor,
{
    let repository = CertificateRepository::new(session);

    let schema = repository.ensure_schema().await;
    for (what, outcome) in [("keyspace", &schema.keyspace), ("table", &schema.table)] {
        if let Some(message) = outcome.error_message() {
            error!("Schema query failed ({}): {}", what, message);
        }
    }

    let insert = repository.insert(demo).await;
    match insert.error_message() {
        Some(message) => error!("Insert error: {}", message),
        None => info!("Inserted cert with serial: {}", demo.serial_no),
    }

    let lookup = repository.find_by_serial(&demo.serial_no).await;
    match &lookup {
        Lookup::Found(record) => info!("Fetched cert subject: {}", record.subject),
        Lookup::NotFound => warn!("No certificate found with serial: {}", demo.serial_no),
        Lookup::Failed(message) => error!("Query error: {}", message),
    }

    (schema, insert, lookup)
}
