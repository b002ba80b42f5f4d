use database::cassandra::{CqlValue, QueryOutcome, StatementExecutor};
use tracing::instrument;
use validator::Validate;

use crate::error::CertificateError;
use crate::models::{CertificateRecord, NewCertificate};
use crate::queries::{CREATE_KEYSPACE, CREATE_TABLE, INSERT_CERTIFICATE, SELECT_CERTIFICATE};

/// Result of looking a certificate up by serial number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(CertificateRecord),
    /// No row with that serial. Not an error.
    NotFound,
    /// The statement failed or the row could not be decoded.
    Failed(String),
}

/// Outcomes of the two schema statements, in execution order
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaReport {
    pub keyspace: QueryOutcome,
    pub table: QueryOutcome,
}

impl SchemaReport {
    pub fn is_ready(&self) -> bool {
        self.keyspace.is_success() && self.table.is_success()
    }
}

/// Typed access to `security.certificates` over any [`StatementExecutor`]
pub struct CertificateRepository<'a, E: StatementExecutor + ?Sized> {
    executor: &'a E,
}

impl<'a, E: StatementExecutor + ?Sized> CertificateRepository<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// Create the keyspace and table if absent
    ///
    /// The table statement runs even when the keyspace statement failed, so
    /// both outcomes are always reported.
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> SchemaReport {
        let keyspace = self.executor.execute(CREATE_KEYSPACE, &[]).await;
        let table = self.executor.execute(CREATE_TABLE, &[]).await;
        SchemaReport { keyspace, table }
    }

    /// Insert a certificate. Issue and expiry times are set by the server.
    ///
    /// Invalid input is reported as a failure without reaching the database.
    #[instrument(skip(self, input), fields(serial_no = %input.serial_no))]
    pub async fn insert(&self, input: &NewCertificate) -> QueryOutcome {
        if let Err(e) = input.validate() {
            return QueryOutcome::Failure(CertificateError::from(e).to_string());
        }

        self.executor
            .execute(INSERT_CERTIFICATE, &input.bind_values())
            .await
    }

    /// Point lookup by primary key
    #[instrument(skip(self))]
    pub async fn find_by_serial(&self, serial_no: &str) -> Lookup {
        let params = [CqlValue::Text(serial_no.to_string())];

        match self.executor.execute(SELECT_CERTIFICATE, &params).await {
            QueryOutcome::Found(columns) => {
                match CertificateRecord::from_columns(serial_no, &columns) {
                    Ok(record) => Lookup::Found(record),
                    Err(e) => Lookup::Failed(e.to_string()),
                }
            }
            QueryOutcome::NotFound => Lookup::NotFound,
            QueryOutcome::Failure(message) => Lookup::Failed(message),
            QueryOutcome::Applied => {
                Lookup::Failed("lookup returned no result set".to_string())
            }
        }
    }
}
