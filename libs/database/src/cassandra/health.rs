use scylla::client::session::Session;
use scylla::errors::ExecutionError;
use scylla::response::query_result::QueryResult;

use super::session::CassandraSession;

const RELEASE_VERSION_QUERY: &str = "SELECT release_version FROM system.local";

/// Read the node's `release_version`; `None` if the row is missing or odd
pub(crate) async fn release_version(session: &Session) -> Result<Option<String>, ExecutionError> {
    let result = session.query_unpaged(RELEASE_VERSION_QUERY, ()).await?;
    Ok(extract_version(result))
}

fn extract_version(result: QueryResult) -> Option<String> {
    let rows_result = result.into_rows_result().ok()?;
    let (version,) = rows_result.maybe_first_row::<(String,)>().ok()??;
    Some(version)
}

/// Check Cassandra liveness with a cheap read of `system.local`
///
/// A closed session is reported as unhealthy.
///
/// # Example
/// ```ignore
/// use database::cassandra::{ConnectionConfig, check_health, connect};
///
/// let session = connect(&ConnectionConfig::new("127.0.0.1")).await?;
/// assert!(check_health(&session).await);
/// ```
pub async fn check_health(session: &CassandraSession) -> bool {
    match session.driver() {
        Some(driver) => release_version(driver).await.is_ok(),
        None => false,
    }
}
