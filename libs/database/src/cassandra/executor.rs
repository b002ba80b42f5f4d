use async_trait::async_trait;
use scylla::response::query_result::QueryResult;
use scylla::value::{CqlValue, Row};
use tracing::{debug, warn};

use super::session::CassandraSession;

/// Result of executing one statement
///
/// Every execution yields exactly one of these; failures never escape as
/// errors or panics.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The statement succeeded and the server returned no result set
    /// (inserts, DDL).
    Applied,

    /// The result set was non-empty. Holds the columns of the first row.
    Found(Vec<Option<CqlValue>>),

    /// The result set was empty.
    NotFound,

    /// The statement failed. Holds the driver's error text.
    Failure(String),
}

impl QueryOutcome {
    pub fn is_success(&self) -> bool {
        !self.is_failure()
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, QueryOutcome::Failure(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            QueryOutcome::Failure(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Columns of the first row, when the statement produced one
    pub fn first_row(&self) -> Option<&[Option<CqlValue>]> {
        match self {
            QueryOutcome::Found(columns) => Some(columns.as_slice()),
            _ => None,
        }
    }
}

/// Runs parameterized statements against a live session
///
/// One call sends at most one request and never retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Bind `params` positionally to the `?` markers of `query` and execute it
    async fn execute(&self, query: &str, params: &[CqlValue]) -> QueryOutcome;
}

#[async_trait]
impl StatementExecutor for CassandraSession {
    async fn execute(&self, query: &str, params: &[CqlValue]) -> QueryOutcome {
        let markers = count_bind_markers(query);
        if markers != params.len() {
            warn!(markers, bound = params.len(), "Bind value count mismatch");
            return QueryOutcome::Failure(format!(
                "statement has {} bind marker(s) but {} value(s) were bound",
                markers,
                params.len()
            ));
        }

        let Some(session) = self.driver() else {
            return QueryOutcome::Failure("session is closed".to_string());
        };

        debug!(query, bound = params.len(), "Executing statement");

        match session.query_unpaged(query, params).await {
            Ok(result) => outcome_from_result(result),
            Err(e) => QueryOutcome::Failure(e.to_string()),
        }
    }
}

fn outcome_from_result(result: QueryResult) -> QueryOutcome {
    if !result.is_rows() {
        return QueryOutcome::Applied;
    }

    let rows = match result.into_rows_result() {
        Ok(rows) => rows,
        Err(e) => return QueryOutcome::Failure(e.to_string()),
    };

    match rows.maybe_first_row::<Row>() {
        Ok(Some(row)) => QueryOutcome::Found(row.columns),
        Ok(None) => QueryOutcome::NotFound,
        Err(e) => QueryOutcome::Failure(e.to_string()),
    }
}

/// Count `?` bind markers outside quoted literals and identifiers
pub fn count_bind_markers(query: &str) -> usize {
    let mut count = 0;
    let mut quote: Option<char> = None;

    for c in query.chars() {
        match (quote, c) {
            (None, '\'' | '"') => quote = Some(c),
            // a doubled quote reopens immediately, so toggling is enough
            (Some(open), c) if c == open => quote = None,
            (None, '?') => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_bind_markers() {
        assert_eq!(count_bind_markers("SELECT release_version FROM system.local"), 0);
        assert_eq!(
            count_bind_markers("SELECT subject FROM security.certificates WHERE serial_no=?"),
            1
        );
        assert_eq!(
            count_bind_markers(
                "INSERT INTO t (a, b, c) VALUES (?, ?, toTimestamp(now()))"
            ),
            2
        );
    }

    #[test]
    fn test_count_bind_markers_ignores_literals() {
        assert_eq!(count_bind_markers("SELECT * FROM t WHERE a='?' AND b=?"), 1);
        assert_eq!(count_bind_markers("SELECT * FROM t WHERE a='it''s ?'"), 0);
        assert_eq!(count_bind_markers("SELECT \"odd?col\" FROM t WHERE k=?"), 1);
    }

    #[test]
    fn test_outcome_helpers() {
        let found = QueryOutcome::Found(vec![Some(CqlValue::Text("CN=demo".into()))]);
        assert!(found.is_success());
        assert_eq!(found.first_row().map(|r| r.len()), Some(1));

        let failed = QueryOutcome::Failure("Keyspace security does not exist".into());
        assert!(failed.is_failure());
        assert_eq!(failed.error_message(), Some("Keyspace security does not exist"));
        assert!(failed.first_row().is_none());

        assert!(QueryOutcome::NotFound.is_success());
        assert!(QueryOutcome::Applied.first_row().is_none());
    }

    #[tokio::test]
    async fn test_mock_executor_passes_bound_values() {
        let mut executor = MockStatementExecutor::new();
        executor
            .expect_execute()
            .withf(|query, params| {
                query.contains("WHERE serial_no=?")
                    && params.len() == 1
                    && params[0] == CqlValue::Text("67890".into())
            })
            .times(1)
            .returning(|_, _| QueryOutcome::NotFound);

        let outcome = executor
            .execute(
                "SELECT subject FROM security.certificates WHERE serial_no=?",
                &[CqlValue::Text("67890".into())],
            )
            .await;

        assert_eq!(outcome, QueryOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_mock_executor_reports_failure() {
        let mut executor = MockStatementExecutor::new();
        executor
            .expect_execute()
            .withf(|query, params| query.starts_with("DROP TABLE") && params.is_empty())
            .times(1)
            .returning(|_, _| QueryOutcome::Failure("unconfigured table nope".into()));

        let outcome = executor.execute("DROP TABLE nope", &[]).await;
        assert_eq!(outcome.error_message(), Some("unconfigured table nope"));
    }
}
