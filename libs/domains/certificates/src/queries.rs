//! CQL for the certificates table. Every DDL statement is idempotent.

pub const KEYSPACE: &str = "security";

pub const CREATE_KEYSPACE: &str = "CREATE KEYSPACE IF NOT EXISTS security \
     WITH replication = {'class':'SimpleStrategy','replication_factor':1}";

pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS security.certificates (\
     serial_no text PRIMARY KEY, \
     subject text, \
     issued_on timestamp, \
     expires_on timestamp)";

/// Binds `serial_no`, `subject`. Both timestamps are assigned by the server.
pub const INSERT_CERTIFICATE: &str = "INSERT INTO security.certificates \
     (serial_no, subject, issued_on, expires_on) \
     VALUES (?, ?, toTimestamp(now()), toTimestamp(now()))";

/// Binds `serial_no`. Columns: subject, issued_on, expires_on.
pub const SELECT_CERTIFICATE: &str = "SELECT subject, issued_on, expires_on \
     FROM security.certificates WHERE serial_no=?";

#[cfg(test)]
mod tests {
    use super::*;
    use database::cassandra::count_bind_markers;

    #[test]
    fn test_bind_marker_counts() {
        assert_eq!(count_bind_markers(CREATE_KEYSPACE), 0);
        assert_eq!(count_bind_markers(CREATE_TABLE), 0);
        assert_eq!(count_bind_markers(INSERT_CERTIFICATE), 2);
        assert_eq!(count_bind_markers(SELECT_CERTIFICATE), 1);
    }

    #[test]
    fn test_ddl_is_idempotent() {
        assert!(CREATE_KEYSPACE.contains("IF NOT EXISTS"));
        assert!(CREATE_TABLE.contains("IF NOT EXISTS"));
        assert!(CREATE_TABLE.starts_with(&format!("CREATE TABLE IF NOT EXISTS {KEYSPACE}.")));
    }
}
