use chrono::{DateTime, Utc};
use database::cassandra::{CqlTimestamp, CqlValue};
use validator::Validate;

use crate::error::{CertificateError, CertificateResult};

/// A row of `security.certificates`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRecord {
    pub serial_no: String,
    pub subject: String,
    /// Assigned by the server at insert time
    pub issued_on: Option<DateTime<Utc>>,
    /// Assigned by the server at insert time
    pub expires_on: Option<DateTime<Utc>>,
}

impl CertificateRecord {
    /// Build a record from the columns of the certificate lookup
    /// (subject, issued_on, expires_on).
    pub fn from_columns(serial_no: &str, columns: &[Option<CqlValue>]) -> CertificateResult<Self> {
        let [subject, issued_on, expires_on] = columns else {
            return Err(CertificateError::MalformedRow(format!(
                "expected 3 columns, got {}",
                columns.len()
            )));
        };

        let subject = match subject {
            Some(CqlValue::Text(s)) | Some(CqlValue::Ascii(s)) => s.clone(),
            Some(other) => {
                return Err(CertificateError::MalformedRow(format!(
                    "subject is not text: {other:?}"
                )));
            }
            None => return Err(CertificateError::MalformedRow("subject is null".into())),
        };

        Ok(Self {
            serial_no: serial_no.to_string(),
            subject,
            issued_on: timestamp_column("issued_on", issued_on)?,
            expires_on: timestamp_column("expires_on", expires_on)?,
        })
    }
}

fn timestamp_column(
    name: &str,
    value: &Option<CqlValue>,
) -> CertificateResult<Option<DateTime<Utc>>> {
    match value {
        None => Ok(None),
        Some(CqlValue::Timestamp(CqlTimestamp(millis))) => DateTime::from_timestamp_millis(*millis)
            .map(Some)
            .ok_or_else(|| CertificateError::MalformedRow(format!("{name} out of range"))),
        Some(other) => Err(CertificateError::MalformedRow(format!(
            "{name} is not a timestamp: {other:?}"
        ))),
    }
}

/// Input for inserting a certificate
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewCertificate {
    #[validate(length(min = 1, max = 128))]
    pub serial_no: String,

    #[validate(length(min = 1, max = 1024))]
    pub subject: String,
}

impl NewCertificate {
    pub fn new(serial_no: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            serial_no: serial_no.into(),
            subject: subject.into(),
        }
    }

    /// Positional bind values for the insert statement
    pub fn bind_values(&self) -> [CqlValue; 2] {
        [
            CqlValue::Text(self.serial_no.clone()),
            CqlValue::Text(self.subject.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(millis: i64) -> Option<CqlValue> {
        Some(CqlValue::Timestamp(CqlTimestamp(millis)))
    }

    #[test]
    fn test_from_columns() {
        let columns = vec![
            Some(CqlValue::Text("CN=Retry Logic Demo".into())),
            ts(1_700_000_000_000),
            ts(1_700_000_000_000),
        ];

        let record = CertificateRecord::from_columns("67890", &columns).unwrap();
        assert_eq!(record.serial_no, "67890");
        assert_eq!(record.subject, "CN=Retry Logic Demo");
        assert_eq!(
            record.issued_on.map(|t| t.timestamp_millis()),
            Some(1_700_000_000_000)
        );
        assert_eq!(record.issued_on, record.expires_on);
    }

    #[test]
    fn test_from_columns_allows_null_timestamps() {
        let columns = vec![Some(CqlValue::Text("CN=x".into())), None, None];
        let record = CertificateRecord::from_columns("1", &columns).unwrap();
        assert!(record.issued_on.is_none());
        assert!(record.expires_on.is_none());
    }

    #[test]
    fn test_from_columns_rejects_wrong_shape() {
        let err = CertificateRecord::from_columns("1", &[None]).unwrap_err();
        assert_eq!(
            err,
            CertificateError::MalformedRow("expected 3 columns, got 1".into())
        );
    }

    #[test]
    fn test_from_columns_rejects_null_subject() {
        let err = CertificateRecord::from_columns("1", &[None, None, None]).unwrap_err();
        assert!(matches!(err, CertificateError::MalformedRow(_)));
    }

    #[test]
    fn test_from_columns_rejects_non_timestamp() {
        let columns = vec![
            Some(CqlValue::Text("CN=x".into())),
            Some(CqlValue::Int(7)),
            None,
        ];
        let err = CertificateRecord::from_columns("1", &columns).unwrap_err();
        assert!(err.to_string().contains("issued_on"));
    }

    #[test]
    fn test_new_certificate_validation() {
        assert!(NewCertificate::new("67890", "CN=Retry Logic Demo").validate().is_ok());
        assert!(NewCertificate::new("", "CN=x").validate().is_err());
        assert!(NewCertificate::new("1", "").validate().is_err());
    }

    #[test]
    fn test_bind_values_order() {
        let values = NewCertificate::new("67890", "CN=demo").bind_values();
        assert_eq!(values[0], CqlValue::Text("67890".into()));
        assert_eq!(values[1], CqlValue::Text("CN=demo".into()));
    }
}
