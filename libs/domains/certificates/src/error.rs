use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CertificateError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Malformed certificate row: {0}")]
    MalformedRow(String),
}

pub type CertificateResult<T> = Result<T, CertificateError>;

impl From<validator::ValidationErrors> for CertificateError {
    fn from(err: validator::ValidationErrors) -> Self {
        CertificateError::Validation(err.to_string())
    }
}
