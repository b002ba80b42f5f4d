/// A connection handshake that did not complete.
///
/// `message` is the driver's error text, unmodified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Connection error: {message}")]
pub struct ConnectionError {
    pub message: String,
}

impl ConnectionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(feature = "cassandra")]
impl From<scylla::errors::NewSessionError> for ConnectionError {
    fn from(err: scylla::errors::NewSessionError) -> Self {
        Self::new(err.to_string())
    }
}
