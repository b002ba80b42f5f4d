//! Driver-agnostic pieces shared by the database connectors

pub mod error;
pub mod retry;

pub use error::ConnectionError;
pub use retry::{RetryConfig, RetryExhausted, retry_with_fixed_delay};
