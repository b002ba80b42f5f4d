//! Shared test utilities
//!
//! - `TestCassandra`: Cassandra container with automatic cleanup (feature: "cassandra")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestCassandra, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore] // Requires Docker
//! async fn my_cassandra_test() {
//!     let cassandra = TestCassandra::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_cassandra_test");
//!
//!     let serial = builder.serial_no("main");
//! }
//! ```

#[cfg(feature = "cassandra")]
mod cassandra;

#[cfg(feature = "cassandra")]
pub use cassandra::TestCassandra;

/// Builder for test data with deterministic randomization
///
/// Tests sharing one container must not collide on primary keys, so every
/// value is derived from a per-test seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_insert_certificate");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Certificate serial number unique to this test
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let serial = TestDataBuilder::new(7).serial_no("main");
    /// assert_eq!(serial, "test-7-main");
    /// ```
    pub fn serial_no(&self, suffix: &str) -> String {
        format!("test-{}-{}", self.seed, suffix)
    }

    /// Distinguished-name style subject unique to this test
    pub fn subject(&self, common_name: &str) -> String {
        format!("CN={},OU=test-{}", common_name, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.serial_no("a"), builder2.serial_no("a"));
        assert_eq!(builder1.subject("demo"), builder2.subject("demo"));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.serial_no("main"), builder2.serial_no("main"));
    }

    #[test]
    fn test_subject_format() {
        assert_eq!(TestDataBuilder::new(1).subject("demo"), "CN=demo,OU=test-1");
    }
}
