//! Certificate store bootstrap - Entry Point
//!
//! Exits non-zero when Cassandra never became reachable.

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    cert_bootstrap::run().await
}
