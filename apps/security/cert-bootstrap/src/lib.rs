//! Certificate store bootstrap
//!
//! Waits for Cassandra with a bounded, fixed-delay retry loop, makes sure the
//! `security.certificates` schema exists, then inserts one certificate and
//! reads it back. Statement failures are logged but do not fail the run; an
//! exhausted connection budget does.

pub mod bootstrap;
pub mod config;

use clap::Parser;
use core_config::Environment;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::cassandra::CassandraSessionManager;
use eyre::{Result, WrapErr};
use tracing::info;

pub use bootstrap::{Bootstrap, BootstrapError, BootstrapState, DemoReport};
pub use config::Cli;

/// Parse the command line, then run the bootstrap to completion
pub async fn run() -> Result<()> {
    install_color_eyre();

    let cli = Cli::parse();
    let environment = Environment::from_env();
    init_tracing(&environment);

    let config = cli
        .connection_config()
        .wrap_err("Invalid Cassandra configuration")?;

    info!(
        "Bootstrapping against {} ({} attempt(s), {:?} apart)",
        config.contact_point(),
        config.retry_attempts(),
        config.retry_delay()
    );

    let mut bootstrap = Bootstrap::new(
        CassandraSessionManager::new(config),
        cli.demo_certificate(),
    );

    let report = bootstrap.run().await?;

    info!(
        attempts = report.attempts,
        schema_ready = report.schema.is_ready(),
        inserted = report.insert.is_success(),
        "Demo complete"
    );

    Ok(())
}
