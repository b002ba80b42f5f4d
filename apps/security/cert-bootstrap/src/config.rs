//! Configuration for the bootstrap run
//!
//! Connection settings come from `CASSANDRA_*` environment variables; any flag
//! given on the command line wins.

use clap::Parser;
use core_config::{ConfigError, FromEnv};
use database::cassandra::ConnectionConfig;
use domain_certificates::NewCertificate;
use std::time::Duration;

pub const DEMO_SERIAL: &str = "67890";
pub const DEMO_SUBJECT: &str = "CN=Retry Logic Demo";

#[derive(Debug, Parser)]
#[command(name = "cert-bootstrap")]
#[command(about = "Wait for Cassandra, ensure the certificates schema, insert and read back a demo record")]
pub struct Cli {
    /// Cassandra host [env: CASSANDRA_HOST]
    #[arg(long)]
    pub host: Option<String>,

    /// CQL port [env: CASSANDRA_PORT]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Connection attempts before giving up [env: CASSANDRA_RETRY_ATTEMPTS]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub retry_attempts: Option<u32>,

    /// Seconds between connection attempts [env: CASSANDRA_RETRY_DELAY_SECS]
    #[arg(long)]
    pub retry_delay_secs: Option<u64>,

    /// Serial number of the demo certificate
    #[arg(long, default_value = DEMO_SERIAL)]
    pub serial: String,

    /// Subject of the demo certificate
    #[arg(long, default_value = DEMO_SUBJECT)]
    pub subject: String,
}

impl Cli {
    /// Layer the command-line overrides on top of `base`
    pub fn apply(&self, base: ConnectionConfig) -> ConnectionConfig {
        let mut config = base;
        if let Some(host) = &self.host {
            config = config.with_host(host.clone());
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(attempts) = self.retry_attempts {
            config = config.with_retry_attempts(attempts);
        }
        if let Some(secs) = self.retry_delay_secs {
            config = config.with_retry_delay(Duration::from_secs(secs));
        }
        config
    }

    /// Connection settings from the environment, then the flags
    pub fn connection_config(&self) -> Result<ConnectionConfig, ConfigError> {
        Ok(self.apply(ConnectionConfig::from_env()?))
    }

    pub fn demo_certificate(&self) -> NewCertificate {
        NewCertificate::new(self.serial.clone(), self.subject.clone())
    }
}
