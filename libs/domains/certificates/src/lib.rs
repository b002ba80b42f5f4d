//! Certificates Domain
//!
//! Schema, statements and typed access for the `security.certificates` table.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ CertificateRepository│  ← Typed insert / lookup, schema ensure
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │  StatementExecutor   │  ← database::cassandra (driver boundary)
//! └──────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_certificates::{CertificateRepository, Lookup, NewCertificate};
//!
//! let repository = CertificateRepository::new(session);
//! repository.ensure_schema().await;
//! repository.insert(&NewCertificate::new("67890", "CN=Retry Logic Demo")).await;
//! if let Lookup::Found(cert) = repository.find_by_serial("67890").await {
//!     println!("{}", cert.subject);
//! }
//! ```

pub mod error;
pub mod models;
pub mod queries;
pub mod repository;

pub use error::{CertificateError, CertificateResult};
pub use models::{CertificateRecord, NewCertificate};
pub use repository::{CertificateRepository, Lookup, SchemaReport};
