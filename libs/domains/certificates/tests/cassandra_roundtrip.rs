//! Certificate repository against a real Cassandra node.
//!
//! Run with `cargo test -p domain_certificates -- --ignored` (needs Docker).

use domain_certificates::{CertificateRepository, Lookup, NewCertificate};
use test_utils::{TestCassandra, TestDataBuilder};

#[tokio::test]
#[ignore] // Requires Docker
async fn test_schema_ensure_is_idempotent() {
    let cassandra = TestCassandra::new().await;
    let repository = CertificateRepository::new(cassandra.session());

    for _ in 0..3 {
        let report = repository.ensure_schema().await;
        assert!(report.is_ready(), "schema ensure failed: {report:?}");
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_insert_then_lookup_round_trip() {
    let cassandra = TestCassandra::new().await;
    let repository = CertificateRepository::new(cassandra.session());
    assert!(repository.ensure_schema().await.is_ready());

    let outcome = repository
        .insert(&NewCertificate::new("67890", "CN=Retry Logic Demo"))
        .await;
    assert!(outcome.is_success(), "insert failed: {outcome:?}");

    match repository.find_by_serial("67890").await {
        Lookup::Found(record) => {
            assert_eq!(record.subject, "CN=Retry Logic Demo");
            assert!(record.issued_on.is_some());
            assert!(record.expires_on.is_some());
        }
        other => panic!("expected the inserted certificate, got {other:?}"),
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_lookup_missing_serial_is_not_found() {
    let cassandra = TestCassandra::new().await;
    let builder = TestDataBuilder::from_test_name("test_lookup_missing_serial_is_not_found");
    let repository = CertificateRepository::new(cassandra.session());
    assert!(repository.ensure_schema().await.is_ready());

    let lookup = repository.find_by_serial(&builder.serial_no("absent")).await;
    assert_eq!(lookup, Lookup::NotFound);

    assert_eq!(repository.find_by_serial("00000").await, Lookup::NotFound);
}
