//! Installing an extended registry as the process-wide instance.
//!
//! Kept to a single test: the global is initialized once per test binary.

use iam_codes::{global, http_status_for, install, lookup, register_codes, CodedError, RegistryBuilder};

#[test]
fn installed_registry_serves_service_codes() {
    let mut builder = RegistryBuilder::with_builtin();
    register_codes!(&mut builder => {
        120_001 => (404, "Policy not found"),
        120_002 => (400, "Policy already exist"),
    });
    assert!(install(builder.build()).is_ok());

    assert_eq!(http_status_for(120_001), 404);
    assert_eq!(lookup(120_002).map(|entry| entry.message()), Some("Policy already exist"));
    assert_eq!(http_status_for(100_002), 500);

    let err = CodedError::new(120_001, "policy p-9 missing");
    assert!(err.is_known());
    assert_eq!(err.to_string(), "Policy not found (120001)");

    // Frozen after first install.
    let rejected = install(RegistryBuilder::new().build());
    assert!(rejected.is_err());
    assert!(global().contains(120_001));
}
