//! `SKIP_TEST_CLUSTER` policy for suites that need embedded PostgreSQL.

fn skip_requested() -> bool {
    std::env::var("SKIP_TEST_CLUSTER").is_ok_and(|value| {
        ["1", "true", "yes"]
            .iter()
            .any(|truthy| value.eq_ignore_ascii_case(truthy))
    })
}

/// Skip quietly when `SKIP_TEST_CLUSTER` is truthy; fail loudly otherwise so
/// a broken cluster never passes CI unnoticed.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if skip_requested() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        return None;
    }
    panic!("embedded PostgreSQL setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
}
