//! Domain-specific assertion macros for seekbox harnesses.
//!
//! These wrap `pretty_assertions` and print the whole result list on
//! failure, which is usually what you need to see.

/// Assert the ids of a result list, in order.
///
/// ```rust
/// assert_ids!(controller.session().results(), [2, 1]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($records:expr, [$($id:expr),* $(,)?]) => {{
        let actual: Vec<serde_json::Value> = $records.into_iter().map(|r| r["id"].clone()).collect();
        let expected: Vec<serde_json::Value> = vec![$(serde_json::json!($id)),*];
        pretty_assertions::assert_eq!(actual, expected, "result ids differ");
    }};
}

/// Assert that no two records in `records` share an identity.
#[macro_export]
macro_rules! assert_unique {
    ($records:expr) => {{
        let records: &[seekbox_core::Record] = $records;
        for (i, a) in records.iter().enumerate() {
            for b in &records[i + 1..] {
                if seekbox_core::same_record(a, b) {
                    panic!(
                        "assert_unique! failed: {} appears twice in {:?}",
                        seekbox_core::record_identity(a),
                        records
                    );
                }
            }
        }
    }};
}

/// Assert that `sub` is an order-preserving subsequence of `full`.
#[macro_export]
macro_rules! assert_subsequence {
    ($sub:expr, $full:expr) => {{
        let sub: &[&seekbox_core::Record] = $sub;
        let full: &[seekbox_core::Record] = $full;
        let mut rest = full.iter();
        for item in sub {
            if !rest.any(|candidate| std::ptr::eq(candidate, *item)) {
                panic!(
                    "assert_subsequence! failed: {} is missing or out of order",
                    item
                );
            }
        }
    }};
}
