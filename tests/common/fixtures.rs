//! Static datasets used across harnesses.

use seekbox_core::Record;
use serde_json::json;

/// The two-record dataset used by the reference scenarios.
pub fn apple_banana() -> Vec<Record> {
    vec![
        json!({"id": 1, "name": "Apple"}),
        json!({"id": 2, "name": "Banana"}),
    ]
}

/// A handful of fruit with ids 1..=6.
pub fn fruit() -> Vec<Record> {
    vec![
        json!({"id": 1, "name": "Apple", "colour": "red"}),
        json!({"id": 2, "name": "Banana", "colour": "yellow"}),
        json!({"id": 3, "name": "Cherry", "colour": "red"}),
        json!({"id": 4, "name": "Grape", "colour": "purple"}),
        json!({"id": 5, "name": "Pineapple", "colour": "yellow"}),
        json!({"id": 6, "name": "Blackberry", "colour": "black"}),
    ]
}

/// Records with nested fields, arrays, nulls and non-string values.
pub fn people() -> Vec<Record> {
    vec![
        json!({
            "id": "p-1",
            "name": {"first": "Ada", "last": "Lovelace"},
            "address": {"city": "London"},
            "tags": ["math", "engines"]
        }),
        json!({
            "id": "p-2",
            "name": {"first": "Grace", "last": "Hopper"},
            "address": {"city": "New York"},
            "tags": ["compilers"]
        }),
        json!({
            "id": "p-3",
            "name": {"first": "Alan", "last": "Turing"},
            "address": null,
            "tags": []
        }),
        json!({
            "id": "p-4",
            "name": {"first": 404, "last": "Unknown"},
            "address": {"city": 10001}
        }),
    ]
}

/// `n` generated records named `item-<i>` with a rotating word.
pub fn generated(n: usize) -> Vec<Record> {
    const WORDS: &[&str] = &["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];
    (0..n)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("item-{i} {}", WORDS[i % WORDS.len()]),
            })
        })
        .collect()
}
