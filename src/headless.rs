//! One-shot, non-interactive searches.
//!
//! A headless run drives the same [`SearchController`] the TUI uses, so
//! debounce, exclusion and ordering behave identically; it simply waits for
//! the pending filter instead of polling for keys.

use anyhow::Context;
use seekbox_core::{dataset_from_json, resolve, Record, SearchConfig, SearchController};
use std::path::Path;

/// Read a JSON array of records from `path`.
pub fn load_dataset(path: &Path) -> anyhow::Result<Vec<Record>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading dataset {}", path.display()))?;
    let document: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing dataset {}", path.display()))?;
    let records = dataset_from_json(document)?;
    tracing::info!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(records)
}

/// Fail when the display field resolves on none of the records, which would
/// leave every dropdown row and chip blank. An empty dataset passes.
pub fn check_display_field(config: &SearchConfig, dataset: &[Record]) -> anyhow::Result<()> {
    let field = config.display_field();
    let shown = dataset
        .iter()
        .any(|record| resolve(record, field).is_some_and(|value| !value.is_null()));
    if !dataset.is_empty() && !shown {
        anyhow::bail!("display field `{field}` is missing from every record: pass --display <path>");
    }
    Ok(())
}

/// Type `query` into a fresh controller and return the settled results.
pub async fn search_once(config: SearchConfig, dataset: Vec<Record>, query: &str) -> Vec<Record> {
    let mut controller = SearchController::new(config, dataset, ());
    controller.on_text_input(query);
    controller.settle().await;
    controller.session().results().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keyed(keys: &[&str]) -> seekbox_core::SearchConfigBuilder {
        SearchConfig::builder().filter_keys(keys.iter().copied())
    }

    #[test]
    fn display_field_missing_everywhere_is_rejected() {
        let data = vec![json!({"id": 1, "title": "Dune"}), json!({"id": 2, "title": "Emma"})];
        let config = keyed(&["title"]).build().unwrap();
        let err = check_display_field(&config, &data).unwrap_err();
        assert!(err.to_string().contains("`name`"));

        let config = keyed(&["title"]).display_field("title").build().unwrap();
        assert!(check_display_field(&config, &data).is_ok());
    }

    #[test]
    fn display_field_present_on_some_records_passes() {
        let data = vec![json!({"id": 1, "name": null}), json!({"id": 2, "name": "Kiwi"})];
        let config = keyed(&["name"]).build().unwrap();
        assert!(check_display_field(&config, &data).is_ok());
        assert!(check_display_field(&config, &[]).is_ok());
    }
}
