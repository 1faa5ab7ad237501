//! Common test utilities and assertion helpers.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use messboard::host::MemoryHost;
use messboard::matrix::MatrixSpec;
use messboard::pages::InitOutcome;
use messboard::types::ChartConfig;
use serde_json::Value;

/// The native chart mounted on `id`.
pub fn native<'a>(host: &'a MemoryHost, id: &str) -> &'a ChartConfig {
    host.chart(id)
        .unwrap_or_else(|| panic!("no chart on '{id}'"))
        .as_native()
        .unwrap_or_else(|| panic!("'{id}' is not a native chart"))
}

/// The native chart on `id`, serialized as the charting library sees it.
pub fn native_json(host: &MemoryHost, id: &str) -> Value {
    serde_json::to_value(native(host, id)).expect("chart config serializes")
}

pub fn matrix<'a>(host: &'a MemoryHost, id: &str) -> &'a MatrixSpec {
    host.chart(id)
        .unwrap_or_else(|| panic!("no chart on '{id}'"))
        .as_matrix()
        .unwrap_or_else(|| panic!("'{id}' is not a matrix chart"))
}

/// Dataset labels in order.
pub fn dataset_labels(config: &Value) -> Vec<String> {
    config["data"]["datasets"]
        .as_array()
        .expect("datasets")
        .iter()
        .map(|d| d["label"].as_str().unwrap_or_default().to_string())
        .collect()
}

pub fn assert_skipped(outcome: &InitOutcome) {
    assert!(
        matches!(outcome, InitOutcome::Skipped(_)),
        "expected a skip, got {outcome}"
    );
}

pub fn assert_mounted(outcome: &InitOutcome, count: usize) {
    assert_eq!(outcome, &InitOutcome::Mounted(count), "got {outcome}");
}
