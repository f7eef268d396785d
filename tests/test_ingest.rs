use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;

use sow_insight::diagnostics::SkipReason;
use sow_insight::domain::{Margin, MappingState, RagStatus};
use sow_insight::error::{AppError, Result};
use sow_insight::ingest::{load_snapshot, Collection, FileRecordSource, LoadOptions, RecordSource};

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/basic");

/// 内存中的记录来源，未配置的集合返回空信封
struct MemorySource {
    payloads: HashMap<Collection, Value>,
}

impl MemorySource {
    fn new(payloads: Vec<(Collection, Value)>) -> Self {
        Self {
            payloads: payloads.into_iter().collect(),
        }
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn fetch(&self, collection: Collection) -> Result<Value> {
        Ok(self
            .payloads
            .get(&collection)
            .cloned()
            .unwrap_or_else(|| json!({ collection.envelope_key(): [] })))
    }
}

/// 某个集合请求失败
struct FailingSource {
    failing: Collection,
}

#[async_trait]
impl RecordSource for FailingSource {
    async fn fetch(&self, collection: Collection) -> Result<Value> {
        if collection == self.failing {
            return Err(AppError::Network("connection refused".to_string()));
        }
        Ok(json!([]))
    }
}

#[tokio::test]
async fn test_load_fixture_directory() {
    let source = FileRecordSource::new(FIXTURES);
    let loaded = load_snapshot(&source, LoadOptions::default()).await.unwrap();
    let snapshot = &loaded.snapshot;

    assert_eq!(snapshot.contracts.len(), 4);
    assert_eq!(snapshot.purchase_orders.len(), 4);
    assert_eq!(snapshot.resources.len(), 4);
    assert_eq!(snapshot.risks.len(), 4);
    assert_eq!(snapshot.mappings.len(), 5);
    // 时间戳无法解析的一条被排除
    assert_eq!(snapshot.audit_records.len(), 3);
    assert_eq!(snapshot.forecasts.len(), 2);

    let initech = &snapshot.contracts[3];
    assert!(initech.value.is_none());
    assert_eq!(initech.duration_months, 0);

    let grace = &snapshot.resources[1];
    assert!(grace.is_active);
    assert_eq!(grace.margin, Margin::Absent);

    assert_eq!(snapshot.mappings[1].state(), MappingState::Active);
    assert_eq!(snapshot.mappings[2].state(), MappingState::Ended);
    assert_eq!(snapshot.risks[3].rag_status, RagStatus::Other("Unknown".to_string()));

    assert_eq!(loaded.diagnostics.count(SkipReason::NonNumericValue), 1);
    assert_eq!(loaded.diagnostics.count(SkipReason::InvalidTimestamp), 1);
    assert_eq!(loaded.diagnostics.total(), 2);
}

#[tokio::test]
async fn test_audit_limit_keeps_most_recent() {
    let source = FileRecordSource::new(FIXTURES);
    let loaded = load_snapshot(&source, LoadOptions { audit_limit: 1 }).await.unwrap();
    let audit = &loaded.snapshot.audit_records;
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].table_name, "purchase_orders");
}

#[tokio::test]
async fn test_missing_envelope_key_fails_whole_load() {
    let source = MemorySource::new(vec![
        (Collection::Contracts, json!({"contracts": [{"contract_id": 1}]})),
        (Collection::Forecasts, json!({"items": []})),
    ]);
    let err = load_snapshot(&source, LoadOptions::default()).await.unwrap_err();
    assert!(err.is_ingestion_failure());
    assert!(err.to_string().contains("forecasts"));
}

#[tokio::test]
async fn test_non_array_collection_fails_whole_load() {
    let source = MemorySource::new(vec![(Collection::Resources, json!({"resources": "oops"}))]);
    let err = load_snapshot(&source, LoadOptions::default()).await.unwrap_err();
    assert!(matches!(err, AppError::IngestionFailed { collection: "resources", .. }));
}

#[tokio::test]
async fn test_fetch_error_fails_whole_load() {
    let source = FailingSource {
        failing: Collection::PoMappings,
    };
    let err = load_snapshot(&source, LoadOptions::default()).await.unwrap_err();
    assert!(matches!(err, AppError::Network(_)));
}

#[tokio::test]
async fn test_empty_collections_are_valid() {
    let source = MemorySource::new(Vec::new());
    let loaded = load_snapshot(&source, LoadOptions::default()).await.unwrap();
    assert!(loaded.snapshot.contracts.is_empty());
    assert!(loaded.diagnostics.is_empty());
}

#[tokio::test]
async fn test_malformed_records_are_skipped_not_fatal() {
    let source = MemorySource::new(vec![(
        Collection::Contracts,
        json!({"contracts": [{"contract_id": "c1", "sow_value_gbp": 10}, 42, null]}),
    )]);
    let loaded = load_snapshot(&source, LoadOptions::default()).await.unwrap();
    assert_eq!(loaded.snapshot.contracts.len(), 1);
    assert_eq!(loaded.diagnostics.count(SkipReason::MalformedRecord), 2);
}
