//! 并发加载七个记录集合
//!
//! 任一集合失败则整次加载失败，不会产生只加载了一部分的快照

use serde_json::Value;
use tracing::{info, instrument};

use super::collection::Collection;
use super::normalize::{self, decode_records};
use super::raw::{
    RawAuditRecord, RawContract, RawForecast, RawPurchaseOrder, RawResource, RawResourceMapping,
    RawRisk,
};
use super::source::RecordSource;
use crate::diagnostics::Diagnostics;
use crate::domain::snapshot::RecordSnapshot;
use crate::error::{AppError, Result};

/// 默认最多保留的审计记录条数
pub const DEFAULT_AUDIT_LIMIT: usize = 200;

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// 只保留最新的 N 条审计记录
    pub audit_limit: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            audit_limit: DEFAULT_AUDIT_LIMIT,
        }
    }
}

/// 加载结果: 快照与加载期间的诊断计数
#[derive(Debug, Clone, Default)]
pub struct LoadedSnapshot {
    pub snapshot: RecordSnapshot,
    pub diagnostics: Diagnostics,
}

/// 从响应中取出记录数组，接受 `{ "<key>": [...] }` 或裸数组
pub fn extract_records(collection: Collection, payload: Value) -> Result<Vec<Value>> {
    match payload {
        Value::Array(records) => Ok(records),
        Value::Object(mut envelope) => match envelope.remove(collection.envelope_key()) {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(AppError::ingestion(
                collection.envelope_key(),
                format!("期望数组，实际为 {}", json_kind(&other)),
            )),
            None => Err(AppError::ingestion(
                collection.envelope_key(),
                format!("缺少字段 `{}`", collection.envelope_key()),
            )),
        },
        other => Err(AppError::ingestion(
            collection.envelope_key(),
            format!("期望对象或数组，实际为 {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

async fn fetch_records(source: &dyn RecordSource, collection: Collection) -> Result<Vec<Value>> {
    let payload = source.fetch(collection).await?;
    let records = extract_records(collection, payload)?;
    info!("{}: {} 条", collection, records.len());
    Ok(records)
}

/// 全部集合到齐后才构造快照
#[instrument(skip(source))]
pub async fn load_snapshot(
    source: &dyn RecordSource,
    options: LoadOptions,
) -> Result<LoadedSnapshot> {
    let (contracts, purchase_orders, resources, risks, mappings, audit_records, forecasts) =
        tokio::try_join!(
            fetch_records(source, Collection::Contracts),
            fetch_records(source, Collection::PurchaseOrders),
            fetch_records(source, Collection::Resources),
            fetch_records(source, Collection::Risks),
            fetch_records(source, Collection::PoMappings),
            fetch_records(source, Collection::AuditRecords),
            fetch_records(source, Collection::Forecasts),
        )?;

    let mut diagnostics = Diagnostics::new();
    let d = &mut diagnostics;

    let contracts = decode_records::<RawContract>(Collection::Contracts, contracts, d)
        .into_iter()
        .map(|raw| normalize::contract(raw, d))
        .collect();
    let purchase_orders =
        decode_records::<RawPurchaseOrder>(Collection::PurchaseOrders, purchase_orders, d)
            .into_iter()
            .map(|raw| normalize::purchase_order(raw, d))
            .collect();
    let resources = decode_records::<RawResource>(Collection::Resources, resources, d)
        .into_iter()
        .map(|raw| normalize::resource(raw, d))
        .collect();
    let risks = decode_records::<RawRisk>(Collection::Risks, risks, d)
        .into_iter()
        .map(normalize::risk)
        .collect();
    let mappings = decode_records::<RawResourceMapping>(Collection::PoMappings, mappings, d)
        .into_iter()
        .map(normalize::mapping)
        .collect();
    let mut audit_records: Vec<_> =
        decode_records::<RawAuditRecord>(Collection::AuditRecords, audit_records, d)
            .into_iter()
            .filter_map(|raw| normalize::audit_record(raw, d))
            .collect();
    let forecasts = decode_records::<RawForecast>(Collection::Forecasts, forecasts, d)
        .into_iter()
        .map(|raw| normalize::forecast(raw, d))
        .collect();

    audit_records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    audit_records.truncate(options.audit_limit);

    let snapshot = RecordSnapshot {
        contracts,
        purchase_orders,
        resources,
        risks,
        mappings,
        audit_records,
        forecasts,
    };
    info!(
        contracts = snapshot.contracts.len(),
        purchase_orders = snapshot.purchase_orders.len(),
        resources = snapshot.resources.len(),
        mappings = snapshot.mappings.len(),
        skipped = diagnostics.total(),
        "快照加载完成"
    );
    Ok(LoadedSnapshot {
        snapshot,
        diagnostics,
    })
}
