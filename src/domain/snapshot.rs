//! 记录快照

use serde::Serialize;

use super::entities::{
    AuditRecord, Contract, Forecast, PurchaseOrder, Resource, ResourceMapping, Risk,
};

/// 七个记录集合的只读快照
///
/// 只有全部集合都加载成功后才会构造，计算期间不修改
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordSnapshot {
    pub contracts: Vec<Contract>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub resources: Vec<Resource>,
    pub risks: Vec<Risk>,
    pub mappings: Vec<ResourceMapping>,
    pub audit_records: Vec<AuditRecord>,
    pub forecasts: Vec<Forecast>,
}
