//! 记录集合

use std::fmt;

/// 七个独立的记录集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Contracts,
    PurchaseOrders,
    Resources,
    Risks,
    PoMappings,
    AuditRecords,
    Forecasts,
}

impl Collection {
    /// 响应 JSON 中数组所在的键
    pub fn envelope_key(&self) -> &'static str {
        match self {
            Collection::Contracts => "contracts",
            Collection::PurchaseOrders => "purchase_orders",
            Collection::Resources => "resources",
            Collection::Risks => "risks",
            Collection::PoMappings => "mappings",
            Collection::AuditRecords => "audit_records",
            Collection::Forecasts => "forecasts",
        }
    }

    /// 资源路径名，同时用作本地文件名
    pub fn resource_name(&self) -> &'static str {
        match self {
            Collection::Contracts => "contracts",
            Collection::PurchaseOrders => "purchase-orders",
            Collection::Resources => "resources",
            Collection::Risks => "risks",
            Collection::PoMappings => "po-mappings",
            Collection::AuditRecords => "audit",
            Collection::Forecasts => "forecasts",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.resource_name())
    }

    /// HTTP 接口路径，审计记录带条数限制
    pub fn endpoint(&self, audit_limit: usize) -> String {
        match self {
            Collection::AuditRecords => format!("/api/audit?limit={}", audit_limit),
            other => format!("/api/{}", other.resource_name()),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.envelope_key())
    }
}
