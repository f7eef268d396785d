//! 计算层
//!
//! ```text
//! aggregation (索引/计数) → proration (年内金额) + hierarchy (层级视图)
//!                         → summary / feeds (各实体汇总)
//! ```

pub mod aggregation;
pub mod feeds;
pub mod hierarchy;
pub mod proration;
pub mod summary;

pub use aggregation::{
    average_margin, CustomerBreakdown, CustomerBucket, MappingCounts, RecordIndex, ResourceStats,
};
pub use feeds::{preview_value, AuditEntry, AuditFeed, ForecastFeed};
pub use hierarchy::{
    AssignmentWindow, ContractNode, HierarchyBuilder, PurchaseOrderNode, ResourceAssignment,
};
pub use proration::{annual_contract_value, Proration, ProrationCalculator};
pub use summary::{
    ContractSummary, MonthlySignings, PurchaseOrderSummary, ResourceSummary, RiskSummary, YearMonth,
};
