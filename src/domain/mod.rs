//! 领域模型层
//!
//! 纯粹的业务数据，不依赖数据来源与展示层
//!
//! - `entities`: 合同、PO、映射、人员、风险、审计、预测
//! - `value_objects`: 金额、日期窗口、记录标识
//! - `enums`: 状态枚举
//! - `snapshot`: 一次计算使用的只读快照

pub mod entities;
pub mod enums;
pub mod snapshot;
pub mod value_objects;

pub use entities::{
    AuditRecord, Contract, Forecast, ForecastResult, Margin, PurchaseOrder, Resource,
    ResourceMapping, Risk,
};
pub use enums::{ContractStatus, MappingState, PoPeriodStatus, RagStatus, ResourceClass};
pub use snapshot::RecordSnapshot;
pub use value_objects::{DateWindow, Money, RecordId};
