//! 业务实体模块
//!
//! 实体由外部数据源创建，计算过程中只读

pub mod audit_record;
pub mod contract;
pub mod forecast;
pub mod purchase_order;
pub mod resource;
pub mod resource_mapping;
pub mod risk;

pub use audit_record::AuditRecord;
pub use contract::Contract;
pub use forecast::{Forecast, ForecastResult};
pub use purchase_order::PurchaseOrder;
pub use resource::{Margin, Resource};
pub use resource_mapping::ResourceMapping;
pub use risk::Risk;
