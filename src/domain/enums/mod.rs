//! 业务枚举模块

pub mod status_enums;

pub use status_enums::{ContractStatus, MappingState, PoPeriodStatus, RagStatus, ResourceClass};
