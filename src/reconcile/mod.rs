//! 状态推导
//!
//! 从可能缺失或旧版的字段推导合同、PO、映射的有效状态。
//! 当前时间由调用方注入，便于测试。

use chrono::{DateTime, Utc};

use crate::domain::entities::{Contract, PurchaseOrder, ResourceMapping};
use crate::domain::enums::{ContractStatus, MappingState, PoPeriodStatus};
use crate::time_util::start_of_day;

/// 映射状态的默认值 (旧版数据没有 status 字段)
pub const MAPPING_STATUS_ACTIVE: &str = "Active";

/// 映射有效状态
///
/// - 结束日期非空: 一定是 Ended，不看 status
/// - status 缺失或为空: 视为 `Active`
/// - status 是其他值: Ended
pub fn effective_mapping_state(status: Option<&str>, end_date: Option<&str>) -> MappingState {
    if end_date.map(str::trim).is_some_and(|text| !text.is_empty()) {
        return MappingState::Ended;
    }
    match status.map(str::trim) {
        None | Some("") | Some(MAPPING_STATUS_ACTIVE) => MappingState::Active,
        Some(_) => MappingState::Ended,
    }
}

/// 基于注入时间的状态推导器
#[derive(Debug, Clone, Copy)]
pub struct StatusReconciler {
    now: DateTime<Utc>,
}

impl StatusReconciler {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// 合同: 结束日期 >= 当前时间为 Active，否则 Completed
    pub fn contract_status(&self, contract: &Contract) -> ContractStatus {
        match contract.end_date {
            Some(end) if start_of_day(end) >= self.now => ContractStatus::Active,
            _ => ContractStatus::Completed,
        }
    }

    /// PO: 没有结束日期或结束日期 >= 当前时间为 Open
    ///
    /// 结束日期存在但无法解析时为 Closed
    pub fn po_period_status(&self, po: &PurchaseOrder) -> PoPeriodStatus {
        if po.is_open_ended() {
            return PoPeriodStatus::Open;
        }
        match po.period_end {
            Some(end) if start_of_day(end) >= self.now => PoPeriodStatus::Open,
            _ => PoPeriodStatus::Closed,
        }
    }

    pub fn mapping_state(&self, mapping: &ResourceMapping) -> MappingState {
        mapping.state()
    }
}
