//! 合同 (SOW) 实体

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::value_objects::{Money, RecordId};

/// 缺少客户名时的分组标签
pub const UNKNOWN_CUSTOMER: &str = "Unknown";

/// 合同 (Statement of Work)
#[derive(Debug, Clone, Default, Serialize)]
pub struct Contract {
    pub contract_id: Option<RecordId>,
    pub customer_name: String,
    pub service_name: String,
    pub sow_reference: String,
    pub sow_short_name: String,
    /// 合同总额，非数字时为 `None`
    pub value: Option<Money>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_months: u32,
    /// 源数据记录的状态，层级视图中缺省为 `Active`
    pub recorded_status: Option<String>,
}

impl Contract {
    /// 客户分组用的名称，空名归入 `Unknown`
    pub fn customer_label(&self) -> &str {
        if self.customer_name.is_empty() {
            UNKNOWN_CUSTOMER
        } else {
            &self.customer_name
        }
    }

    pub fn value_or_zero(&self) -> Money {
        self.value.unwrap_or_default()
    }

    pub fn recorded_status_or_active(&self) -> &str {
        match self.recorded_status.as_deref() {
            Some(status) if !status.is_empty() => status,
            _ => "Active",
        }
    }
}
