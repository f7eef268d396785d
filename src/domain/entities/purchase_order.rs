//! 采购订单实体

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::value_objects::RecordId;

/// 已收到 PO 的状态值
pub const PO_STATUS_RECEIVED: &str = "received";

/// 采购订单 (PO)
#[derive(Debug, Clone, Default, Serialize)]
pub struct PurchaseOrder {
    pub po_id: Option<RecordId>,
    pub contract_id: Option<RecordId>,
    pub customer_name: String,
    pub service_name: String,
    pub po_number: String,
    /// 原始文本，排序时按字符串比较
    pub period_start_text: String,
    pub period_end_text: String,
    pub period_end: Option<NaiveDate>,
    pub po_status: String,
}

impl PurchaseOrder {
    pub fn is_received(&self) -> bool {
        self.po_status == PO_STATUS_RECEIVED
    }

    /// 没有服务期结束日期 (长期有效)
    pub fn is_open_ended(&self) -> bool {
        self.period_end_text.trim().is_empty()
    }
}
