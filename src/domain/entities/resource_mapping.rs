//! 人员-PO 映射实体

use serde::Serialize;

use crate::domain::enums::MappingState;
use crate::domain::value_objects::RecordId;
use crate::reconcile::effective_mapping_state;

/// 人员分配到 PO 的一段时间
#[derive(Debug, Clone, Serialize)]
pub struct ResourceMapping {
    pub mapping_id: Option<RecordId>,
    pub po_id: Option<RecordId>,
    pub resource_id: Option<RecordId>,
    /// 旧版数据没有该字段
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub end_date: Option<String>,
    /// 构造时一次性推导，之后只读
    state: MappingState,
}

impl ResourceMapping {
    pub fn new(
        mapping_id: Option<RecordId>,
        po_id: Option<RecordId>,
        resource_id: Option<RecordId>,
        status: Option<String>,
        created_at: Option<String>,
        end_date: Option<String>,
    ) -> Self {
        let state = effective_mapping_state(status.as_deref(), end_date.as_deref());
        Self {
            mapping_id,
            po_id,
            resource_id,
            status,
            created_at,
            end_date,
            state,
        }
    }

    pub fn state(&self) -> MappingState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// 非空的结束日期
    pub fn end_date_text(&self) -> Option<&str> {
        self.end_date
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
