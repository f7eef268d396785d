//! 审计记录实体

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 一次字段变更
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub table_name: String,
    pub operation: String,
    pub field_name: String,
    /// 空值、空串和 `"null"` 统一为 `None`
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}
