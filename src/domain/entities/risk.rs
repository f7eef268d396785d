//! 风险实体

use serde::Serialize;

use crate::domain::enums::RagStatus;

/// 风险 / 问题条目
#[derive(Debug, Clone, Serialize)]
pub struct Risk {
    pub reference: String,
    pub risk_type: String,
    pub rag_status: RagStatus,
    pub description: String,
    pub impact: String,
    pub current_status: String,
    pub target_date: String,
}
