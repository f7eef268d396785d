//! 状态相关枚举

use serde::{Deserialize, Serialize};
use std::fmt;

/// 合同 (SOW) 有效状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    /// 结束日期 >= 当前时间
    Active,
    /// 已过期或缺少结束日期
    Completed,
}

impl ContractStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ContractStatus::Active)
    }
}

/// PO 服务期状态，与是否已收到 PO 无关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoPeriodStatus {
    Open,
    Closed,
}

/// 资源映射状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MappingState {
    Active,
    Ended,
}

impl MappingState {
    pub fn is_active(&self) -> bool {
        matches!(self, MappingState::Active)
    }
}

/// 风险 RAG 等级
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RagStatus {
    Red,
    Amber,
    Green,
    /// 其他取值原样保留
    Other(String),
}

impl RagStatus {
    /// 精确匹配 `Red` / `Amber` / `Green`，大小写敏感
    pub fn from_text(text: &str) -> Self {
        match text {
            "Red" => RagStatus::Red,
            "Amber" => RagStatus::Amber,
            "Green" => RagStatus::Green,
            other => RagStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RagStatus::Red => f.write_str("Red"),
            RagStatus::Amber => f.write_str("Amber"),
            RagStatus::Green => f.write_str("Green"),
            RagStatus::Other(text) => f.write_str(text),
        }
    }
}

/// 人员类别: 有毛利率的是外包，否则是正式员工
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceClass {
    Contractor,
    Permanent,
}
