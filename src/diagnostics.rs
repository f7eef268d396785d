//! 跳过记录的诊断计数
//!
//! 单条记录的问题 (日期无法解析、金额不是数字、外键找不到) 不会中断计算，
//! 只是把该记录排除出对应的计算，并在这里计数。

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// 跳过原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// 日期文本无法解析
    UnparseableDate,
    /// 金额 / 百分比不是数字
    NonNumericValue,
    /// 时间戳无法解析
    InvalidTimestamp,
    /// 单条记录不是 JSON 对象或字段类型错误
    MalformedRecord,
    /// 映射引用的人员不存在
    OrphanedMapping,
    /// 映射引用的 PO 不存在
    OrphanedPurchaseOrder,
    /// PO 引用的合同不存在
    OrphanedContract,
    /// 合同不满足按年分摊条件
    ProrationExcluded,
}

/// 诊断通道
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    skipped: BTreeMap<SkipReason, usize>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, reason: SkipReason, context: &str) {
        debug!("skip record reason:{:?} context:{}", reason, context);
        *self.skipped.entry(reason).or_insert(0) += 1;
    }

    pub fn count(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    /// 合并另一个阶段的计数
    pub fn merge(&mut self, other: &Diagnostics) {
        for (reason, count) in &other.skipped {
            *self.skipped.entry(*reason).or_insert(0) += count;
        }
    }
}
