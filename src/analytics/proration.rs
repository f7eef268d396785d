//! 合同金额按自然年分摊
//!
//! 公式:
//! - 日费率 = 合同总额 / 合同总天数 (含首尾)
//! - 年内金额 = 日费率 × 合同与目标年重叠的天数
//! - 每份合同先舍入到两位小数，再累加

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::diagnostics::{Diagnostics, SkipReason};
use crate::domain::entities::Contract;
use crate::domain::value_objects::{DateWindow, Money};
use crate::reconcile::StatusReconciler;
use crate::time_util::{calendar_year_of, inclusive_day_count, overlap};

/// 单份合同的分摊结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Proration {
    /// 计入目标年的金额
    Contribution(Money),
    /// 合同与目标年不重叠
    OutsideYear,
    /// 日期 / 金额缺失或无效
    Invalid,
}

impl Proration {
    pub fn amount(&self) -> Money {
        match self {
            Proration::Contribution(amount) => *amount,
            _ => Money::zero(),
        }
    }
}

/// 分摊计算器
#[derive(Debug, Clone, Copy)]
pub struct ProrationCalculator {
    /// 目标财年
    fiscal_year: DateWindow,
}

impl ProrationCalculator {
    pub fn new(fiscal_year: DateWindow) -> Self {
        Self { fiscal_year }
    }

    /// 以 `now` 所在自然年为目标财年
    pub fn for_year_of(now: DateTime<Utc>) -> Option<Self> {
        calendar_year_of(now).map(Self::new)
    }

    pub fn fiscal_year(&self) -> DateWindow {
        self.fiscal_year
    }

    /// 计算单份合同落在目标年内的金额
    pub fn prorate(&self, contract: &Contract) -> Proration {
        let (Some(start), Some(end)) = (contract.start_date, contract.end_date) else {
            return Proration::Invalid;
        };
        let total_value = match contract.value {
            Some(value) if !value.is_zero() => value,
            _ => return Proration::Invalid,
        };
        if end < start {
            return Proration::Invalid;
        }

        let total_days = inclusive_day_count(start, end);
        if total_days <= 0 {
            return Proration::Invalid;
        }
        let daily_rate = total_value.amount() / total_days as f64;

        let Some(window) = overlap(start, end, self.fiscal_year.start, self.fiscal_year.end)
        else {
            return Proration::OutsideYear;
        };
        let days_in_year = window.days();

        Proration::Contribution(Money::new(daily_rate * days_in_year as f64).round_to_minor_unit())
    }

    /// 累加一组合同的年内金额，调用方负责先按状态过滤
    pub fn annual_value<'a>(
        &self,
        contracts: impl IntoIterator<Item = &'a Contract>,
        diagnostics: &mut Diagnostics,
    ) -> Money {
        let mut total = Money::zero();
        for contract in contracts {
            match self.prorate(contract) {
                Proration::Contribution(amount) => total = total + amount,
                Proration::OutsideYear => {}
                Proration::Invalid => diagnostics.record(
                    SkipReason::ProrationExcluded,
                    &format!("contract {:?}", contract.contract_id),
                ),
            }
        }
        total
    }
}

/// 年度合同价值: 只统计当前仍为 Active 的合同
///
/// 已过期合同即使部分日期落在目标年内也不计入
pub fn annual_contract_value(
    contracts: &[Contract],
    reconciler: &StatusReconciler,
    diagnostics: &mut Diagnostics,
) -> Money {
    let Some(calculator) = ProrationCalculator::for_year_of(reconciler.now()) else {
        return Money::zero();
    };
    let active = contracts
        .iter()
        .filter(|contract| reconciler.contract_status(contract).is_active());
    let total = calculator.annual_value(active, diagnostics);
    debug!(
        "annual contract value year:{:?} total:{}",
        calculator.fiscal_year(),
        total
    );
    total
}
