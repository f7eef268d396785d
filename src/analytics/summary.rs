//! 各实体的汇总与列表
//!
//! 列表排序统一使用区分大小写的字符串比较

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use super::aggregation::ResourceStats;
use crate::domain::entities::{Contract, PurchaseOrder, Resource, Risk};
use crate::domain::enums::{ContractStatus, PoPeriodStatus, RagStatus, ResourceClass};
use crate::domain::value_objects::{Money, RecordId};
use crate::reconcile::StatusReconciler;

/// 年月
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// 合同列表行
#[derive(Debug, Clone, Serialize)]
pub struct ContractRow {
    pub contract_id: Option<RecordId>,
    pub customer_name: String,
    pub service_name: String,
    pub sow_short_name: String,
    pub value: Money,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_months: u32,
    pub status: ContractStatus,
}

impl ContractRow {
    fn new(contract: &Contract, status: ContractStatus) -> Self {
        Self {
            contract_id: contract.contract_id.clone(),
            customer_name: contract.customer_name.clone(),
            service_name: contract.service_name.clone(),
            sow_short_name: contract.sow_short_name.clone(),
            value: contract.value_or_zero(),
            start_date: contract.start_date,
            end_date: contract.end_date,
            duration_months: contract.duration_months,
            status,
        }
    }
}

/// 某个月开始的合同
#[derive(Debug, Clone, Serialize)]
pub struct MonthlySignings {
    pub month: YearMonth,
    pub contracts: Vec<ContractRow>,
}

/// SOW 汇总
#[derive(Debug, Clone, Serialize)]
pub struct ContractSummary {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    /// 全部合同总额，非数字金额按 0 计
    pub total_value: Money,
    /// 按开始月份分组，最新月份在前
    pub monthly: Vec<MonthlySignings>,
    /// (最早月份, 最新月份)
    pub signing_range: Option<(YearMonth, YearMonth)>,
    /// 按客户名、服务名排序
    pub rows: Vec<ContractRow>,
}

impl ContractSummary {
    pub fn build(contracts: &[Contract], reconciler: &StatusReconciler) -> Self {
        let statuses: Vec<ContractStatus> = contracts
            .iter()
            .map(|contract| reconciler.contract_status(contract))
            .collect();
        let active = statuses.iter().filter(|status| status.is_active()).count();

        let mut by_month: BTreeMap<YearMonth, Vec<ContractRow>> = BTreeMap::new();
        for (contract, status) in contracts.iter().zip(&statuses) {
            if let Some(start) = contract.start_date {
                by_month
                    .entry(YearMonth::of(start))
                    .or_default()
                    .push(ContractRow::new(contract, *status));
            }
        }
        let signing_range = match (by_month.keys().next(), by_month.keys().next_back()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        };
        let monthly: Vec<MonthlySignings> = by_month
            .into_iter()
            .rev()
            .map(|(month, contracts)| MonthlySignings { month, contracts })
            .collect();

        let mut rows: Vec<ContractRow> = contracts
            .iter()
            .zip(&statuses)
            .map(|(contract, status)| ContractRow::new(contract, *status))
            .collect();
        rows.sort_by(|a, b| {
            a.customer_name
                .cmp(&b.customer_name)
                .then_with(|| a.service_name.cmp(&b.service_name))
        });

        Self {
            total: contracts.len(),
            active,
            completed: contracts.len() - active,
            total_value: contracts.iter().map(Contract::value_or_zero).sum(),
            monthly,
            signing_range,
            rows,
        }
    }
}

/// PO 列表行
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderRow {
    pub po_id: Option<RecordId>,
    pub customer_name: String,
    pub service_name: String,
    pub po_number: String,
    pub period_start: String,
    pub period_end: String,
    pub po_status: String,
    pub period_status: PoPeriodStatus,
}

/// PO 汇总
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderSummary {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    /// 状态不是 `received` 的 PO
    pub unreceived: usize,
    /// 按服务名、服务期开始文本排序
    pub rows: Vec<PurchaseOrderRow>,
}

impl PurchaseOrderSummary {
    pub fn build(pos: &[PurchaseOrder], reconciler: &StatusReconciler) -> Self {
        let mut rows: Vec<PurchaseOrderRow> = pos
            .iter()
            .map(|po| PurchaseOrderRow {
                po_id: po.po_id.clone(),
                customer_name: po.customer_name.clone(),
                service_name: po.service_name.clone(),
                po_number: po.po_number.clone(),
                period_start: po.period_start_text.clone(),
                period_end: po.period_end_text.clone(),
                po_status: po.po_status.clone(),
                period_status: reconciler.po_period_status(po),
            })
            .collect();
        let open = rows
            .iter()
            .filter(|row| row.period_status == PoPeriodStatus::Open)
            .count();
        rows.sort_by(|a, b| {
            a.service_name
                .cmp(&b.service_name)
                .then_with(|| a.period_start.cmp(&b.period_start))
        });

        Self {
            total: pos.len(),
            open,
            closed: pos.len() - open,
            unreceived: pos.iter().filter(|po| !po.is_received()).count(),
            rows,
        }
    }
}

/// 人员列表行
#[derive(Debug, Clone, Serialize)]
pub struct ResourceRow {
    pub resource_id: Option<RecordId>,
    pub customer_name: String,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub margin_percentage: Option<f64>,
    pub class: ResourceClass,
    pub is_active: bool,
}

/// 人员汇总
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSummary {
    pub stats: ResourceStats,
    /// 按客户名、职位排序
    pub rows: Vec<ResourceRow>,
}

impl ResourceSummary {
    pub fn build(resources: &[Resource]) -> Self {
        let mut rows: Vec<ResourceRow> = resources
            .iter()
            .map(|resource| ResourceRow {
                resource_id: resource.resource_id.clone(),
                customer_name: resource.customer_name.clone(),
                first_name: resource.first_name.clone(),
                last_name: resource.last_name.clone(),
                job_title: resource.job_title.clone(),
                margin_percentage: resource.margin_percent(),
                class: resource.class(),
                is_active: resource.is_active,
            })
            .collect();
        rows.sort_by(|a, b| {
            a.customer_name
                .cmp(&b.customer_name)
                .then_with(|| a.job_title.cmp(&b.job_title))
        });
        Self {
            stats: ResourceStats::from_resources(resources),
            rows,
        }
    }
}

/// 风险汇总
#[derive(Debug, Clone, Serialize)]
pub struct RiskSummary {
    pub total: usize,
    pub red: usize,
    pub amber: usize,
    pub green: usize,
    pub other: usize,
    /// 保持输入顺序
    pub items: Vec<Risk>,
}

impl RiskSummary {
    pub fn build(risks: &[Risk]) -> Self {
        let mut summary = Self {
            total: risks.len(),
            red: 0,
            amber: 0,
            green: 0,
            other: 0,
            items: risks.to_vec(),
        };
        for risk in risks {
            match risk.rag_status {
                RagStatus::Red => summary.red += 1,
                RagStatus::Amber => summary.amber += 1,
                RagStatus::Green => summary.green += 1,
                RagStatus::Other(_) => summary.other += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reconciler() -> StatusReconciler {
        StatusReconciler::new(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
    }

    fn contract(
        customer: &str,
        service: &str,
        start: NaiveDate,
        end: NaiveDate,
        value: f64,
    ) -> Contract {
        Contract {
            customer_name: customer.to_string(),
            service_name: service.to_string(),
            start_date: Some(start),
            end_date: Some(end),
            value: Some(Money::new(value)),
            ..Default::default()
        }
    }

    #[test]
    fn test_contract_summary() {
        let contracts = vec![
            contract("Globex", "Ops", ymd(2024, 3, 4), ymd(2025, 3, 3), 100.0),
            contract("Acme", "Dev", ymd(2023, 1, 10), ymd(2023, 12, 31), 50.5),
            contract("Acme", "Apps", ymd(2024, 3, 20), ymd(2024, 9, 30), 25.0),
            Contract {
                customer_name: "Initech".to_string(),
                ..Default::default()
            },
        ];
        let summary = ContractSummary::build(&contracts, &reconciler());

        assert_eq!(summary.total, 4);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.total_value, Money::new(175.5));

        let months: Vec<YearMonth> = summary.monthly.iter().map(|m| m.month).collect();
        assert_eq!(
            months,
            vec![YearMonth { year: 2024, month: 3 }, YearMonth { year: 2023, month: 1 }]
        );
        // 同月合同保持输入顺序
        assert_eq!(summary.monthly[0].contracts[0].customer_name, "Globex");
        assert_eq!(
            summary.signing_range,
            Some((YearMonth { year: 2023, month: 1 }, YearMonth { year: 2024, month: 3 }))
        );

        let order: Vec<(&str, &str)> = summary
            .rows
            .iter()
            .map(|r| (r.customer_name.as_str(), r.service_name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![("Acme", "Apps"), ("Acme", "Dev"), ("Globex", "Ops"), ("Initech", "")]
        );
    }

    #[test]
    fn test_purchase_order_summary() {
        let pos = vec![
            PurchaseOrder {
                service_name: "Support".to_string(),
                period_start_text: "01/02/2024".to_string(),
                po_status: "received".to_string(),
                ..Default::default()
            },
            PurchaseOrder {
                service_name: "Build".to_string(),
                period_start_text: "01/01/2024".to_string(),
                period_end_text: "31/01/2024".to_string(),
                period_end: Some(ymd(2024, 1, 31)),
                po_status: "pending".to_string(),
                ..Default::default()
            },
        ];
        let summary = PurchaseOrderSummary::build(&pos, &reconciler());
        assert_eq!(summary.open, 1);
        assert_eq!(summary.closed, 1);
        assert_eq!(summary.unreceived, 1);
        assert_eq!(summary.rows[0].service_name, "Build");
        assert_eq!(summary.rows[0].period_status, PoPeriodStatus::Closed);
    }

    #[test]
    fn test_risk_summary() {
        let risk = |rag: &str| Risk {
            reference: "R1".to_string(),
            risk_type: "Risk".to_string(),
            rag_status: RagStatus::from_text(rag),
            description: String::new(),
            impact: String::new(),
            current_status: String::new(),
            target_date: String::new(),
        };
        let summary = RiskSummary::build(&[risk("Red"), risk("Amber"), risk("Red"), risk("Blue")]);
        assert_eq!((summary.red, summary.amber, summary.green, summary.other), (2, 1, 0, 1));
        assert_eq!(summary.items.len(), 4);
    }
}
