//! 仪表盘报表
//!
//! 一次计算是快照的纯函数: 同一快照、同一时间得到相同结果

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::analytics::{
    annual_contract_value, AuditFeed, ContractNode, ContractSummary, CustomerBreakdown,
    CustomerBucket, ForecastFeed, HierarchyBuilder, MappingCounts, PurchaseOrderSummary,
    RecordIndex, ResourceStats, ResourceSummary, RiskSummary,
};
use crate::diagnostics::{Diagnostics, SkipReason};
use crate::domain::snapshot::RecordSnapshot;
use crate::domain::value_objects::{DateWindow, Money};
use crate::reconcile::StatusReconciler;
use crate::time_util::calendar_year_of;

/// 首页汇总，人员相关数据只统计 Active 人员
#[derive(Debug, Clone, Serialize)]
pub struct ExecutiveSummary {
    pub fiscal_year: Option<DateWindow>,
    /// 当前 Active 合同在本年内的分摊金额
    pub annual_contract_value: Money,
    pub active_sows: usize,
    pub active_resources: usize,
    pub contractors: usize,
    pub permanent: usize,
    pub average_margin: f64,
    /// 按客户分组，键为大写客户名
    pub customers: Vec<CustomerBucket>,
}

/// 层级页总数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HierarchyTotals {
    pub sows: usize,
    pub purchase_orders: usize,
    pub resources: usize,
    pub mappings: MappingCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct HierarchyReport {
    pub totals: HierarchyTotals,
    pub contracts: Vec<ContractNode>,
}

/// 完整报表，不含任何展示格式
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub executive: ExecutiveSummary,
    pub contracts: ContractSummary,
    pub purchase_orders: PurchaseOrderSummary,
    pub resources: ResourceSummary,
    pub risks: RiskSummary,
    pub hierarchy: HierarchyReport,
    pub forecasts: ForecastFeed,
    pub audit: AuditFeed,
    pub diagnostics: Diagnostics,
}

/// 基于快照和注入时间计算报表
pub fn build_report(snapshot: &RecordSnapshot, now: DateTime<Utc>) -> DashboardReport {
    let reconciler = StatusReconciler::new(now);
    let mut diagnostics = Diagnostics::new();
    let index = RecordIndex::build(snapshot);

    let active_contracts: Vec<_> = snapshot
        .contracts
        .iter()
        .filter(|contract| reconciler.contract_status(contract).is_active())
        .collect();
    let active_resources: Vec<_> = snapshot.resources.iter().filter(|r| r.is_active).collect();
    let active_stats = ResourceStats::from_resources(active_resources.iter().copied());
    let customers = CustomerBreakdown::from_records(
        active_contracts.iter().copied(),
        active_resources.iter().copied(),
    );

    let executive = ExecutiveSummary {
        fiscal_year: calendar_year_of(now),
        annual_contract_value: annual_contract_value(
            &snapshot.contracts,
            &reconciler,
            &mut diagnostics,
        ),
        active_sows: active_contracts.len(),
        active_resources: active_resources.len(),
        contractors: active_stats.contractors,
        permanent: active_stats.permanent,
        average_margin: active_stats.average_margin,
        customers: customers.entries(),
    };

    record_orphans(snapshot, &index, &mut diagnostics);

    let tree = HierarchyBuilder::new(&index, reconciler).build(&snapshot.contracts);
    let hierarchy = HierarchyReport {
        totals: HierarchyTotals {
            sows: snapshot.contracts.len(),
            purchase_orders: snapshot.purchase_orders.len(),
            resources: snapshot.resources.len(),
            mappings: MappingCounts::from_mappings(&snapshot.mappings),
        },
        contracts: tree,
    };

    let report = DashboardReport {
        generated_at: now,
        executive,
        contracts: ContractSummary::build(&snapshot.contracts, &reconciler),
        purchase_orders: PurchaseOrderSummary::build(&snapshot.purchase_orders, &reconciler),
        resources: ResourceSummary::build(&snapshot.resources),
        risks: RiskSummary::build(&snapshot.risks),
        hierarchy,
        forecasts: ForecastFeed::newest_first(&snapshot.forecasts),
        audit: AuditFeed::recent(&snapshot.audit_records, now),
        diagnostics,
    };

    if !report.diagnostics.is_empty() {
        warn!(
            "report built with {} skipped records: {:?}",
            report.diagnostics.total(),
            report.diagnostics
        );
    }
    info!(
        "report built acv:{} active_sows:{} active_resources:{} customers:{}",
        report.executive.annual_contract_value,
        report.executive.active_sows,
        report.executive.active_resources,
        report.executive.customers.len()
    );
    report
}

/// 外键找不到的记录不出现在层级视图中，每条记录只计一次
fn record_orphans(
    snapshot: &RecordSnapshot,
    index: &RecordIndex<'_>,
    diagnostics: &mut Diagnostics,
) {
    for po in &snapshot.purchase_orders {
        let known_contract = po
            .contract_id
            .as_ref()
            .is_some_and(|contract_id| index.contract(contract_id).is_some());
        if !known_contract {
            diagnostics.record(
                SkipReason::OrphanedContract,
                &format!("po {:?} contract {:?}", po.po_id, po.contract_id),
            );
        }
    }

    for mapping in &snapshot.mappings {
        let known_po = mapping
            .po_id
            .as_ref()
            .is_some_and(|po_id| index.purchase_order(po_id).is_some());
        if !known_po {
            diagnostics.record(
                SkipReason::OrphanedPurchaseOrder,
                &format!("mapping {:?} po {:?}", mapping.mapping_id, mapping.po_id),
            );
            continue;
        }
        let known_resource = mapping
            .resource_id
            .as_ref()
            .is_some_and(|resource_id| index.resource(resource_id).is_some());
        if !known_resource {
            diagnostics.record(
                SkipReason::OrphanedMapping,
                &format!(
                    "mapping {:?} resource {:?}",
                    mapping.mapping_id, mapping.resource_id
                ),
            );
        }
    }
}
