//! 合同 → PO → 映射 → 人员 层级视图

use serde::Serialize;

use super::aggregation::{MappingCounts, RecordIndex};
use crate::domain::entities::{Contract, PurchaseOrder, ResourceMapping};
use crate::domain::enums::{ContractStatus, MappingState, PoPeriodStatus};
use crate::domain::value_objects::RecordId;
use crate::reconcile::{StatusReconciler, MAPPING_STATUS_ACTIVE};
use crate::time_util::reformat_created_date;

/// 创建日期缺失或无法解析时的开始标记
pub const UNKNOWN_START: &str = "Unknown";
/// 没有结束日期的分配
pub const PRESENT: &str = "Present";
const ENDED_LABEL: &str = "Ended";

/// 分配时间窗口，`start → end|Present`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentWindow {
    pub start: String,
    pub end: String,
}

impl AssignmentWindow {
    pub fn for_mapping(mapping: &ResourceMapping) -> Self {
        let start = mapping
            .created_at
            .as_deref()
            .and_then(reformat_created_date)
            .unwrap_or_else(|| UNKNOWN_START.to_string());
        let end = mapping.end_date_text().unwrap_or(PRESENT).to_string();
        Self { start, end }
    }

    pub fn label(&self) -> String {
        format!("{} → {}", self.start, self.end)
    }
}

/// 某个人员在某个 PO 下的一条分配
#[derive(Debug, Clone, Serialize)]
pub struct ResourceAssignment {
    pub mapping_id: Option<RecordId>,
    pub resource_id: RecordId,
    pub full_name: String,
    pub job_title: String,
    pub state: MappingState,
    /// 已结束分配的状态说明
    pub status_label: Option<String>,
    pub window: AssignmentWindow,
}

/// PO 节点
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderNode {
    pub po_id: Option<RecordId>,
    pub po_number: String,
    pub service_name: String,
    pub period_start: String,
    pub period_end: String,
    pub period_status: PoPeriodStatus,
    pub received: bool,
    /// 按映射统计，包括找不到人员的映射
    pub counts: MappingCounts,
    pub active: Vec<ResourceAssignment>,
    pub ended: Vec<ResourceAssignment>,
}

/// 合同节点
#[derive(Debug, Clone, Serialize)]
pub struct ContractNode {
    pub contract_id: Option<RecordId>,
    pub customer_name: String,
    pub sow_reference: String,
    pub service_name: String,
    pub status: ContractStatus,
    pub recorded_status: String,
    /// 下属全部 PO 的映射计数之和
    pub counts: MappingCounts,
    pub purchase_orders: Vec<PurchaseOrderNode>,
}

/// 层级构建器
pub struct HierarchyBuilder<'a> {
    index: &'a RecordIndex<'a>,
    reconciler: StatusReconciler,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(index: &'a RecordIndex<'a>, reconciler: StatusReconciler) -> Self {
        Self { index, reconciler }
    }

    /// 合同按客户名、SOW 编号排序 (区分大小写)
    ///
    /// 找不到人员的映射不出现在节点中，其诊断计数由报表统一记录
    pub fn build(&self, contracts: &[Contract]) -> Vec<ContractNode> {
        let mut sorted: Vec<&Contract> = contracts.iter().collect();
        sorted.sort_by(|a, b| {
            a.customer_name
                .cmp(&b.customer_name)
                .then_with(|| a.sow_reference.cmp(&b.sow_reference))
        });

        sorted
            .into_iter()
            .map(|contract| self.contract_node(contract))
            .collect()
    }

    fn contract_node(&self, contract: &Contract) -> ContractNode {
        let mut pos: Vec<&PurchaseOrder> = match &contract.contract_id {
            Some(contract_id) => self.index.pos_for_contract(contract_id).to_vec(),
            None => Vec::new(),
        };
        // 字符串比较，依赖 DD/MM/YYYY 的固定宽度
        pos.sort_by(|a, b| a.period_start_text.cmp(&b.period_start_text));

        let purchase_orders: Vec<PurchaseOrderNode> =
            pos.into_iter().map(|po| self.po_node(po)).collect();

        let mut counts = MappingCounts::default();
        for po in &purchase_orders {
            counts += po.counts;
        }

        ContractNode {
            contract_id: contract.contract_id.clone(),
            customer_name: contract.customer_name.clone(),
            sow_reference: contract.sow_reference.clone(),
            service_name: contract.service_name.clone(),
            status: self.reconciler.contract_status(contract),
            recorded_status: contract.recorded_status_or_active().to_string(),
            counts,
            purchase_orders,
        }
    }

    fn po_node(&self, po: &PurchaseOrder) -> PurchaseOrderNode {
        let mappings: &[&ResourceMapping] = match &po.po_id {
            Some(po_id) => self.index.mappings_for_po(po_id),
            None => &[],
        };

        let mut active = Vec::new();
        let mut ended = Vec::new();
        for assignment in mappings.iter().filter_map(|mapping| self.assignment(mapping)) {
            match assignment.state {
                MappingState::Active => active.push(assignment),
                MappingState::Ended => ended.push(assignment),
            }
        }

        PurchaseOrderNode {
            po_id: po.po_id.clone(),
            po_number: po.po_number.clone(),
            service_name: po.service_name.clone(),
            period_start: po.period_start_text.clone(),
            period_end: po.period_end_text.clone(),
            period_status: self.reconciler.po_period_status(po),
            received: po.is_received(),
            counts: MappingCounts::from_mappings(mappings.iter().copied()),
            active,
            ended,
        }
    }

    /// 找不到人员的映射返回 `None`
    fn assignment(&self, mapping: &ResourceMapping) -> Option<ResourceAssignment> {
        let resource_id = mapping.resource_id.as_ref()?;
        let resource = self.index.resource(resource_id)?;
        let state = self.reconciler.mapping_state(mapping);
        let status_label = match state {
            MappingState::Active => None,
            MappingState::Ended => Some(ended_label(mapping)),
        };
        Some(ResourceAssignment {
            mapping_id: mapping.mapping_id.clone(),
            resource_id: resource_id.clone(),
            full_name: resource.full_name(),
            job_title: resource.job_title.clone(),
            state,
            status_label,
            window: AssignmentWindow::for_mapping(mapping),
        })
    }
}

fn ended_label(mapping: &ResourceMapping) -> String {
    match mapping.status.as_deref().map(str::trim) {
        Some(status) if !status.is_empty() && status != MAPPING_STATUS_ACTIVE => {
            status.to_string()
        }
        _ => ENDED_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Resource;
    use crate::domain::snapshot::RecordSnapshot;
    use chrono::{TimeZone, Utc};

    fn mapping(
        id: &str,
        po: &str,
        resource: &str,
        status: Option<&str>,
        end: Option<&str>,
    ) -> ResourceMapping {
        ResourceMapping::new(
            Some(id.into()),
            Some(po.into()),
            Some(resource.into()),
            status.map(str::to_string),
            Some("2024-02-01 10:00:00".to_string()),
            end.map(str::to_string),
        )
    }

    fn snapshot() -> RecordSnapshot {
        RecordSnapshot {
            contracts: vec![
                Contract {
                    contract_id: Some("c2".into()),
                    customer_name: "Globex".to_string(),
                    sow_reference: "SOW-1".to_string(),
                    ..Default::default()
                },
                Contract {
                    contract_id: Some("c1".into()),
                    customer_name: "Acme".to_string(),
                    sow_reference: "SOW-2".to_string(),
                    ..Default::default()
                },
            ],
            purchase_orders: vec![
                PurchaseOrder {
                    po_id: Some("p2".into()),
                    contract_id: Some("c1".into()),
                    period_start_text: "01/07/2024".to_string(),
                    ..Default::default()
                },
                PurchaseOrder {
                    po_id: Some("p1".into()),
                    contract_id: Some("c1".into()),
                    period_start_text: "01/01/2024".to_string(),
                    ..Default::default()
                },
            ],
            resources: vec![Resource {
                resource_id: Some("r1".into()),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                job_title: "Engineer".to_string(),
                is_active: true,
                ..Default::default()
            }],
            mappings: vec![
                mapping("m1", "p1", "r1", None, None),
                mapping("m2", "p1", "r1", Some("Active"), Some("31/03/2024")),
                mapping("m3", "p2", "missing", Some("Active"), None),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_tree_shape_and_counts() {
        let snapshot = snapshot();
        let index = RecordIndex::build(&snapshot);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let tree = HierarchyBuilder::new(&index, StatusReconciler::new(now))
            .build(&snapshot.contracts);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].customer_name, "Acme");
        assert_eq!(tree[1].customer_name, "Globex");
        assert!(tree[1].purchase_orders.is_empty());

        let acme = &tree[0];
        let po_ids: Vec<&str> = acme
            .purchase_orders
            .iter()
            .map(|po| po.po_id.as_ref().unwrap().as_str())
            .collect();
        assert_eq!(po_ids, vec!["p1", "p2"]);
        assert_eq!(acme.counts, MappingCounts { total: 3, active: 2, ended: 1 });
        assert_eq!(acme.recorded_status, "Active");

        let p1 = &acme.purchase_orders[0];
        assert_eq!(p1.active.len(), 1);
        assert_eq!(p1.ended.len(), 1);
        assert_eq!(p1.ended[0].status_label.as_deref(), Some("Ended"));
        assert_eq!(p1.ended[0].window.label(), "01/02/2024 → 31/03/2024");
        assert_eq!(p1.active[0].window.label(), "01/02/2024 → Present");
        assert_eq!(p1.active[0].full_name, "Ada Lovelace");

        // 孤立映射被丢弃但仍计入 PO 计数
        let p2 = &acme.purchase_orders[1];
        assert!(p2.active.is_empty());
        assert_eq!(p2.counts.total, 1);
    }

    #[test]
    fn test_unknown_start_when_created_date_missing() {
        let mapping =
            ResourceMapping::new(None, None, None, None, Some("yesterday".to_string()), None);
        assert_eq!(AssignmentWindow::for_mapping(&mapping).label(), "Unknown → Present");
        let mapping = ResourceMapping::new(None, None, None, None, None, None);
        assert_eq!(AssignmentWindow::for_mapping(&mapping).start, UNKNOWN_START);
    }

    #[test]
    fn test_ended_label_keeps_source_status() {
        let m = mapping("m9", "p1", "r1", Some("Rolled off"), None);
        assert_eq!(ended_label(&m), "Rolled off");
    }
}
