//! 索引与汇总计数
//!
//! 一次遍历建立五个索引:
//! - 合同按 id
//! - PO 按 id
//! - 人员按 id
//! - PO 按合同 id 分组
//! - 映射按 PO id 分组
//!
//! 并计算客户分布、人员类别、平均毛利率等汇总

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::domain::entities::{Contract, PurchaseOrder, Resource, ResourceMapping};
use crate::domain::snapshot::RecordSnapshot;
use crate::domain::value_objects::RecordId;

/// 单次计算使用的类型化索引
///
/// 重复 id 以后出现的记录为准
#[derive(Debug, Default)]
pub struct RecordIndex<'a> {
    contracts_by_id: HashMap<&'a RecordId, &'a Contract>,
    pos_by_id: HashMap<&'a RecordId, &'a PurchaseOrder>,
    resources_by_id: HashMap<&'a RecordId, &'a Resource>,
    pos_by_contract: HashMap<&'a RecordId, Vec<&'a PurchaseOrder>>,
    mappings_by_po: HashMap<&'a RecordId, Vec<&'a ResourceMapping>>,
}

impl<'a> RecordIndex<'a> {
    pub fn build(snapshot: &'a RecordSnapshot) -> Self {
        let mut index = RecordIndex::default();

        for contract in &snapshot.contracts {
            if let Some(contract_id) = &contract.contract_id {
                index.contracts_by_id.insert(contract_id, contract);
            }
        }
        for po in &snapshot.purchase_orders {
            if let Some(po_id) = &po.po_id {
                index.pos_by_id.insert(po_id, po);
            }
            if let Some(contract_id) = &po.contract_id {
                index.pos_by_contract.entry(contract_id).or_default().push(po);
            }
        }
        for resource in &snapshot.resources {
            if let Some(resource_id) = &resource.resource_id {
                index.resources_by_id.insert(resource_id, resource);
            }
        }
        for mapping in &snapshot.mappings {
            if let Some(po_id) = &mapping.po_id {
                index.mappings_by_po.entry(po_id).or_default().push(mapping);
            }
        }
        index
    }

    pub fn contract(&self, contract_id: &RecordId) -> Option<&'a Contract> {
        self.contracts_by_id.get(contract_id).copied()
    }

    pub fn purchase_order(&self, po_id: &RecordId) -> Option<&'a PurchaseOrder> {
        self.pos_by_id.get(po_id).copied()
    }

    pub fn resource(&self, resource_id: &RecordId) -> Option<&'a Resource> {
        self.resources_by_id.get(resource_id).copied()
    }

    /// 合同下的 PO，保持输入顺序
    pub fn pos_for_contract(&self, contract_id: &RecordId) -> &[&'a PurchaseOrder] {
        self.pos_by_contract
            .get(contract_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// PO 下的映射，保持输入顺序
    pub fn mappings_for_po(&self, po_id: &RecordId) -> &[&'a ResourceMapping] {
        self.mappings_by_po
            .get(po_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// 客户分布中的一项
///
/// `key` 是大写后的分组键，`display_name` 是第一次出现时的原始写法
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerBucket {
    pub key: String,
    pub display_name: String,
    pub sow_count: usize,
    pub resource_count: usize,
}

/// 按客户分组的计数，大小写不敏感
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerBreakdown {
    buckets: BTreeMap<String, CustomerBucket>,
}

impl CustomerBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket_mut(&mut self, name: &str) -> &mut CustomerBucket {
        let key = name.to_uppercase();
        self.buckets
            .entry(key.clone())
            .or_insert_with(|| CustomerBucket {
                key,
                display_name: name.to_string(),
                sow_count: 0,
                resource_count: 0,
            })
    }

    pub fn add_sow(&mut self, customer_name: &str) {
        self.bucket_mut(customer_name).sow_count += 1;
    }

    pub fn add_resource(&mut self, customer_name: &str) {
        self.bucket_mut(customer_name).resource_count += 1;
    }

    pub fn get(&self, customer_name: &str) -> Option<&CustomerBucket> {
        self.buckets.get(&customer_name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// 按分组键排序
    pub fn entries(&self) -> Vec<CustomerBucket> {
        self.buckets.values().cloned().collect()
    }

    /// 统计给定的合同和人员，调用方负责先过滤出 Active 记录
    pub fn from_records<'a>(
        contracts: impl IntoIterator<Item = &'a Contract>,
        resources: impl IntoIterator<Item = &'a Resource>,
    ) -> Self {
        let mut breakdown = Self::new();
        for contract in contracts {
            breakdown.add_sow(contract.customer_label());
        }
        for resource in resources {
            breakdown.add_resource(resource.customer_label());
        }
        breakdown
    }
}

/// 可解析毛利率的算术平均，没有则为 0
pub fn average_margin<'a>(resources: impl IntoIterator<Item = &'a Resource>) -> f64 {
    let margins: Vec<f64> = resources
        .into_iter()
        .filter_map(Resource::margin_percent)
        .collect();
    if margins.is_empty() {
        return 0.0;
    }
    margins.iter().sum::<f64>() / margins.len() as f64
}

/// 人员统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResourceStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// 有毛利率字段的人员
    pub contractors: usize,
    pub permanent: usize,
    pub average_margin: f64,
}

impl ResourceStats {
    pub fn from_resources<'a>(resources: impl IntoIterator<Item = &'a Resource>) -> Self {
        let resources: Vec<&Resource> = resources.into_iter().collect();
        let total = resources.len();
        let active = resources.iter().filter(|r| r.is_active).count();
        let contractors = resources.iter().filter(|r| r.is_contractor()).count();
        Self {
            total,
            active,
            inactive: total - active,
            contractors,
            permanent: total - contractors,
            average_margin: average_margin(resources.iter().copied()),
        }
    }
}

/// 映射计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MappingCounts {
    pub total: usize,
    pub active: usize,
    pub ended: usize,
}

impl MappingCounts {
    pub fn from_mappings<'a>(mappings: impl IntoIterator<Item = &'a ResourceMapping>) -> Self {
        let mut counts = Self::default();
        for mapping in mappings {
            counts.add(mapping);
        }
        counts
    }

    pub fn add(&mut self, mapping: &ResourceMapping) {
        self.total += 1;
        if mapping.is_active() {
            self.active += 1;
        } else {
            self.ended += 1;
        }
    }
}

impl std::ops::AddAssign for MappingCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        self.active += rhs.active;
        self.ended += rhs.ended;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Margin;

    fn resource(customer: &str, active: bool, margin: Margin) -> Resource {
        Resource {
            customer_name: customer.to_string(),
            is_active: active,
            margin,
            ..Default::default()
        }
    }

    fn contract(customer: &str) -> Contract {
        Contract {
            customer_name: customer.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_customer_grouping_keeps_first_casing() {
        let contracts = [contract("Acme"), contract("ACME"), contract("Globex")];
        let resources = [resource("acme", true, Margin::Absent)];
        let breakdown = CustomerBreakdown::from_records(&contracts, &resources);

        assert_eq!(breakdown.len(), 2);
        let acme = breakdown.get("aCmE").unwrap();
        assert_eq!(acme.display_name, "Acme");
        assert_eq!(acme.sow_count, 2);
        assert_eq!(acme.resource_count, 1);

        let keys: Vec<String> = breakdown.entries().into_iter().map(|b| b.key).collect();
        assert_eq!(keys, vec!["ACME", "GLOBEX"]);
    }

    #[test]
    fn test_missing_customer_is_unknown() {
        let no_resources: [Resource; 0] = [];
        let breakdown = CustomerBreakdown::from_records(&[contract("")], &no_resources);
        assert_eq!(breakdown.get("unknown").unwrap().display_name, "Unknown");
    }

    #[test]
    fn test_average_margin() {
        let resources = [
            resource("A", true, Margin::Percent(10.0)),
            resource("A", true, Margin::Absent),
            resource("A", true, Margin::Percent(20.0)),
        ];
        assert_eq!(average_margin(&resources), 15.0);
        let none: [Resource; 0] = [];
        assert_eq!(average_margin(&none), 0.0);
    }

    #[test]
    fn test_resource_stats() {
        let resources = [
            resource("A", true, Margin::Percent(12.0)),
            resource("A", false, Margin::Absent),
            resource("B", true, Margin::Unparseable),
        ];
        let stats = ResourceStats::from_resources(&resources);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.contractors, 2);
        assert_eq!(stats.permanent, 1);
        assert_eq!(stats.average_margin, 12.0);
    }

    #[test]
    fn test_index_groups_children() {
        let snapshot = RecordSnapshot {
            purchase_orders: vec![
                PurchaseOrder {
                    po_id: Some("p1".into()),
                    contract_id: Some("c1".into()),
                    ..Default::default()
                },
                PurchaseOrder {
                    po_id: Some("p2".into()),
                    contract_id: Some("c1".into()),
                    ..Default::default()
                },
            ],
            mappings: vec![ResourceMapping::new(
                None,
                Some("p2".into()),
                Some("r1".into()),
                None,
                None,
                None,
            )],
            ..Default::default()
        };
        let index = RecordIndex::build(&snapshot);
        assert_eq!(index.pos_for_contract(&"c1".into()).len(), 2);
        assert!(index.pos_for_contract(&"c2".into()).is_empty());
        assert_eq!(index.mappings_for_po(&"p2".into()).len(), 1);
        assert!(index.purchase_order(&"p1".into()).is_some());
        assert!(index.resource(&"r1".into()).is_none());
    }
}
