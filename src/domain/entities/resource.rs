//! 人员实体

use serde::Serialize;

use super::contract::UNKNOWN_CUSTOMER;
use crate::domain::enums::ResourceClass;
use crate::domain::value_objects::RecordId;

/// 毛利率字段
///
/// 字段存在即视为外包人员，不论能否解析为数字
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub enum Margin {
    #[default]
    Absent,
    Percent(f64),
    Unparseable,
}

/// 人员
#[derive(Debug, Clone, Default, Serialize)]
pub struct Resource {
    pub resource_id: Option<RecordId>,
    pub customer_name: String,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub is_active: bool,
    pub margin: Margin,
    pub sell_rate: Option<f64>,
}

impl Resource {
    pub fn class(&self) -> ResourceClass {
        match self.margin {
            Margin::Absent => ResourceClass::Permanent,
            _ => ResourceClass::Contractor,
        }
    }

    pub fn is_contractor(&self) -> bool {
        self.class() == ResourceClass::Contractor
    }

    /// 可解析的毛利率
    pub fn margin_percent(&self) -> Option<f64> {
        match self.margin {
            Margin::Percent(value) => Some(value),
            _ => None,
        }
    }

    pub fn customer_label(&self) -> &str {
        if self.customer_name.is_empty() {
            UNKNOWN_CUSTOMER
        } else {
            &self.customer_name
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
