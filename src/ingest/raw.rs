//! 源数据的原始记录
//!
//! 字段类型宽松: 文本字段接受字符串/数字/布尔，数值字段保留原始 JSON 值，
//! 具体解析放在 normalize 中，以便逐条记录诊断。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 文本字段: null 或缺失为空串
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_to_text(&Value::deserialize(deserializer)?).unwrap_or_default())
}

/// 可选文本字段: null 或缺失为 `None`
fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(value_to_text(&Value::deserialize(deserializer)?))
}

pub(crate) fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// 数值字段的解析结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberField {
    Missing,
    Number(f64),
    Invalid,
}

impl NumberField {
    /// null、缺失、空串为 Missing；数字或可解析的字符串为 Number
    pub fn parse(value: &Value) -> Self {
        match value {
            Value::Null => NumberField::Missing,
            Value::Number(n) => n.as_f64().map_or(NumberField::Invalid, NumberField::Number),
            Value::String(s) if s.trim().is_empty() => NumberField::Missing,
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => NumberField::Number(n),
                _ => NumberField::Invalid,
            },
            _ => NumberField::Invalid,
        }
    }
}

/// 布尔字段，兼容 1/0 和 "true"/"yes"
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes") || s == "1"
        }
        _ => false,
    }
}

#[derive(Debug, Deserialize)]
pub struct RawContract {
    #[serde(default)]
    pub contract_id: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub service_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sow_reference: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sow_short_name: String,
    #[serde(default)]
    pub sow_value_gbp: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sow_start_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sow_end_date: String,
    #[serde(default)]
    pub sow_duration_months: Value,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPurchaseOrder {
    #[serde(default)]
    pub po_id: Value,
    #[serde(default)]
    pub contract_id: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub service_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub po_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub po_period_start_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub po_period_end_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub po_status: String,
}

#[derive(Debug, Deserialize)]
pub struct RawResource {
    #[serde(default)]
    pub resource_id: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub job_title: String,
    #[serde(default)]
    pub is_active: Value,
    #[serde(default)]
    pub margin_percentage: Value,
    #[serde(default)]
    pub sell_rate: Value,
}

/// 旧版数据没有 `status` 字段
#[derive(Debug, Deserialize)]
pub struct RawResourceMapping {
    #[serde(default)]
    pub mapping_id: Value,
    #[serde(default)]
    pub po_id: Value,
    #[serde(default)]
    pub resource_id: Value,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawRisk {
    #[serde(rename = "ref", default, deserialize_with = "lenient_string")]
    pub reference: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub risk_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rag_status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub impact: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub current_status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub target_date: String,
}

#[derive(Debug, Deserialize)]
pub struct RawAuditRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub table_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub operation: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub field_name: String,
    #[serde(default)]
    pub old_value: Value,
    #[serde(default)]
    pub new_value: Value,
}

#[derive(Debug, Deserialize)]
pub struct RawForecast {
    #[serde(default)]
    pub forecast_id: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub period_start_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub period_end_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
    /// `{ total_cost, text_report }`，可能缺失
    #[serde(default)]
    pub forecast_data: Value,
}
