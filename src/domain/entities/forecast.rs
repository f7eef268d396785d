//! 预测实体

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::{Money, RecordId};

pub const NO_REPORT_AVAILABLE: &str = "No report available";

/// 预测结果载荷
#[derive(Debug, Clone, Default, Serialize)]
pub struct ForecastResult {
    pub total_cost: Money,
    pub text_report: Option<String>,
}

/// 成本预测
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub forecast_id: Option<RecordId>,
    pub customer_name: String,
    pub period_start_date: String,
    pub period_end_date: String,
    /// 无法解析时为 `None`，排序时排在最后
    pub created_at: Option<DateTime<Utc>>,
    pub result: ForecastResult,
}

impl Forecast {
    pub fn report_text(&self) -> &str {
        self.result
            .text_report
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_REPORT_AVAILABLE)
    }
}
