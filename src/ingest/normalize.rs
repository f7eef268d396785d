//! 原始记录 → 领域实体
//!
//! 单条记录的问题只计入诊断，不中断加载

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::collection::Collection;
use super::raw::{
    truthy, value_to_text, NumberField, RawAuditRecord, RawContract, RawForecast,
    RawPurchaseOrder, RawResource, RawResourceMapping, RawRisk,
};
use crate::diagnostics::{Diagnostics, SkipReason};
use crate::domain::entities::{
    AuditRecord, Contract, Forecast, ForecastResult, Margin, PurchaseOrder, Resource,
    ResourceMapping, Risk,
};
use crate::domain::enums::RagStatus;
use crate::domain::value_objects::{Money, RecordId};
use crate::time_util::{parse_flexible_date, parse_timestamp};

/// 逐条解析，不是对象或字段类型错误的记录跳过
pub fn decode_records<R: DeserializeOwned>(
    collection: Collection,
    records: Vec<Value>,
    diagnostics: &mut Diagnostics,
) -> Vec<R> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<R>(value) {
            Ok(raw) => Some(raw),
            Err(e) => {
                diagnostics.record(
                    SkipReason::MalformedRecord,
                    &format!("{} #{}: {}", collection, i, e),
                );
                None
            }
        })
        .collect()
}

/// 日期文本: 空为 `None`，无法解析时计数
fn date_field(text: &str, context: &str, diagnostics: &mut Diagnostics) -> Option<NaiveDate> {
    if text.trim().is_empty() {
        return None;
    }
    let parsed = parse_flexible_date(text);
    if parsed.is_none() {
        diagnostics.record(SkipReason::UnparseableDate, &format!("{} {:?}", context, text));
    }
    parsed
}

fn number_field(value: &Value, context: &str, diagnostics: &mut Diagnostics) -> Option<f64> {
    match NumberField::parse(value) {
        NumberField::Number(n) => Some(n),
        NumberField::Missing => None,
        NumberField::Invalid => {
            diagnostics.record(SkipReason::NonNumericValue, &format!("{} {}", context, value));
            None
        }
    }
}

pub fn contract(raw: RawContract, diagnostics: &mut Diagnostics) -> Contract {
    let contract_id = RecordId::from_value(&raw.contract_id);
    let context = format!("contract {:?}", contract_id);
    let value = number_field(&raw.sow_value_gbp, &context, diagnostics).map(Money::new);
    let duration_months = match NumberField::parse(&raw.sow_duration_months) {
        NumberField::Number(n) if n > 0.0 => n.trunc() as u32,
        _ => 0,
    };
    Contract {
        start_date: date_field(&raw.sow_start_date, &context, diagnostics),
        end_date: date_field(&raw.sow_end_date, &context, diagnostics),
        contract_id,
        customer_name: raw.customer_name,
        service_name: raw.service_name,
        sow_reference: raw.sow_reference,
        sow_short_name: raw.sow_short_name,
        value,
        duration_months,
        recorded_status: raw.status,
    }
}

pub fn purchase_order(raw: RawPurchaseOrder, diagnostics: &mut Diagnostics) -> PurchaseOrder {
    let po_id = RecordId::from_value(&raw.po_id);
    let period_end = date_field(
        &raw.po_period_end_date,
        &format!("po {:?}", po_id),
        diagnostics,
    );
    PurchaseOrder {
        po_id,
        contract_id: RecordId::from_value(&raw.contract_id),
        customer_name: raw.customer_name,
        service_name: raw.service_name,
        po_number: raw.po_number,
        period_start_text: raw.po_period_start_date,
        period_end_text: raw.po_period_end_date,
        period_end,
        po_status: raw.po_status,
    }
}

pub fn resource(raw: RawResource, diagnostics: &mut Diagnostics) -> Resource {
    let resource_id = RecordId::from_value(&raw.resource_id);
    let context = format!("resource {:?}", resource_id);
    let margin = match NumberField::parse(&raw.margin_percentage) {
        NumberField::Number(n) => Margin::Percent(n),
        // 字段为 null 才算缺失，空串也算“有毛利率”
        NumberField::Missing if raw.margin_percentage.is_null() => Margin::Absent,
        _ => {
            diagnostics.record(
                SkipReason::NonNumericValue,
                &format!("{} margin {}", context, raw.margin_percentage),
            );
            Margin::Unparseable
        }
    };
    Resource {
        sell_rate: number_field(&raw.sell_rate, &context, diagnostics),
        resource_id,
        customer_name: raw.customer_name,
        first_name: raw.first_name,
        last_name: raw.last_name,
        job_title: raw.job_title,
        is_active: truthy(&raw.is_active),
        margin,
    }
}

/// 映射状态在这里一次性推导
pub fn mapping(raw: RawResourceMapping) -> ResourceMapping {
    ResourceMapping::new(
        RecordId::from_value(&raw.mapping_id),
        RecordId::from_value(&raw.po_id),
        RecordId::from_value(&raw.resource_id),
        raw.status,
        raw.created_at,
        raw.end_date,
    )
}

pub fn risk(raw: RawRisk) -> Risk {
    Risk {
        rag_status: RagStatus::from_text(&raw.rag_status),
        reference: raw.reference,
        risk_type: raw.risk_type,
        description: raw.description,
        impact: raw.impact,
        current_status: raw.current_status,
        target_date: raw.target_date,
    }
}

fn audit_value(value: &Value) -> Option<String> {
    value_to_text(value).filter(|text| !text.is_empty() && text != "null")
}

/// 时间戳无法解析的审计记录直接排除
pub fn audit_record(raw: RawAuditRecord, diagnostics: &mut Diagnostics) -> Option<AuditRecord> {
    let Some(timestamp) = parse_timestamp(&raw.timestamp) else {
        diagnostics.record(
            SkipReason::InvalidTimestamp,
            &format!("audit {}.{} {:?}", raw.table_name, raw.field_name, raw.timestamp),
        );
        return None;
    };
    Some(AuditRecord {
        timestamp,
        old_value: audit_value(&raw.old_value),
        new_value: audit_value(&raw.new_value),
        table_name: raw.table_name,
        operation: raw.operation,
        field_name: raw.field_name,
    })
}

pub fn forecast(raw: RawForecast, diagnostics: &mut Diagnostics) -> Forecast {
    let forecast_id = RecordId::from_value(&raw.forecast_id);
    let created_at = parse_timestamp(&raw.created_at);
    if created_at.is_none() {
        diagnostics.record(
            SkipReason::InvalidTimestamp,
            &format!("forecast {:?} {:?}", forecast_id, raw.created_at),
        );
    }

    let result = match &raw.forecast_data {
        Value::Object(data) => ForecastResult {
            total_cost: data
                .get("total_cost")
                .and_then(|v| number_field(v, "forecast total_cost", diagnostics))
                .map(Money::new)
                .unwrap_or_default(),
            text_report: data.get("text_report").and_then(value_to_text),
        },
        _ => ForecastResult::default(),
    };

    Forecast {
        forecast_id,
        customer_name: raw.customer_name,
        period_start_date: raw.period_start_date,
        period_end_date: raw.period_end_date,
        created_at,
        result,
    }
}
