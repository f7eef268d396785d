//! 审计变更与预测列表

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::cmp::Ordering;

use crate::domain::entities::{AuditRecord, Forecast};
use crate::domain::value_objects::RecordId;

/// 最近变更的时间范围 (天)
pub const RECENT_AUDIT_DAYS: i64 = 7;
/// 最近变更最多展示条数
pub const RECENT_AUDIT_LIMIT: usize = 50;
/// 变更值预览长度
pub const PREVIEW_CHARS: usize = 50;

/// 变更记录及其新旧值预览
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    #[serde(flatten)]
    pub record: AuditRecord,
    pub old_preview: Option<String>,
    pub new_preview: Option<String>,
}

impl AuditEntry {
    fn new(record: AuditRecord) -> Self {
        Self {
            old_preview: preview_value(record.old_value.as_deref()),
            new_preview: preview_value(record.new_value.as_deref()),
            record,
        }
    }
}

/// 最近一周的变更，最新在前
#[derive(Debug, Clone, Serialize)]
pub struct AuditFeed {
    pub since: DateTime<Utc>,
    pub entries: Vec<AuditEntry>,
}

impl AuditFeed {
    pub fn recent(records: &[AuditRecord], now: DateTime<Utc>) -> Self {
        let since = now - Duration::days(RECENT_AUDIT_DAYS);
        let mut recent: Vec<&AuditRecord> = records
            .iter()
            .filter(|record| record.timestamp > since)
            .collect();
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let entries = recent
            .into_iter()
            .take(RECENT_AUDIT_LIMIT)
            .cloned()
            .map(AuditEntry::new)
            .collect();
        Self { since, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 变更值预览: 超过 50 个字符截断并追加 `...`，空值返回 `None`
pub fn preview_value(value: Option<&str>) -> Option<String> {
    let value = value.filter(|text| !text.is_empty() && *text != "null")?;
    if value.chars().count() <= PREVIEW_CHARS {
        return Some(value.to_string());
    }
    let head: String = value.chars().take(PREVIEW_CHARS).collect();
    Some(format!("{}...", head))
}

/// 预测列表，按创建时间最新在前
#[derive(Debug, Clone, Serialize)]
pub struct ForecastFeed {
    pub entries: Vec<Forecast>,
}

impl ForecastFeed {
    /// 创建时间无法解析的排在最后，其余按时间倒序
    pub fn newest_first(forecasts: &[Forecast]) -> Self {
        let mut entries = forecasts.to_vec();
        entries.sort_by(|a, b| match (a.created_at, b.created_at) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Self { entries }
    }

    pub fn find(&self, forecast_id: &RecordId) -> Option<&Forecast> {
        self.entries
            .iter()
            .find(|forecast| forecast.forecast_id.as_ref() == Some(forecast_id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ForecastResult;
    use chrono::TimeZone;

    fn audit(day: u32, hour: u32) -> AuditRecord {
        AuditRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap(),
            table_name: "contracts".to_string(),
            operation: "UPDATE".to_string(),
            field_name: "sow_value_gbp".to_string(),
            old_value: None,
            new_value: Some("1000".to_string()),
        }
    }

    fn forecast(id: &str, created: Option<DateTime<Utc>>) -> Forecast {
        Forecast {
            forecast_id: Some(id.into()),
            customer_name: "Acme".to_string(),
            period_start_date: String::new(),
            period_end_date: String::new(),
            created_at: created,
            result: ForecastResult::default(),
        }
    }

    #[test]
    fn test_recent_audit_window() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        // 恰好 7 天前的不包含
        let records = vec![audit(8, 12), audit(10, 9), audit(14, 18), audit(1, 0)];
        let feed = AuditFeed::recent(&records, now);
        let hours: Vec<u32> = feed
            .entries
            .iter()
            .map(|e| chrono::Timelike::hour(&e.record.timestamp))
            .collect();
        assert_eq!(hours, vec![18, 9]);
    }

    #[test]
    fn test_recent_audit_is_capped() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let records: Vec<AuditRecord> = (0..80).map(|_| audit(14, 1)).collect();
        assert_eq!(AuditFeed::recent(&records, now).len(), RECENT_AUDIT_LIMIT);
    }

    #[test]
    fn test_feed_entries_carry_previews() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let mut record = audit(14, 1);
        record.old_value = Some("y".repeat(70));
        let feed = AuditFeed::recent(&[record], now);
        let entry = &feed.entries[0];
        assert_eq!(entry.old_preview.as_deref().map(str::len), Some(53));
        assert_eq!(entry.new_preview.as_deref(), Some("1000"));
        // 原值保留完整
        assert_eq!(entry.record.old_value.as_deref().map(str::len), Some(70));
    }

    #[test]
    fn test_preview_value() {
        assert_eq!(preview_value(None), None);
        assert_eq!(preview_value(Some("null")), None);
        assert_eq!(preview_value(Some("")), None);
        assert_eq!(preview_value(Some("short")).as_deref(), Some("short"));
        let long = "x".repeat(60);
        let preview = preview_value(Some(long.as_str())).unwrap();
        assert_eq!(preview.len(), 53);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_forecasts_newest_first() {
        let older = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let feed = ForecastFeed::newest_first(&[
            forecast("f1", Some(older)),
            forecast("f2", None),
            forecast("f3", Some(newer)),
        ]);
        let ids: Vec<&str> = feed
            .entries
            .iter()
            .map(|f| f.forecast_id.as_ref().unwrap().as_str())
            .collect();
        assert_eq!(ids, vec!["f3", "f1", "f2"]);
        assert_eq!(feed.find(&"f2".into()).unwrap().report_text(), "No report available");
        assert!(feed.find(&"f9".into()).is_none());
    }
}
