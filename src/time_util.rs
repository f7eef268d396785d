//! 日期区间工具
//!
//! 合同 / PO / 映射 / 风险记录使用 `DD/MM/YYYY` 文本日期，
//! 审计与预测记录使用 ISO 8601 时间戳。这里的函数都不会 panic，解析失败返回 `None`。

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::domain::value_objects::DateWindow;

/// 解析日期文本
///
/// 先按 `DD/MM/YYYY` 解析，失败后回退到 ISO 8601
pub fn parse_flexible_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    parse_day_month_year(text).or_else(|| parse_iso_date(text))
}

fn parse_day_month_year(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('/');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let day: u32 = day.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    let year: i32 = year.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    parse_timestamp(text).map(|ts| ts.date_naive())
}

/// 解析 ISO 8601 时间戳
///
/// 带 `Z` 或偏移量的按对应时区换算为 UTC；不带时区的按 UTC 处理
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}

/// 日期当天零点 (UTC)
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// 含首尾的天数: `floor((end - start) / 1天) + 1`
///
/// 返回值 <= 0 表示区间无效
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days() + 1
}

/// 两个闭区间的交集，不相交返回 `None`
pub fn overlap(
    start_a: NaiveDate,
    end_a: NaiveDate,
    start_b: NaiveDate,
    end_b: NaiveDate,
) -> Option<DateWindow> {
    let start = start_a.max(start_b);
    let end = end_a.min(end_b);
    if start > end {
        return None;
    }
    Some(DateWindow { start, end })
}

/// `now` 所在自然年 `[1月1日, 12月31日]`
pub fn calendar_year_of(now: DateTime<Utc>) -> Option<DateWindow> {
    let year = now.year();
    Some(DateWindow {
        start: NaiveDate::from_ymd_opt(year, 1, 1)?,
        end: NaiveDate::from_ymd_opt(year, 12, 31)?,
    })
}

/// 把 `YYYY-MM-DD[ HH:MM:SS]` 创建时间改写为 `DD/MM/YYYY`
pub fn reformat_created_date(text: &str) -> Option<String> {
    let text = text.trim();
    let date_part = text.get(..10)?;
    let rest = &text[10..];
    if !(rest.is_empty() || rest.starts_with(' ') || rest.starts_with('T')) {
        return None;
    }
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    Some(date.format("%d/%m/%Y").to_string())
}
