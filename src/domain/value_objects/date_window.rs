//! 闭区间日期窗口

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time_util::inclusive_day_count;

/// 日期闭区间 `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// 含首尾的天数
    pub fn days(&self) -> i64 {
        inclusive_day_count(self.start, self.end)
    }
}
