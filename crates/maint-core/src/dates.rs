//! 日期工具
//!
//! 月份運算一律採「夾到當月最後一天」策略：1/31 加一個月得到 2/28（或閏年 2/29），
//! 不會溢出到下個月。

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::{MaintError, Result};

/// 英文月份名稱（索引 1 = January）
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// 當月第一天
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// 當月天數（28-31）
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // 只有日期上限所在的 12 月會走到這裡
        None => 31,
    }
}

/// 當月最後一天
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date) + Duration::days(i64::from(days_in_month(date)) - 1)
}

/// 以月為單位平移日期
///
/// 日期在目標月份不存在時夾到該月最後一天。
///
/// # 範例
/// ```
/// use chrono::NaiveDate;
/// use maint_core::dates::shift_months;
///
/// let jan_31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let feb = shift_months(jan_31, 1).unwrap();
/// assert_eq!(feb, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn shift_months(date: NaiveDate, delta: i32) -> Result<NaiveDate> {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };

    shifted.ok_or_else(|| MaintError::DateOutOfRange(format!("{} 平移 {} 個月", date, delta)))
}

/// 平移天數
pub fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
        .ok_or_else(|| MaintError::DateOutOfRange(format!("{} 平移 {} 天", date, days)))
}

/// 是否為週末（週六或週日）
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 距離週日的天數（0 = 週日 … 6 = 週六）
pub fn days_from_sunday(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// 是否為同一日曆日（忽略時間）
pub fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// 解析日期字串
///
/// 接受 `YYYY-MM-DD`、`YYYY-MM-DDTHH:MM:SS` 與 RFC 3339。
/// RFC 3339 取其自身時區的日曆日。
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// 解析 `HH:MM` 時間
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// 月份名稱（1-12），超出範圍回傳空字串
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
        .unwrap_or("")
}

/// 月份標題，如 `February 2024`
pub fn month_label(date: NaiveDate) -> String {
    format!("{} {}", month_name(date.month()), date.year())
}
