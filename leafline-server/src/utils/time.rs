//! 时间工具函数 — 门店时区转换
//!
//! 所有"当前时间"的判断统一使用门店运营时区 (`Config::timezone`)。
//! 配送窗口的小时比较都是本地小时比较，内部不做时区换算。

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// 当前门店本地时间
pub fn store_now(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 日期 → YYYY-MM-DD 字符串
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 日期 → 英文星期全名 (Monday, Tuesday, ...)
pub fn day_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_roundtrip() {
        let date = parse_date("2024-06-05").unwrap();
        assert_eq!(format_date(date), "2024-06-05");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("06/05/2024").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_day_name() {
        // 2024-06-03 is a Monday
        let date = parse_date("2024-06-03").unwrap();
        assert_eq!(day_name(date), "Monday");
    }
}
