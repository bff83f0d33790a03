//! Time utilities
//!
//! Calendar-day logic works in the business timezone, not UTC: a restaurant
//! day is whatever "today" means at the venue, and queue numbers reset on
//! that boundary.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current calendar date in the business timezone
pub fn business_today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_recent() {
        // 2024-01-01 as a floor; wall clocks only move forward
        assert!(now_millis() > 1_704_067_200_000);
    }

    #[test]
    fn test_business_today_tracks_timezone() {
        // Kiritimati (UTC+14) and Niue (UTC-11) sit 25 hours apart, so their
        // business dates differ by one or two days, never negatively
        let east = business_today(chrono_tz::Pacific::Kiritimati);
        let west = business_today(chrono_tz::Pacific::Niue);
        let diff = (east - west).num_days();
        assert!((1..=2).contains(&diff));
    }
}
