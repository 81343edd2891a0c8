use chrono::{DateTime, NaiveDate, Utc};

/// Bucket key for a commit: its UTC calendar date. Time of day is dropped;
/// year, month and day-of-month all take part, so neither weekdays nor
/// days-of-month from different months share a key.
pub fn day_key(timestamp: &DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

/// Milliseconds since the epoch at UTC midnight of `day`.
pub fn day_timestamp_ms(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn day_key_truncates_time_of_day() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 1).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 3, 5, 23, 59, 59).unwrap();
        assert_eq!(day_key(&morning), day_key(&night));
        assert_eq!(day_key(&morning), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn same_day_of_month_in_different_months_differs() {
        let jan = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2024, 2, 5, 12, 0, 0).unwrap();
        assert_ne!(day_key(&jan), day_key(&feb));
    }

    #[test]
    fn same_weekday_in_different_weeks_differs() {
        // Both Mondays.
        let first = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap();
        assert_ne!(day_key(&first), day_key(&second));
    }

    #[test]
    fn timestamp_is_utc_midnight() {
        let day = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        assert_eq!(day_timestamp_ms(day), 86_400_000);
    }
}
