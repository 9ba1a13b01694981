use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Converts an instant into the organizational timezone.
pub fn local_now(now: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    now.with_timezone(&tz)
}

/// Civil date of an instant in the organizational timezone. Every "today"
/// decision in the attendance core goes through this.
pub fn local_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    local_now(now, tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Jakarta;

    #[test]
    fn local_date_follows_organizational_timezone() {
        // 17:30 UTC is already past midnight in Jakarta (UTC+7).
        let now = Utc.with_ymd_and_hms(2026, 1, 9, 17, 30, 0).unwrap();
        assert_eq!(
            local_date(now, Jakarta),
            NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
        );
    }

    #[test]
    fn local_date_before_day_boundary() {
        let now = Utc.with_ymd_and_hms(2026, 1, 9, 16, 59, 0).unwrap();
        assert_eq!(
            local_date(now, Jakarta),
            NaiveDate::from_ymd_opt(2026, 1, 9).unwrap()
        );
    }
}
