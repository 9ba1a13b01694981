//! Pure pieces of the reporting rollups. The SQL aggregations live in the
//! report handlers; this module owns the calendar arithmetic.

use chrono::NaiveDate;

use crate::core::calendar::is_weekend;

/// First and last day of a month, or `None` for an invalid year/month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    Some((start, end))
}

/// Number of weekdays (Mon-Fri) in the inclusive range.
pub fn weekday_count(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut count = 0;
    let mut current = start;
    while current <= end {
        if !is_weekend(current) {
            count += 1;
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    count
}

/// Working days = weekdays minus distinct holidays in the range, floored at
/// zero (holidays falling on weekends are still subtracted, matching the
/// report the admins already rely on).
pub fn working_days(weekdays: i64, holiday_count: i64) -> i64 {
    (weekdays - holiday_count).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_bounds_cover_full_month() {
        let (start, end) = month_bounds(2026, 1).unwrap();
        assert_eq!(start, date(2026, 1, 1));
        assert_eq!(end, date(2026, 1, 31));
    }

    #[test]
    fn month_bounds_handle_december() {
        let (start, end) = month_bounds(2026, 12).unwrap();
        assert_eq!(start, date(2026, 12, 1));
        assert_eq!(end, date(2026, 12, 31));
    }

    #[test]
    fn month_bounds_reject_invalid_month() {
        assert!(month_bounds(2026, 13).is_none());
    }

    #[test]
    fn january_2026_has_22_weekdays() {
        let (start, end) = month_bounds(2026, 1).unwrap();
        assert_eq!(weekday_count(start, end), 22);
    }

    #[test]
    fn working_days_subtract_holidays() {
        assert_eq!(working_days(22, 2), 20);
    }

    #[test]
    fn working_days_never_go_negative() {
        assert_eq!(working_days(1, 5), 0);
    }
}
