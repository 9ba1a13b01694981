use chrono::{Datelike, NaiveDate, Weekday};

use crate::store::{HolidayStore, StoreError};

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A date is a working day iff it is not a weekend and no holiday matches it.
/// Missing holiday data simply means no holidays.
pub async fn is_working_day(
    holidays: &dyn HolidayStore,
    date: NaiveDate,
) -> Result<bool, StoreError> {
    if is_weekend(date) {
        return Ok(false);
    }
    Ok(!holidays.exists_on(date).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn saturday_and_sunday_are_weekend() {
        assert!(is_weekend(date(2026, 1, 10)));
        assert!(is_weekend(date(2026, 1, 11)));
        assert!(!is_weekend(date(2026, 1, 9)));
    }

    #[tokio::test]
    async fn weekday_without_holiday_is_working_day() {
        let store = MemoryStore::new();
        assert!(is_working_day(&store, date(2026, 1, 9)).await.unwrap());
    }

    #[tokio::test]
    async fn holiday_is_not_a_working_day() {
        let store = MemoryStore::new();
        store.add_holiday(date(2026, 1, 16));
        assert!(!is_working_day(&store, date(2026, 1, 16)).await.unwrap());
    }

    #[tokio::test]
    async fn weekend_is_not_a_working_day_even_without_holiday() {
        let store = MemoryStore::new();
        assert!(!is_working_day(&store, date(2026, 1, 11)).await.unwrap());
    }
}
