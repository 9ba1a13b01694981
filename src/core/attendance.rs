//! Per-employee, per-day check-in/check-out state machine:
//! `NoRecord -> CheckedIn -> CheckedOut`, with no path back to an earlier
//! state. "Today" is always derived from the caller-supplied instant in the
//! organizational timezone; there is no backdating path.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{
    error::AttendanceError,
    model::attendance::{Attendance, AttendanceStatus},
    store::{AttendanceStore, StoreError},
    utils::time::local_date,
};

/// Records a check-in for today. A record left behind by the sweeper or the
/// approval workflow (status without a check-in instant) is overwritten to
/// present; a record that already has a check-in rejects the call.
pub async fn check_in(
    store: &dyn AttendanceStore,
    employee_id: u64,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<Attendance, AttendanceError> {
    let today = local_date(now, tz);

    match store.find_by_day(employee_id, today).await? {
        Some(record) if record.check_in_at.is_some() => Err(AttendanceError::AlreadyCheckedIn),
        Some(mut record) => {
            store.reset_to_present(record.id, now).await?;
            record.check_in_at = Some(now);
            record.check_out_at = None;
            record.status = AttendanceStatus::Present;
            Ok(record)
        }
        None => match store.insert_present(employee_id, today, now).await {
            Ok(record) => Ok(record),
            // Concurrent duplicate submission caught by the unique key.
            Err(StoreError::Duplicate) => Err(AttendanceError::AlreadyCheckedIn),
            Err(e) => Err(e.into()),
        },
    }
}

/// Records a check-out for today. Requires a prior check-in; the status stays
/// present and no other field changes.
pub async fn check_out(
    store: &dyn AttendanceStore,
    employee_id: u64,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<Attendance, AttendanceError> {
    let today = local_date(now, tz);

    let record = store.find_by_day(employee_id, today).await?;
    let mut record = match record {
        Some(r) if r.check_in_at.is_some() => r,
        _ => return Err(AttendanceError::NotCheckedIn),
    };

    if record.check_out_at.is_some() {
        return Err(AttendanceError::AlreadyCheckedOut);
    }

    store.set_check_out(record.id, now).await?;
    record.check_out_at = Some(now);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Jakarta;

    use crate::store::memory::MemoryStore;

    fn jakarta_instant(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Jakarta
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn second_check_in_same_day_is_rejected() {
        let store = MemoryStore::new();
        let first = jakarta_instant(2026, 1, 9, 8, 0);
        let second = jakarta_instant(2026, 1, 9, 8, 5);

        check_in(&store, 1, first, Jakarta).await.unwrap();
        let err = check_in(&store, 1, second, Jakarta).await.unwrap_err();

        assert!(matches!(err, AttendanceError::AlreadyCheckedIn));
        assert_eq!(store.attendance_count(), 1);
    }

    #[tokio::test]
    async fn check_out_without_check_in_never_creates_a_record() {
        let store = MemoryStore::new();
        let now = jakarta_instant(2026, 1, 9, 17, 0);

        let err = check_out(&store, 1, now, Jakarta).await.unwrap_err();

        assert!(matches!(err, AttendanceError::NotCheckedIn));
        assert_eq!(store.attendance_count(), 0);
    }

    #[tokio::test]
    async fn check_out_twice_is_rejected() {
        let store = MemoryStore::new();
        check_in(&store, 1, jakarta_instant(2026, 1, 9, 8, 0), Jakarta)
            .await
            .unwrap();
        check_out(&store, 1, jakarta_instant(2026, 1, 9, 17, 0), Jakarta)
            .await
            .unwrap();

        let err = check_out(&store, 1, jakarta_instant(2026, 1, 9, 17, 5), Jakarta)
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyCheckedOut));
    }

    #[tokio::test]
    async fn check_in_overwrites_a_swept_absent_record() {
        let store = MemoryStore::new();
        let date = chrono::NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
        store
            .upsert_status(1, date, AttendanceStatus::Absent)
            .await
            .unwrap();

        let now = jakarta_instant(2026, 1, 9, 8, 0);
        let record = check_in(&store, 1, now, Jakarta).await.unwrap();

        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.check_in_at, Some(now));
        assert_eq!(record.check_out_at, None);
        assert_eq!(store.attendance_count(), 1);
    }

    #[tokio::test]
    async fn check_out_keeps_status_present() {
        let store = MemoryStore::new();
        check_in(&store, 1, jakarta_instant(2026, 1, 9, 8, 0), Jakarta)
            .await
            .unwrap();
        let out = jakarta_instant(2026, 1, 9, 17, 0);
        let record = check_out(&store, 1, out, Jakarta).await.unwrap();

        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.check_out_at, Some(out));
    }

    #[tokio::test]
    async fn today_is_resolved_in_the_organizational_timezone() {
        let store = MemoryStore::new();
        // 18:00 UTC on the 9th is 01:00 on the 10th in Jakarta.
        let now = Utc.with_ymd_and_hms(2026, 1, 9, 18, 0, 0).unwrap();

        let record = check_in(&store, 1, now, Jakarta).await.unwrap();

        assert_eq!(
            record.date,
            chrono::NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
        );
    }
}
