//! End-of-day reconciliation: inserts absent records for active employees
//! with no attendance record on a working day. Safe to re-run — the
//! set-difference query naturally excludes already-swept employees.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::{
    core::calendar,
    error::AttendanceError,
    store::{AttendanceStore, EmployeeStore, HolidayStore},
    utils::time::local_now,
};

/// Runs one absence sweep. Returns the number of records inserted; zero when
/// the cutoff has not passed yet or today is not a working day.
pub async fn run_absence_sweep(
    employees: &dyn EmployeeStore,
    holidays: &dyn HolidayStore,
    attendance: &dyn AttendanceStore,
    now: DateTime<Utc>,
    tz: Tz,
    cutoff: NaiveTime,
) -> Result<u64, AttendanceError> {
    let local = local_now(now, tz);

    if local.time() < cutoff {
        tracing::info!(%cutoff, "Absence sweep skipped: before cutoff");
        return Ok(0);
    }

    let today = local.date_naive();

    if !calendar::is_working_day(holidays, today).await? {
        tracing::info!(%today, "Absence sweep skipped: not a working day");
        return Ok(0);
    }

    let missing = employees.active_ids_without_attendance(today).await?;
    if missing.is_empty() {
        return Ok(0);
    }

    let inserted = attendance.insert_absences(&missing, today, now).await?;
    tracing::info!(%today, inserted, "Absence sweep completed");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::Asia::Jakarta;

    use crate::model::attendance::AttendanceStatus;
    use crate::store::memory::MemoryStore;

    fn cutoff() -> NaiveTime {
        NaiveTime::from_hms_opt(16, 0, 0).unwrap()
    }

    fn jakarta_instant(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Jakarta
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    async fn sweep(store: &MemoryStore, now: DateTime<Utc>) -> u64 {
        run_absence_sweep(store, store, store, now, Jakarta, cutoff())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn no_op_before_cutoff() {
        let store = MemoryStore::new();
        store.add_employee(1, true);

        let inserted = sweep(&store, jakarta_instant(2026, 1, 9, 15, 59)).await;

        assert_eq!(inserted, 0);
        assert_eq!(store.attendance_count(), 0);
    }

    #[tokio::test]
    async fn no_op_on_weekend_regardless_of_time() {
        let store = MemoryStore::new();
        store.add_employee(1, true);

        // 2026-01-11 is a Sunday.
        let inserted = sweep(&store, jakarta_instant(2026, 1, 11, 16, 30)).await;

        assert_eq!(inserted, 0);
        assert_eq!(store.attendance_count(), 0);
    }

    #[tokio::test]
    async fn no_op_on_a_holiday() {
        let store = MemoryStore::new();
        store.add_employee(1, true);
        store.add_holiday(NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());

        let inserted = sweep(&store, jakarta_instant(2026, 1, 16, 16, 30)).await;

        assert_eq!(inserted, 0);
        assert_eq!(store.attendance_count(), 0);
    }

    #[tokio::test]
    async fn marks_active_employees_without_records_after_cutoff() {
        let store = MemoryStore::new();
        store.add_employee(1, true);
        store.add_employee(2, false);

        // 2026-01-09 is a Friday, no holiday.
        let inserted = sweep(&store, jakarta_instant(2026, 1, 9, 16, 30)).await;

        assert_eq!(inserted, 1);
        let record = store
            .attendance_for(1, NaiveDate::from_ymd_opt(2026, 1, 9).unwrap())
            .unwrap();
        assert_eq!(record.status, AttendanceStatus::Absent);
        assert_eq!(record.check_in_at, None);
        assert_eq!(record.check_out_at, None);
        // The inactive employee is never swept.
        assert!(store
            .attendance_for(2, NaiveDate::from_ymd_opt(2026, 1, 9).unwrap())
            .is_none());
    }

    #[tokio::test]
    async fn skips_employees_with_an_existing_record() {
        let store = MemoryStore::new();
        store.add_employee(1, true);
        store.add_employee(2, true);
        crate::core::attendance::check_in(&store, 1, jakarta_instant(2026, 1, 9, 8, 0), Jakarta)
            .await
            .unwrap();

        let inserted = sweep(&store, jakarta_instant(2026, 1, 9, 16, 30)).await;

        assert_eq!(inserted, 1);
        let record = store
            .attendance_for(1, NaiveDate::from_ymd_opt(2026, 1, 9).unwrap())
            .unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[tokio::test]
    async fn running_twice_inserts_nothing_the_second_time() {
        let store = MemoryStore::new();
        store.add_employee(1, true);
        store.add_employee(2, true);

        let first = sweep(&store, jakarta_instant(2026, 1, 9, 16, 30)).await;
        let second = sweep(&store, jakarta_instant(2026, 1, 9, 16, 45)).await;

        assert_eq!(first, 2);
        assert_eq!(second, 0);
        assert_eq!(store.attendance_count(), 2);
    }

    #[tokio::test]
    async fn just_after_cutoff_sweeps() {
        let store = MemoryStore::new();
        store.add_employee(1, true);

        let inserted = sweep(&store, jakarta_instant(2026, 1, 9, 16, 1)).await;

        assert_eq!(inserted, 1);
    }
}
