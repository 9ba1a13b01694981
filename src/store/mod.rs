use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::model::{
    attendance::{Attendance, AttendanceStatus},
    attendance_request::{AttendanceRequest, RequestKind, RequestStatus},
};

pub mod mysql;

#[cfg(test)]
pub mod memory;

pub use mysql::MySqlStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique-key violation on insert. The core maps this to the matching
    /// domain error so concurrent duplicate submissions do not crash.
    #[error("duplicate key")]
    Duplicate,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Attendance records keyed by (employee, date).
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn find_by_day(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, StoreError>;

    /// Inserts a fresh present record with the given check-in instant.
    /// Returns `StoreError::Duplicate` if a record for the day already
    /// exists.
    async fn insert_present(
        &self,
        employee_id: u64,
        date: NaiveDate,
        check_in_at: DateTime<Utc>,
    ) -> Result<Attendance, StoreError>;

    /// Turns an existing timestamp-less record (sweeper or approval product)
    /// into a present record with the given check-in instant.
    async fn reset_to_present(
        &self,
        attendance_id: u64,
        check_in_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    async fn set_check_out(
        &self,
        attendance_id: u64,
        check_out_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Writes a timestamp-less record with the given status for the day,
    /// unconditionally overwriting any existing record (last-write-wins).
    async fn upsert_status(
        &self,
        employee_id: u64,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<(), StoreError>;

    /// Bulk-inserts absent records for the given employees in one
    /// transaction. The caller guarantees none of them has a record for the
    /// date. The sweep instant is recorded as row bookkeeping only.
    async fn insert_absences(
        &self,
        employee_ids: &[u64],
        date: NaiveDate,
        swept_at: DateTime<Utc>,
    ) -> Result<u64, StoreError>;
}

/// Sick/leave requests keyed by (employee, date).
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// True if any request, of any status, exists for the pair.
    async fn exists_for_day(&self, employee_id: u64, date: NaiveDate)
        -> Result<bool, StoreError>;

    async fn insert_pending(
        &self,
        employee_id: u64,
        date: NaiveDate,
        kind: RequestKind,
    ) -> Result<AttendanceRequest, StoreError>;

    async fn find(&self, request_id: u64) -> Result<Option<AttendanceRequest>, StoreError>;

    /// Moves a pending request to a terminal status. Returns false when the
    /// request was not pending (or does not exist) and nothing changed.
    async fn finalize(&self, request_id: u64, status: RequestStatus) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Ids of active employees with no attendance record on the date, as a
    /// single set-difference query.
    async fn active_ids_without_attendance(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<u64>, StoreError>;
}

#[async_trait]
pub trait HolidayStore: Send + Sync {
    async fn exists_on(&self, date: NaiveDate) -> Result<bool, StoreError>;
}
