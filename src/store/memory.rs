//! In-memory store used by the core unit tests. Mirrors the uniqueness
//! behavior of the MySQL schema, including `StoreError::Duplicate` on
//! conflicting inserts.

use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{
    attendance::{Attendance, AttendanceStatus},
    attendance_request::{AttendanceRequest, RequestKind, RequestStatus},
};
use crate::store::{AttendanceStore, EmployeeStore, HolidayStore, RequestStore, StoreError};

#[derive(Default)]
struct Inner {
    attendances: Vec<Attendance>,
    requests: Vec<AttendanceRequest>,
    employees: Vec<(u64, bool)>,
    holidays: BTreeSet<NaiveDate>,
    next_id: u64,
}

impl Inner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_employee(&self, id: u64, is_active: bool) {
        self.inner.lock().unwrap().employees.push((id, is_active));
    }

    pub fn add_holiday(&self, date: NaiveDate) {
        self.inner.lock().unwrap().holidays.insert(date);
    }

    pub fn attendance_count(&self) -> usize {
        self.inner.lock().unwrap().attendances.len()
    }

    pub fn attendance_for(&self, employee_id: u64, date: NaiveDate) -> Option<Attendance> {
        self.inner
            .lock()
            .unwrap()
            .attendances
            .iter()
            .find(|a| a.employee_id == employee_id && a.date == date)
            .cloned()
    }

    pub fn request(&self, request_id: u64) -> Option<AttendanceRequest> {
        self.inner
            .lock()
            .unwrap()
            .requests
            .iter()
            .find(|r| r.id == request_id)
            .cloned()
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn find_by_day(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, StoreError> {
        Ok(self.attendance_for(employee_id, date))
    }

    async fn insert_present(
        &self,
        employee_id: u64,
        date: NaiveDate,
        check_in_at: DateTime<Utc>,
    ) -> Result<Attendance, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .attendances
            .iter()
            .any(|a| a.employee_id == employee_id && a.date == date)
        {
            return Err(StoreError::Duplicate);
        }

        let record = Attendance {
            id: inner.next_id(),
            employee_id,
            date,
            check_in_at: Some(check_in_at),
            check_out_at: None,
            status: AttendanceStatus::Present,
        };
        inner.attendances.push(record.clone());
        Ok(record)
    }

    async fn reset_to_present(
        &self,
        attendance_id: u64,
        check_in_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.attendances.iter_mut().find(|a| a.id == attendance_id) {
            record.check_in_at = Some(check_in_at);
            record.check_out_at = None;
            record.status = AttendanceStatus::Present;
        }
        Ok(())
    }

    async fn set_check_out(
        &self,
        attendance_id: u64,
        check_out_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.attendances.iter_mut().find(|a| a.id == attendance_id) {
            record.check_out_at = Some(check_out_at);
        }
        Ok(())
    }

    async fn upsert_status(
        &self,
        employee_id: u64,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner
            .attendances
            .iter_mut()
            .find(|a| a.employee_id == employee_id && a.date == date)
        {
            record.check_in_at = None;
            record.check_out_at = None;
            record.status = status;
            return Ok(());
        }

        let id = inner.next_id();
        inner.attendances.push(Attendance {
            id,
            employee_id,
            date,
            check_in_at: None,
            check_out_at: None,
            status,
        });
        Ok(())
    }

    async fn insert_absences(
        &self,
        employee_ids: &[u64],
        date: NaiveDate,
        _swept_at: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        for &employee_id in employee_ids {
            if inner
                .attendances
                .iter()
                .any(|a| a.employee_id == employee_id && a.date == date)
            {
                return Err(StoreError::Duplicate);
            }
            let id = inner.next_id();
            inner.attendances.push(Attendance {
                id,
                employee_id,
                date,
                check_in_at: None,
                check_out_at: None,
                status: AttendanceStatus::Absent,
            });
        }
        Ok(employee_ids.len() as u64)
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn exists_for_day(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<bool, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .requests
            .iter()
            .any(|r| r.employee_id == employee_id && r.date == date))
    }

    async fn insert_pending(
        &self,
        employee_id: u64,
        date: NaiveDate,
        kind: RequestKind,
    ) -> Result<AttendanceRequest, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .requests
            .iter()
            .any(|r| r.employee_id == employee_id && r.date == date)
        {
            return Err(StoreError::Duplicate);
        }

        let request = AttendanceRequest {
            id: inner.next_id(),
            employee_id,
            date,
            kind,
            status: RequestStatus::Pending,
            created_at: Some(Utc::now()),
        };
        inner.requests.push(request.clone());
        Ok(request)
    }

    async fn find(&self, request_id: u64) -> Result<Option<AttendanceRequest>, StoreError> {
        Ok(self.request(request_id))
    }

    async fn finalize(
        &self,
        request_id: u64,
        status: RequestStatus,
    ) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(request) = inner
            .requests
            .iter_mut()
            .find(|r| r.id == request_id && r.status == RequestStatus::Pending)
        {
            request.status = status;
            return Ok(true);
        }
        Ok(false)
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn active_ids_without_attendance(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<u64>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .employees
            .iter()
            .filter(|(id, is_active)| {
                *is_active
                    && !inner
                        .attendances
                        .iter()
                        .any(|a| a.employee_id == *id && a.date == date)
            })
            .map(|(id, _)| *id)
            .collect())
    }
}

#[async_trait]
impl HolidayStore for MemoryStore {
    async fn exists_on(&self, date: NaiveDate) -> Result<bool, StoreError> {
        Ok(self.inner.lock().unwrap().holidays.contains(&date))
    }
}
