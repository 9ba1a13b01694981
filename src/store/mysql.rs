use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::MySqlPool;

use crate::{
    model::{
        attendance::{Attendance, AttendanceStatus},
        attendance_request::{AttendanceRequest, RequestKind, RequestStatus},
    },
    store::{AttendanceStore, EmployeeStore, HolidayStore, RequestStore, StoreError},
    utils::holiday_cache,
};

/// sqlx-backed store. The (employee, date) unique keys on `attendances` and
/// `attendance_requests` are the last line of defense against concurrent
/// duplicate submissions.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// MySQL reports unique-key violations under SQLSTATE 23000.
fn map_insert_err(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some("23000") {
            return StoreError::Duplicate;
        }
    }
    StoreError::Database(e)
}

#[async_trait]
impl AttendanceStore for MySqlStore {
    async fn find_by_day(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, StoreError> {
        let record = sqlx::query_as::<_, Attendance>(
            r#"
            SELECT id, employee_id, date, check_in_at, check_out_at, status
            FROM attendances
            WHERE employee_id = ? AND date = ?
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert_present(
        &self,
        employee_id: u64,
        date: NaiveDate,
        check_in_at: DateTime<Utc>,
    ) -> Result<Attendance, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendances (employee_id, date, check_in_at, check_out_at, status)
            VALUES (?, ?, ?, NULL, 'present')
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .bind(check_in_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_err)?;

        Ok(Attendance {
            id: result.last_insert_id(),
            employee_id,
            date,
            check_in_at: Some(check_in_at),
            check_out_at: None,
            status: AttendanceStatus::Present,
        })
    }

    async fn reset_to_present(
        &self,
        attendance_id: u64,
        check_in_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE attendances
            SET check_in_at = ?, check_out_at = NULL, status = 'present'
            WHERE id = ?
            "#,
        )
        .bind(check_in_at)
        .bind(attendance_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_check_out(
        &self,
        attendance_id: u64,
        check_out_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE attendances SET check_out_at = ? WHERE id = ?")
            .bind(check_out_at)
            .bind(attendance_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn upsert_status(
        &self,
        employee_id: u64,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO attendances (employee_id, date, check_in_at, check_out_at, status)
            VALUES (?, ?, NULL, NULL, ?)
            ON DUPLICATE KEY UPDATE
                check_in_at = NULL,
                check_out_at = NULL,
                status = VALUES(status)
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_absences(
        &self,
        employee_ids: &[u64],
        date: NaiveDate,
        swept_at: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        if employee_ids.is_empty() {
            return Ok(0);
        }

        let values = std::iter::repeat("(?, ?, NULL, NULL, 'absent', ?, ?)")
            .take(employee_ids.len())
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "INSERT INTO attendances \
             (employee_id, date, check_in_at, check_out_at, status, created_at, updated_at) \
             VALUES {}",
            values
        );

        let mut query = sqlx::query(&sql);
        for employee_id in employee_ids {
            query = query.bind(employee_id).bind(date).bind(swept_at).bind(swept_at);
        }

        let mut tx = self.pool.begin().await?;
        let result = query.execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RequestStore for MySqlStore {
    async fn exists_for_day(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM attendance_requests WHERE employee_id = ? AND date = ? LIMIT 1)",
        )
        .bind(employee_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert_pending(
        &self,
        employee_id: u64,
        date: NaiveDate,
        kind: RequestKind,
    ) -> Result<AttendanceRequest, StoreError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO attendance_requests (employee_id, date, kind, status, created_at)
            VALUES (?, ?, ?, 'pending', ?)
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .bind(kind)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_err)?;

        Ok(AttendanceRequest {
            id: result.last_insert_id(),
            employee_id,
            date,
            kind,
            status: RequestStatus::Pending,
            created_at: Some(created_at),
        })
    }

    async fn find(&self, request_id: u64) -> Result<Option<AttendanceRequest>, StoreError> {
        let request = sqlx::query_as::<_, AttendanceRequest>(
            r#"
            SELECT id, employee_id, date, kind, status, created_at
            FROM attendance_requests
            WHERE id = ?
            "#,
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    async fn finalize(
        &self,
        request_id: u64,
        status: RequestStatus,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE attendance_requests
            SET status = ?
            WHERE id = ? AND status = 'pending'
            "#,
        )
        .bind(status)
        .bind(request_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl EmployeeStore for MySqlStore {
    async fn active_ids_without_attendance(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<u64>, StoreError> {
        // Set difference in one query rather than a per-employee loop.
        let ids = sqlx::query_scalar::<_, u64>(
            r#"
            SELECT e.id
            FROM employees e
            LEFT JOIN attendances a ON a.employee_id = e.id AND a.date = ?
            WHERE e.is_active = TRUE AND a.id IS NULL
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}

#[async_trait]
impl HolidayStore for MySqlStore {
    async fn exists_on(&self, date: NaiveDate) -> Result<bool, StoreError> {
        // Fast positive via the in-memory cache, database fallback.
        if holiday_cache::is_known_holiday(date).await {
            return Ok(true);
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM holidays WHERE date = ? LIMIT 1)",
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        if exists {
            holiday_cache::mark_holiday(date).await;
        }

        Ok(exists)
    }
}
