use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::auth::AuthUser,
    config::Config,
    core::report::{month_bounds, weekday_count, working_days},
    model::attendance::Attendance,
    utils::time::local_date,
};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct DailyReportQuery {
    /// Report date; defaults to today in the organization timezone
    #[param(example = "2026-01-12")]
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct MonthlyReportQuery {
    #[param(example = 2026)]
    pub year: i32,
    #[param(example = 1)]
    pub month: u32,
}

#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct DailyCounts {
    #[schema(example = 40)]
    pub present: i64,
    #[schema(example = 3)]
    pub absent: i64,
    #[schema(example = 1)]
    pub sick: i64,
    #[schema(example = 2)]
    pub leave: i64,
}

#[derive(Serialize, ToSchema)]
pub struct DailyReport {
    #[schema(example = "2026-01-12", value_type = String)]
    pub date: NaiveDate,
    pub counts: DailyCounts,
}

#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct MonthlyEmployeeRow {
    pub employee_id: u64,
    #[schema(example = "EMP-000042")]
    pub employee_code: String,
    #[schema(example = "Siti Rahma")]
    pub name: String,
    #[schema(example = 18)]
    pub present: i64,
    #[schema(example = 1)]
    pub absent: i64,
    #[schema(example = 2)]
    pub sick: i64,
    #[schema(example = 1)]
    pub leave: i64,
}

#[derive(Serialize, ToSchema)]
pub struct MonthlyReport {
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = 1)]
    pub month: u32,
    /// Weekdays in the month minus registered holidays
    #[schema(example = 21)]
    pub working_days: i64,
    pub employees: Vec<MonthlyEmployeeRow>,
}

/// Daily status counts across all employees
#[utoipa::path(
    get,
    path = "/api/v1/reports/daily",
    params(DailyReportQuery),
    responses(
        (status = 200, description = "Counts per attendance status", body = DailyReport),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn daily_report(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    query: web::Query<DailyReportQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let date = query
        .date
        .unwrap_or_else(|| local_date(Utc::now(), config.org_timezone));

    let counts = sqlx::query_as::<_, DailyCounts>(
        r#"
        SELECT
            COUNT(CASE WHEN status = 'present' THEN 1 END) AS present,
            COUNT(CASE WHEN status = 'absent'  THEN 1 END) AS absent,
            COUNT(CASE WHEN status = 'sick'    THEN 1 END) AS sick,
            COUNT(CASE WHEN status = 'leave'   THEN 1 END) AS `leave`
        FROM attendances
        WHERE date = ?
        "#,
    )
    .bind(date)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, %date, "Failed to build daily report");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(DailyReport { date, counts }))
}

/// Monthly per-employee totals plus the month's working-day denominator
#[utoipa::path(
    get,
    path = "/api/v1/reports/monthly",
    params(MonthlyReportQuery),
    responses(
        (status = 200, description = "Per-employee monthly totals", body = MonthlyReport),
        (status = 400, description = "Invalid year/month"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn monthly_report(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<MonthlyReportQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let (start, end) = match month_bounds(query.year, query.month) {
        Some(bounds) => bounds,
        None => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Invalid year or month"
            })));
        }
    };

    let holiday_count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT date) FROM holidays WHERE date BETWEEN ? AND ?",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to count holidays for report");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let employees = sqlx::query_as::<_, MonthlyEmployeeRow>(
        r#"
        SELECT
            e.id AS employee_id,
            e.employee_code,
            e.name,
            COUNT(CASE WHEN a.status = 'present' THEN 1 END) AS present,
            COUNT(CASE WHEN a.status = 'absent'  THEN 1 END) AS absent,
            COUNT(CASE WHEN a.status = 'sick'    THEN 1 END) AS sick,
            COUNT(CASE WHEN a.status = 'leave'   THEN 1 END) AS `leave`
        FROM employees e
        LEFT JOIN attendances a
            ON a.employee_id = e.id AND a.date BETWEEN ? AND ?
        WHERE e.is_active = TRUE
        GROUP BY e.id, e.employee_code, e.name
        ORDER BY e.name
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to build monthly report");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(MonthlyReport {
        year: query.year,
        month: query.month,
        working_days: working_days(weekday_count(start, end), holiday_count),
        employees,
    }))
}

/// One employee's attendance rows for a month
#[utoipa::path(
    get,
    path = "/api/v1/reports/monthly/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID"),
        MonthlyReportQuery
    ),
    responses(
        (status = 200, description = "Attendance rows ordered by date", body = [Attendance]),
        (status = 400, description = "Invalid year/month"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn monthly_detail(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    query: web::Query<MonthlyReportQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    // Employees may read their own detail; admins may read anyone's.
    if auth.require_admin().is_err() && auth.require_employee_id()? != employee_id {
        return Err(actix_web::error::ErrorForbidden("Forbidden"));
    }

    let (start, end) = match month_bounds(query.year, query.month) {
        Some(bounds) => bounds,
        None => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Invalid year or month"
            })));
        }
    };

    let rows = sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, employee_id, date, check_in_at, check_out_at, status
        FROM attendances
        WHERE employee_id = ? AND date BETWEEN ? AND ?
        ORDER BY date
        "#,
    )
    .bind(employee_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch monthly detail");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(rows))
}
