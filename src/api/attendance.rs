use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use sqlx::MySqlPool;

use crate::{
    auth::auth::AuthUser,
    config::Config,
    core,
    error::AttendanceError,
    store::{AttendanceStore, MySqlStore},
    utils::time::local_date,
};

fn reject_or_fail(e: AttendanceError, employee_id: u64, op: &str) -> actix_web::Result<HttpResponse> {
    if e.is_user_error() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": e.to_string()
        })));
    }
    tracing::error!(error = %e, employee_id, "{} failed", op);
    Err(actix_web::error::ErrorInternalServerError(
        "Internal Server Error",
    ))
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-in",
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "message": "Checked in successfully"
        })),
        (status = 400, description = "Already checked in today", body = Object, example = json!({
            "message": "You have already checked in today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;
    let store = MySqlStore::new(pool.get_ref().clone());

    match core::attendance::check_in(&store, employee_id, Utc::now(), config.org_timezone).await {
        Ok(record) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Checked in successfully",
            "attendance": record
        }))),
        Err(e) => reject_or_fail(e, employee_id, "Check-in"),
    }
}

/// Check-out endpoint
#[utoipa::path(
    put,
    path = "/api/v1/attendance/check-out",
    responses(
        (status = 200, description = "Checked out successfully", body = Object, example = json!({
            "message": "Checked out successfully"
        })),
        (status = 400, description = "No active check-in found for today", body = Object, example = json!({
            "message": "You need to check in before checking out"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;
    let store = MySqlStore::new(pool.get_ref().clone());

    match core::attendance::check_out(&store, employee_id, Utc::now(), config.org_timezone).await {
        Ok(record) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Checked out successfully",
            "attendance": record
        }))),
        Err(e) => reject_or_fail(e, employee_id, "Check-out"),
    }
}

/// Today's attendance record for the calling employee, if any.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/today",
    responses(
        (status = 200, description = "Today's record (null when absent)", body = Object),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn today(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;
    let store = MySqlStore::new(pool.get_ref().clone());
    let date = local_date(Utc::now(), config.org_timezone);

    let record = store.find_by_day(employee_id, date).await.map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to fetch today's attendance");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "date": date,
        "attendance": record
    })))
}
