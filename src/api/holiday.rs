use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::{auth::auth::AuthUser, model::holiday::Holiday, utils::holiday_cache};

#[derive(Deserialize, ToSchema)]
pub struct CreateHoliday {
    #[schema(example = "2026-03-19", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Nyepi")]
    pub description: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct HolidayQuery {
    /// Restrict the listing to a calendar year
    #[param(example = 2026)]
    pub year: Option<i32>,
}

/// Register a holiday (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/holidays",
    request_body = CreateHoliday,
    responses(
        (status = 201, description = "Holiday created", body = Object, example = json!({
            "message": "Holiday created"
        })),
        (status = 409, description = "A holiday already exists on this date"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Holidays"
)]
pub async fn create_holiday(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateHoliday>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let result = sqlx::query("INSERT INTO holidays (date, description) VALUES (?, ?)")
        .bind(payload.date)
        .bind(&payload.description)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(_) => {
            holiday_cache::mark_holiday(payload.date).await;

            Ok(HttpResponse::Created().json(json!({
                "message": "Holiday created"
            })))
        }
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "message": "A holiday already exists on this date"
                    })));
                }
            }

            error!(error = %e, date = %payload.date, "Failed to create holiday");
            Err(ErrorInternalServerError("Internal Server Error"))
        }
    }
}

/// List holidays, optionally limited to one year
#[utoipa::path(
    get,
    path = "/api/v1/holidays",
    params(HolidayQuery),
    responses(
        (status = 200, description = "Holiday list ordered by date", body = [Holiday]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Holidays"
)]
pub async fn list_holidays(
    // Both roles may read the calendar.
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<HolidayQuery>,
) -> actix_web::Result<impl Responder> {
    let holidays = match query.year {
        Some(year) => {
            sqlx::query_as::<_, Holiday>(
                "SELECT id, date, description FROM holidays WHERE YEAR(date) = ? ORDER BY date",
            )
            .bind(year)
            .fetch_all(pool.get_ref())
            .await
        }
        None => {
            sqlx::query_as::<_, Holiday>(
                "SELECT id, date, description FROM holidays ORDER BY date",
            )
            .fetch_all(pool.get_ref())
            .await
        }
    }
    .map_err(|e| {
        error!(error = %e, "Failed to fetch holidays");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(holidays))
}

/// Remove a holiday (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/holidays/{holiday_id}",
    params(
        ("holiday_id" = u64, Path, description = "Holiday ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Holiday not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Holidays"
)]
pub async fn delete_holiday(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let holiday_id = path.into_inner();

    // Fetch first so the cache entry can be dropped by date.
    let holiday = sqlx::query_as::<_, Holiday>(
        "SELECT id, date, description FROM holidays WHERE id = ?",
    )
    .bind(holiday_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, holiday_id, "Failed to fetch holiday");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let holiday = match holiday {
        Some(h) => h,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Holiday not found"
            })));
        }
    };

    sqlx::query("DELETE FROM holidays WHERE id = ?")
        .bind(holiday_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, holiday_id, "Failed to delete holiday");
            ErrorInternalServerError("Internal Server Error")
        })?;

    holiday_cache::forget(holiday.date).await;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}
