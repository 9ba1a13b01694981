use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::auth::AuthUser,
    core::workflow::{self, WorkflowOutcome},
    error::AttendanceError,
    model::attendance_request::{AttendanceRequest, RequestKind},
    store::MySqlStore,
};

#[derive(Deserialize, ToSchema)]
pub struct CreateRequest {
    #[schema(example = "2026-01-12", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "leave")]
    pub kind: RequestKind, // enum ensures Swagger dropdown
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct RequestFilter {
    /// Filter by request status
    #[param(example = "pending")]
    pub status: Option<String>,
    /// Pagination page number (start with 1)
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Pagination per page number
    #[param(example = 15)]
    pub per_page: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct RequestListResponse {
    pub data: Vec<AttendanceRequest>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 15)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

/* =========================
Submit sick/leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/requests",
    request_body(
        content = CreateRequest,
        description = "Sick/leave request for a single date",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Request submitted", body = AttendanceRequest),
        (status = 400, description = "A request already exists for this date", body = Object, example = json!({
            "message": "You already submitted a request for this date"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn create_request(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateRequest>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;
    let store = MySqlStore::new(pool.get_ref().clone());

    match workflow::submit_request(&store, employee_id, payload.date, payload.kind).await {
        Ok(request) => Ok(HttpResponse::Ok().json(request)),
        Err(e) if e.is_user_error() => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": e.to_string()
        }))),
        Err(e) => {
            tracing::error!(error = %e, employee_id, "Failed to create request");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

/* =========================
Own request history (employee)
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/requests/mine",
    responses(
        (status = 200, description = "Latest 10 requests of the caller", body = [AttendanceRequest]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn my_requests(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    let requests = sqlx::query_as::<_, AttendanceRequest>(
        r#"
        SELECT id, employee_id, date, kind, status, created_at
        FROM attendance_requests
        WHERE employee_id = ?
        ORDER BY date DESC
        LIMIT 10
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to fetch request history");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(requests))
}

/* =========================
List requests (Admin)
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/requests",
    params(RequestFilter),
    responses(
        (status = 200, description = "Paginated request list", body = RequestListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn list_requests(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<RequestFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let per_page = query.per_page.unwrap_or(15).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let mut where_sql = String::from(" WHERE 1=1");
    if query.status.is_some() {
        where_sql.push_str(" AND status = ?");
    }

    let count_sql = format!("SELECT COUNT(*) FROM attendance_requests{}", where_sql);
    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(status) = query.status.as_deref() {
        count_q = count_q.bind(status);
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to count requests");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let data_sql = format!(
        r#"
        SELECT id, employee_id, date, kind, status, created_at
        FROM attendance_requests
        {}
        ORDER BY date DESC
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, AttendanceRequest>(&data_sql);
    if let Some(status) = query.status.as_deref() {
        data_q = data_q.bind(status);
    }

    let requests = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch request list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(RequestListResponse {
        data: requests,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}

fn outcome_response(outcome: WorkflowOutcome, verb: &str) -> HttpResponse {
    match outcome {
        WorkflowOutcome::Applied(request) => HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Request {}", verb),
            "request": request
        })),
        // Benign idempotent retry; nothing was mutated.
        WorkflowOutcome::AlreadyFinalized => HttpResponse::Ok().json(serde_json::json!({
            "message": "Request already processed"
        })),
        WorkflowOutcome::NotFound => HttpResponse::NotFound().json(serde_json::json!({
            "message": "Request not found"
        })),
    }
}

fn workflow_failure(e: AttendanceError, request_id: u64, op: &str) -> actix_web::Error {
    tracing::error!(error = %e, request_id, "{} failed", op);
    actix_web::error::ErrorInternalServerError("Internal Server Error")
}

/* =========================
Approve request (Admin)
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/requests/{request_id}/approve",
    params(
        ("request_id" = u64, Path, description = "ID of the request to approve")
    ),
    responses(
        (status = 200, description = "Request approved (or already processed)", body = Object, example = json!({
            "message": "Request approved"
        })),
        (status = 404, description = "Request not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn approve_request(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let request_id = path.into_inner();
    let store = MySqlStore::new(pool.get_ref().clone());

    let outcome = workflow::approve_request(&store, &store, request_id)
        .await
        .map_err(|e| workflow_failure(e, request_id, "Approve request"))?;

    Ok(outcome_response(outcome, "approved"))
}

/* =========================
Reject request (Admin)
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/requests/{request_id}/reject",
    params(
        ("request_id" = u64, Path, description = "ID of the request to reject")
    ),
    responses(
        (status = 200, description = "Request rejected (or already processed)", body = Object, example = json!({
            "message": "Request rejected"
        })),
        (status = 404, description = "Request not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn reject_request(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let request_id = path.into_inner();
    let store = MySqlStore::new(pool.get_ref().clone());

    let outcome = workflow::reject_request(&store, request_id)
        .await
        .map_err(|e| workflow_failure(e, request_id, "Reject request"))?;

    Ok(outcome_response(outcome, "rejected"))
}
