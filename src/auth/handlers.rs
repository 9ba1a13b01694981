use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info, instrument};

use crate::{
    auth::{
        auth::AuthUser,
        jwt::generate_access_token,
        password::{hash_password, verify_password},
    },
    config::Config,
    model::{employee::Employee, role::Role},
    models::{CreateUserReq, LoginReqDto, UserSql},
};

#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Login endpoint
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(pool, config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if user.username.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty username or password");
        return HttpResponse::BadRequest().body("Username or password required");
    }

    debug!("Fetching user from database");

    let db_user = match sqlx::query_as::<_, UserSql>(
        r#"
        SELECT id, username, password, role_id, employee_id
        FROM users
        WHERE username = ? AND is_active = TRUE
        "#,
    )
    .bind(&user.username)
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(user)) => {
            debug!(user_id = user.id, "User found");
            user
        }
        Ok(None) => {
            info!("Invalid credentials: user not found");
            return HttpResponse::Unauthorized().body("Invalid credentials");
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching user");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(e) = verify_password(&user.password, &db_user.password) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().body("Invalid credentials");
    }

    let access_token = match generate_access_token(
        db_user.id,
        db_user.username.clone(),
        db_user.role_id,
        db_user.employee_id,
        &config.jwt_secret,
        config.access_token_ttl,
    ) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "Failed to sign access token");
            return HttpResponse::InternalServerError().finish();
        }
    };

    info!("Login successful");

    HttpResponse::Ok().json(LoginResponse { access_token })
}

/// Create a user account linked to an employee (admin only). The employee
/// must exist, be active, and not already have an account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserReq,
    responses(
        (status = 201, description = "User created", body = Object, example = json!({
            "message": "Employee user created"
        })),
        (status = 400, description = "Employee inactive or already linked"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Username already taken"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn create_user(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateUserReq>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    if payload.username.trim().is_empty() || payload.password.len() < 8 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Username required and password must be at least 8 characters"
        })));
    }

    let employee = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_code, name, email, department, position, is_active
        FROM employees
        WHERE id = ?
        "#,
    )
    .bind(payload.employee_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id = payload.employee_id, "Failed to fetch employee");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let employee = match employee {
        Some(e) => e,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Employee not found"
            })));
        }
    };

    if !employee.is_active {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Cannot link a user account to an inactive employee"
        })));
    }

    let linked = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE employee_id = ? LIMIT 1)",
    )
    .bind(employee.id)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to check employee linkage");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if linked {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Employee already has a user account"
        })));
    }

    let hashed = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "Failed to hash password");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let result = sqlx::query(
        r#"
        INSERT INTO users (username, password, role_id, employee_id, is_active)
        VALUES (?, ?, ?, ?, TRUE)
        "#,
    )
    .bind(payload.username.trim())
    .bind(&hashed)
    .bind(Role::Employee.id())
    .bind(employee.id)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Created().json(json!({
            "message": "Employee user created"
        }))),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "message": "Username already taken"
                    })));
                }
            }

            error!(error = %e, "Failed to create user");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}
