use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "siti.rahma")]
    pub username: String,
    #[schema(example = "secret-password")]
    pub password: String,
}

/// Admin payload creating a user account bound to an existing, active,
/// not-yet-linked employee.
#[derive(Deserialize, ToSchema)]
pub struct CreateUserReq {
    #[schema(example = 42)]
    pub employee_id: u64,
    #[schema(example = "siti.rahma")]
    pub username: String,
    #[schema(example = "secret-password")]
    pub password: String,
}

#[derive(FromRow)]
pub struct UserSql {
    pub id: u64, // matches BIGINT UNSIGNED
    pub username: String,
    pub password: String,
    pub role_id: u8,
    pub employee_id: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub sub: String,
    pub role: u8, // role id
    pub exp: usize,

    /// Present only if this user is linked to an employee record
    pub employee_id: Option<u64>,
}
