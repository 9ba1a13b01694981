use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 42,
        "employee_code": "EMP-000042",
        "name": "Siti Rahma",
        "email": "siti.rahma@company.com",
        "department": "Finance",
        "position": "Analyst",
        "is_active": true
    })
)]
pub struct Employee {
    #[schema(example = 42)]
    pub id: u64,

    #[schema(example = "EMP-000042")]
    pub employee_code: String,

    #[schema(example = "Siti Rahma")]
    pub name: String,

    #[schema(example = "siti.rahma@company.com")]
    pub email: String,

    #[schema(example = "Finance")]
    pub department: String,

    #[schema(example = "Analyst")]
    pub position: String,

    /// Inactive employees keep their history but are skipped by the absence
    /// sweep and cannot be linked to new user accounts.
    #[schema(example = true)]
    pub is_active: bool,
}
