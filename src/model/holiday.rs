use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 3,
        "date": "2026-01-16",
        "description": "Company anniversary"
    })
)]
pub struct Holiday {
    #[schema(example = 3)]
    pub id: u64,

    #[schema(example = "2026-01-16", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "Company anniversary")]
    pub description: String,
}
