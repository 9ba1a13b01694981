use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::model::attendance::AttendanceStatus;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RequestKind {
    Sick,
    Leave,
}

impl From<RequestKind> for AttendanceStatus {
    fn from(kind: RequestKind) -> Self {
        match kind {
            RequestKind::Sick => AttendanceStatus::Sick,
            RequestKind::Leave => AttendanceStatus::Leave,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A sick/leave request for a single date. At most one request per
/// (employee, date) regardless of status history; a rejected request keeps
/// occupying its date.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 7,
        "employee_id": 42,
        "date": "2026-01-12",
        "kind": "leave",
        "status": "pending",
        "created_at": "2026-01-05T03:00:00Z"
    })
)]
pub struct AttendanceRequest {
    #[schema(example = 7)]
    pub id: u64,

    #[schema(example = 42)]
    pub employee_id: u64,

    #[schema(example = "2026-01-12", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "leave")]
    pub kind: RequestKind,

    #[schema(example = "pending")]
    pub status: RequestStatus,

    #[schema(value_type = Option<String>, format = "date-time", nullable = true)]
    pub created_at: Option<DateTime<Utc>>,
}
