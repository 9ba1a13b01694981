use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Outcome recorded for one (employee, date) pair.
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
pub enum AttendanceStatus {
    Present,
    Absent,
    Sick,
    Leave,
}

/// One attendance record per (employee, date). Check-in/check-out instants
/// are only ever set on present records; absent/sick/leave rows keep both
/// null.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 42,
        "date": "2026-01-09",
        "check_in_at": "2026-01-09T01:05:00Z",
        "check_out_at": null,
        "status": "present"
    })
)]
pub struct Attendance {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 42)]
    pub employee_id: u64,

    #[schema(example = "2026-01-09", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(value_type = Option<String>, format = "date-time", nullable = true)]
    pub check_in_at: Option<DateTime<Utc>>,

    #[schema(value_type = Option<String>, format = "date-time", nullable = true)]
    pub check_out_at: Option<DateTime<Utc>>,

    #[schema(example = "present")]
    pub status: AttendanceStatus,
}
