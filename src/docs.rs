use crate::api::employee::{CreateEmployee, EmployeeListResponse, EmployeeQuery};
use crate::api::holiday::{CreateHoliday, HolidayQuery};
use crate::api::report::{
    DailyCounts, DailyReport, DailyReportQuery, MonthlyEmployeeRow, MonthlyReport,
    MonthlyReportQuery,
};
use crate::api::request::{CreateRequest, RequestFilter, RequestListResponse};
use crate::auth::handlers::LoginResponse;
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::attendance_request::{AttendanceRequest, RequestKind, RequestStatus};
use crate::model::employee::Employee;
use crate::model::holiday::Holiday;
use crate::models::{CreateUserReq, LoginReqDto};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance System API",
        version = "1.0.0",
        description = r#"
## Employee Attendance System

This API powers an **employee attendance** backend for a single organization.

### 🔹 Key Features
- **Attendance**
  - Daily check-in / check-out, anchored to the organization timezone
- **Sick & Leave Requests**
  - One request per employee per date, with admin approve/reject
- **Holiday Calendar**
  - Weekends and registered holidays are non-working days
- **Reports**
  - Daily status counts and monthly per-employee rollups

A companion `mark_absent` job sweeps the remaining employees into
`absent` records after the daily cutoff.

### 🔐 Security
Protected endpoints use **JWT Bearer authentication**. Admin-only
operations require the **Admin** role.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::create_user,

        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::today,

        crate::api::request::create_request,
        crate::api::request::my_requests,
        crate::api::request::list_requests,
        crate::api::request::approve_request,
        crate::api::request::reject_request,

        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::holiday::create_holiday,
        crate::api::holiday::list_holidays,
        crate::api::holiday::delete_holiday,

        crate::api::report::daily_report,
        crate::api::report::monthly_report,
        crate::api::report::monthly_detail
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            CreateUserReq,
            Attendance,
            AttendanceStatus,
            AttendanceRequest,
            RequestKind,
            RequestStatus,
            CreateRequest,
            RequestFilter,
            RequestListResponse,
            Employee,
            CreateEmployee,
            EmployeeQuery,
            EmployeeListResponse,
            Holiday,
            CreateHoliday,
            HolidayQuery,
            DailyReportQuery,
            DailyCounts,
            DailyReport,
            MonthlyReportQuery,
            MonthlyEmployeeRow,
            MonthlyReport
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and user provisioning APIs"),
        (name = "Attendance", description = "Check-in / check-out APIs"),
        (name = "Requests", description = "Sick and leave request APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Holidays", description = "Holiday calendar APIs"),
        (name = "Reports", description = "Reporting APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
