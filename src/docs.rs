use crate::analytics::attendance::{
    AttendanceStatus, HourBucket, LateArrival, LateArrivalReport, Performance, Summary, TrendPoint,
};
use crate::analytics::leave::{LeaveReport, MonthlyEntry, PersonTotal, StatusSlice, WeekBucket};
use crate::model::attendance::{AttendanceRecord, CheckoutUpdate, NewAttendance};
use crate::model::leave_request::{
    LeaveEdit, LeaveRequest, LeaveStatus, LeaveStatusUpdate, NewLeave,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracker API",
        version = "0.1.0",
        description = r#"
## Employee Attendance Tracker

Records daily check-in/check-out sessions and leave requests, and reports on them.

### Key Features
- **Attendance**
  - Check in, check out, list sessions
- **Leave Management**
  - Apply for leave, edit a request, approve/reject it
- **Analytics**
  - Attendance summary, per-employee status, late arrivals, daily trends, hourly heatmap
  - Leave days by status, person, week and month

### Response Format
- JSON bodies; errors are `{"message": "..."}`
- List endpoints return the whole collection

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::students::list_students,
        crate::api::students::create_student,
        crate::api::students::get_student,
        crate::api::students::update_student,

        crate::api::analytics::summary,
        crate::api::analytics::student_performance,
        crate::api::analytics::late_arrivals,
        crate::api::analytics::trends,
        crate::api::analytics::heatmap,
        crate::api::analytics::leave_report,

        crate::api::leaves::list_leaves,
        crate::api::leaves::create_leave,
        crate::api::leaves::get_leave,
        crate::api::leaves::edit_leave,
        crate::api::leaves::update_leave_status
    ),
    components(
        schemas(
            AttendanceRecord,
            NewAttendance,
            CheckoutUpdate,
            LeaveRequest,
            LeaveStatus,
            NewLeave,
            LeaveEdit,
            LeaveStatusUpdate,
            Summary,
            AttendanceStatus,
            Performance,
            LateArrival,
            LateArrivalReport,
            TrendPoint,
            HourBucket,
            LeaveReport,
            StatusSlice,
            PersonTotal,
            WeekBucket,
            MonthlyEntry
        )
    ),
    tags(
        (name = "Attendance", description = "Check-in and check-out APIs"),
        (name = "Leave", description = "Leave management APIs"),
        (name = "Analytics", description = "Attendance and leave reports"),
    )
)]
pub struct ApiDoc;
