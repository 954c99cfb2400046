use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::analytics::attendance;
use crate::analytics::leave::{self, YearMonth};
use crate::error::ApiError;
use crate::store::RecordStore;

#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaveReportQuery {
    /// Month for the per-employee breakdown, `YYYY-MM`
    #[param(example = "2026-03")]
    pub month: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    responses(
        (status = 200, description = "Attendance totals", body = crate::analytics::attendance::Summary),
        (status = 500, description = "Store failure")
    ),
    tag = "Analytics"
)]
pub async fn summary(store: web::Data<dyn RecordStore>) -> Result<HttpResponse, ApiError> {
    let records = store.list_attendance().await?;
    Ok(HttpResponse::Ok().json(attendance::summary(&records)))
}

#[utoipa::path(
    get,
    path = "/api/analytics/student-performance",
    responses(
        (status = 200, description = "Per-record status, completed first", body = [crate::analytics::attendance::Performance]),
        (status = 500, description = "Store failure")
    ),
    tag = "Analytics"
)]
pub async fn student_performance(
    store: web::Data<dyn RecordStore>,
) -> Result<HttpResponse, ApiError> {
    let records = store.list_attendance().await?;
    Ok(HttpResponse::Ok().json(attendance::performance(&records)))
}

#[utoipa::path(
    get,
    path = "/api/analytics/late-arrivals",
    responses(
        (status = 200, description = "Arrivals after 9:00 AM", body = crate::analytics::attendance::LateArrivalReport),
        (status = 500, description = "Store failure")
    ),
    tag = "Analytics"
)]
pub async fn late_arrivals(store: web::Data<dyn RecordStore>) -> Result<HttpResponse, ApiError> {
    let records = store.list_attendance().await?;
    Ok(HttpResponse::Ok().json(attendance::late_arrivals(&records)))
}

#[utoipa::path(
    get,
    path = "/api/analytics/trends",
    responses(
        (status = 200, description = "Attendance per day", body = [crate::analytics::attendance::TrendPoint]),
        (status = 500, description = "Store failure")
    ),
    tag = "Analytics"
)]
pub async fn trends(store: web::Data<dyn RecordStore>) -> Result<HttpResponse, ApiError> {
    let records = store.list_attendance().await?;
    Ok(HttpResponse::Ok().json(attendance::trends(&records)))
}

#[utoipa::path(
    get,
    path = "/api/analytics/heatmap",
    responses(
        (status = 200, description = "Check-ins per hour, 6:00 to 18:00", body = [crate::analytics::attendance::HourBucket]),
        (status = 500, description = "Store failure")
    ),
    tag = "Analytics"
)]
pub async fn heatmap(store: web::Data<dyn RecordStore>) -> Result<HttpResponse, ApiError> {
    let records = store.list_attendance().await?;
    Ok(HttpResponse::Ok().json(attendance::heatmap(&records)))
}

#[utoipa::path(
    get,
    path = "/api/analytics/leaves",
    params(LeaveReportQuery),
    responses(
        (status = 200, description = "Leave days by status, person, week and month", body = crate::analytics::leave::LeaveReport),
        (status = 400, description = "Malformed month", body = Object, example = json!({
            "message": "month must look like YYYY-MM, got \"2026-3\""
        })),
        (status = 500, description = "Store failure")
    ),
    tag = "Analytics"
)]
pub async fn leave_report(
    store: web::Data<dyn RecordStore>,
    query: web::Query<LeaveReportQuery>,
) -> Result<HttpResponse, ApiError> {
    let month = query
        .month
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(str::parse::<YearMonth>)
        .transpose()
        .map_err(ApiError::Validation)?;

    let leaves = store.list_leaves().await?;
    Ok(HttpResponse::Ok().json(leave::report(&leaves, month)))
}
