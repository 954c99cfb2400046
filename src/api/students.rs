use actix_web::{HttpResponse, web};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::model::attendance::{CheckoutUpdate, NewAttendance};
use crate::store::RecordStore;

/// List every attendance record
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All attendance records in store order", body = [crate::model::attendance::AttendanceRecord]),
        (status = 500, description = "Store failure", body = Object, example = json!({
            "message": "failed to list attendance records"
        }))
    ),
    tag = "Attendance"
)]
pub async fn list_students(store: web::Data<dyn RecordStore>) -> Result<HttpResponse, ApiError> {
    let records = store.list_attendance().await?;
    debug!(count = records.len(), "Listed attendance records");
    Ok(HttpResponse::Ok().json(records))
}

/// Check in: create an attendance record
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = NewAttendance,
    responses(
        (status = 201, description = "Record created", body = crate::model::attendance::AttendanceRecord),
        (status = 400, description = "Missing required field", body = Object, example = json!({
            "message": "rollNumber is required"
        })),
        (status = 500, description = "Store failure")
    ),
    tag = "Attendance"
)]
pub async fn create_student(
    store: web::Data<dyn RecordStore>,
    payload: web::Json<NewAttendance>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate()?;

    let record = store.create_attendance(payload).await?;
    info!(id = record.id, roll_number = %record.roll_number, "Checked in");
    Ok(HttpResponse::Created().json(record))
}

/// Fetch one attendance record
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = u64, Path, description = "Attendance record id")
    ),
    responses(
        (status = 200, description = "Record found", body = crate::model::attendance::AttendanceRecord),
        (status = 404, description = "Unknown id", body = Object, example = json!({
            "message": "Student not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn get_student(
    store: web::Data<dyn RecordStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    match store.get_attendance(id).await? {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(ApiError::not_found("Student not found")),
    }
}

/// Check out: only `checkout` is honored, other fields are ignored.
/// Without a non-empty `checkout` the record is returned unchanged.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(
        ("id" = u64, Path, description = "Attendance record id")
    ),
    request_body = CheckoutUpdate,
    responses(
        (status = 200, description = "Record after the update", body = crate::model::attendance::AttendanceRecord),
        (status = 404, description = "Unknown id", body = Object, example = json!({
            "message": "Student not found"
        })),
        (status = 500, description = "Store failure")
    ),
    tag = "Attendance"
)]
pub async fn update_student(
    store: web::Data<dyn RecordStore>,
    path: web::Path<u64>,
    payload: Option<web::Json<CheckoutUpdate>>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    // a missing or unreadable body is a no-op, like an absent checkout
    let payload = payload.map(web::Json::into_inner).unwrap_or_default();

    let record = match payload.value() {
        Some(checkout) => {
            let record = store.set_checkout(id, checkout).await?;
            if record.is_some() {
                info!(id, checkout, "Checked out");
            }
            record
        }
        None => store.get_attendance(id).await?,
    };

    record
        .map(|r| HttpResponse::Ok().json(r))
        .ok_or_else(|| ApiError::not_found("Student not found"))
}
