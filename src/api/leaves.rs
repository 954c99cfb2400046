use actix_web::{HttpResponse, web};
use tracing::info;

use crate::error::ApiError;
use crate::model::leave_request::{LeaveEdit, LeaveStatusUpdate, NewLeave};
use crate::store::RecordStore;

const NOT_FOUND: &str = "Leave not found";

/* =========================
Leave requests
========================= */

/// All leave requests, newest first
#[utoipa::path(
    get,
    path = "/api/leaves",
    responses(
        (status = 200, description = "Leave requests", body = [crate::model::leave_request::LeaveRequest]),
        (status = 500, description = "Store failure")
    ),
    tag = "Leave"
)]
pub async fn list_leaves(store: web::Data<dyn RecordStore>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(store.list_leaves().await?))
}

/// Submit a leave request; status starts as Pending
#[utoipa::path(
    post,
    path = "/api/leaves",
    request_body(
        content = NewLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = crate::model::leave_request::LeaveRequest),
        (status = 400, description = "Missing required field", body = Object, example = json!({
            "message": "reason is required"
        })),
        (status = 500, description = "Store failure")
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    store: web::Data<dyn RecordStore>,
    payload: web::Json<NewLeave>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate()?;

    let leave = store.create_leave(payload).await?;
    info!(id = leave.id, name = %leave.name, "Leave request submitted");
    Ok(HttpResponse::Created().json(leave))
}

#[utoipa::path(
    get,
    path = "/api/leaves/{id}",
    params(
        ("id" = u64, Path, description = "Leave request id")
    ),
    responses(
        (status = 200, description = "Leave request found", body = crate::model::leave_request::LeaveRequest),
        (status = 404, description = "Unknown id", body = Object, example = json!({
            "message": "Leave not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    store: web::Data<dyn RecordStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    store
        .get_leave(path.into_inner())
        .await?
        .map(|l| HttpResponse::Ok().json(l))
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// Edit the user-editable fields of a leave request. `status` is rejected here.
#[utoipa::path(
    put,
    path = "/api/leaves/{id}",
    params(
        ("id" = u64, Path, description = "Leave request id")
    ),
    request_body = LeaveEdit,
    responses(
        (status = 200, description = "Leave request after the edit", body = crate::model::leave_request::LeaveRequest),
        (status = 400, description = "Empty edit or unknown field", body = Object, example = json!({
            "message": "No fields provided for update"
        })),
        (status = 404, description = "Unknown id")
    ),
    tag = "Leave"
)]
pub async fn edit_leave(
    store: web::Data<dyn RecordStore>,
    path: web::Path<u64>,
    payload: web::Json<LeaveEdit>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let edit = payload.into_inner();
    edit.validate()?;

    let leave = store
        .edit_leave(id, edit)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!(id, "Leave request edited");
    Ok(HttpResponse::Ok().json(leave))
}

/// Approve, reject or reopen a leave request
#[utoipa::path(
    put,
    path = "/api/leaves/{id}/status",
    params(
        ("id" = u64, Path, description = "Leave request id")
    ),
    request_body = LeaveStatusUpdate,
    responses(
        (status = 200, description = "Leave request with its new status", body = crate::model::leave_request::LeaveRequest),
        (status = 400, description = "Status outside Pending/Approved/Rejected"),
        (status = 404, description = "Unknown id")
    ),
    tag = "Leave"
)]
pub async fn update_leave_status(
    store: web::Data<dyn RecordStore>,
    path: web::Path<u64>,
    payload: web::Json<LeaveStatusUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let status = payload.status;

    let leave = store
        .set_leave_status(id, status)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!(id, %status, "Leave status changed");
    Ok(HttpResponse::Ok().json(leave))
}
