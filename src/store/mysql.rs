use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, MySqlPool};

use super::RecordStore;
use crate::model::attendance::{AttendanceRecord, NewAttendance};
use crate::model::leave_request::{LeaveEdit, LeaveRequest, LeaveStatus, NewLeave};

const ATTENDANCE_COLUMNS: &str =
    "id, roll_number, name, checkin, checkout, profile_image, created_at, updated_at";
const LEAVE_COLUMNS: &str =
    "id, roll_number, name, start_date, end_date, reason, status, created_at, updated_at";

#[derive(FromRow)]
struct LeaveRow {
    id: u64,
    roll_number: String,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LeaveRow> for LeaveRequest {
    type Error = anyhow::Error;

    fn try_from(row: LeaveRow) -> anyhow::Result<Self> {
        let status = row
            .status
            .parse::<LeaveStatus>()
            .with_context(|| format!("leave {} has unknown status {:?}", row.id, row.status))?;
        Ok(LeaveRequest {
            id: row.id,
            roll_number: row.roll_number,
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            reason: row.reason,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// MySQL-backed store
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for MySqlStore {
    fn backend_tag(&self) -> &'static str {
        "mysql"
    }

    async fn create_attendance(&self, new: NewAttendance) -> anyhow::Result<AttendanceRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance_records (roll_number, name, checkin, checkout, profile_image)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.roll_number)
        .bind(&new.name)
        .bind(&new.checkin)
        .bind(&new.checkout)
        .bind(new.profile_image.as_deref().unwrap_or_default())
        .execute(&self.pool)
        .await
        .context("failed to insert attendance record")?;

        self.get_attendance(result.last_insert_id())
            .await?
            .context("inserted attendance record vanished")
    }

    async fn list_attendance(&self) -> anyhow::Result<Vec<AttendanceRecord>> {
        let sql = format!("SELECT {ATTENDANCE_COLUMNS} FROM attendance_records ORDER BY id");
        sqlx::query_as::<_, AttendanceRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to list attendance records")
    }

    async fn get_attendance(&self, id: u64) -> anyhow::Result<Option<AttendanceRecord>> {
        let sql = format!("SELECT {ATTENDANCE_COLUMNS} FROM attendance_records WHERE id = ?");
        sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("failed to fetch attendance record")
    }

    async fn set_checkout(
        &self,
        id: u64,
        checkout: &str,
    ) -> anyhow::Result<Option<AttendanceRecord>> {
        sqlx::query("UPDATE attendance_records SET checkout = ? WHERE id = ?")
            .bind(checkout)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to update checkout")?;

        // rows_affected is 0 for an unchanged value, so existence is decided by re-reading
        self.get_attendance(id).await
    }

    async fn create_leave(&self, new: NewLeave) -> anyhow::Result<LeaveRequest> {
        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests (roll_number, name, start_date, end_date, reason, status)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.roll_number)
        .bind(&new.name)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(&new.reason)
        .bind(LeaveStatus::Pending.to_string())
        .execute(&self.pool)
        .await
        .context("failed to insert leave request")?;

        self.get_leave(result.last_insert_id())
            .await?
            .context("inserted leave request vanished")
    }

    async fn list_leaves(&self) -> anyhow::Result<Vec<LeaveRequest>> {
        let sql = format!("SELECT {LEAVE_COLUMNS} FROM leave_requests ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, LeaveRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to list leave requests")?
            .into_iter()
            .map(LeaveRequest::try_from)
            .collect()
    }

    async fn get_leave(&self, id: u64) -> anyhow::Result<Option<LeaveRequest>> {
        let sql = format!("SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE id = ?");
        sqlx::query_as::<_, LeaveRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("failed to fetch leave request")?
            .map(LeaveRequest::try_from)
            .transpose()
    }

    async fn edit_leave(&self, id: u64, edit: LeaveEdit) -> anyhow::Result<Option<LeaveRequest>> {
        let Some(mut leave) = self.get_leave(id).await? else {
            return Ok(None);
        };
        edit.apply(&mut leave);

        sqlx::query(
            r#"
            UPDATE leave_requests
            SET roll_number = ?, name = ?, start_date = ?, end_date = ?, reason = ?
            WHERE id = ?
            "#,
        )
        .bind(&leave.roll_number)
        .bind(&leave.name)
        .bind(leave.start_date)
        .bind(leave.end_date)
        .bind(&leave.reason)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("failed to edit leave request")?;

        self.get_leave(id).await
    }

    async fn set_leave_status(
        &self,
        id: u64,
        status: LeaveStatus,
    ) -> anyhow::Result<Option<LeaveRequest>> {
        sqlx::query("UPDATE leave_requests SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to update leave status")?;

        self.get_leave(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> LeaveRow {
        LeaveRow {
            id: 7,
            roll_number: "E1".to_string(),
            name: "Alice".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            reason: "Trip".to_string(),
            status: status.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn status_column_maps_onto_enum() {
        let leave = LeaveRequest::try_from(row("Approved")).unwrap();
        assert_eq!(leave.status, LeaveStatus::Approved);
        assert_eq!(leave.id, 7);
    }

    #[test]
    fn unknown_status_is_an_error() {
        let err = LeaveRequest::try_from(row("Cancelled")).unwrap_err();
        assert!(err.to_string().contains("leave 7 has unknown status \"Cancelled\""));
    }
}
