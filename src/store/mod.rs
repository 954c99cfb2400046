use async_trait::async_trait;

use crate::model::attendance::{AttendanceRecord, NewAttendance};
use crate::model::leave_request::{LeaveEdit, LeaveRequest, LeaveStatus, NewLeave};

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Persistence for attendance records and leave requests.
///
/// Lookups by id return `Ok(None)` when the id is unknown; `Err` is reserved
/// for backend failures.
#[async_trait]
pub trait RecordStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    async fn create_attendance(&self, new: NewAttendance) -> anyhow::Result<AttendanceRecord>;

    /// Every record, in insertion order.
    async fn list_attendance(&self) -> anyhow::Result<Vec<AttendanceRecord>>;

    async fn get_attendance(&self, id: u64) -> anyhow::Result<Option<AttendanceRecord>>;

    async fn set_checkout(&self, id: u64, checkout: &str)
    -> anyhow::Result<Option<AttendanceRecord>>;

    async fn create_leave(&self, new: NewLeave) -> anyhow::Result<LeaveRequest>;

    /// Every leave request, newest first.
    async fn list_leaves(&self) -> anyhow::Result<Vec<LeaveRequest>>;

    async fn get_leave(&self, id: u64) -> anyhow::Result<Option<LeaveRequest>>;

    async fn edit_leave(&self, id: u64, edit: LeaveEdit) -> anyhow::Result<Option<LeaveRequest>>;

    async fn set_leave_status(
        &self,
        id: u64,
        status: LeaveStatus,
    ) -> anyhow::Result<Option<LeaveRequest>>;
}
