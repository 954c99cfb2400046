use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::RecordStore;
use crate::model::attendance::{AttendanceRecord, NewAttendance};
use crate::model::leave_request::{LeaveEdit, LeaveRequest, LeaveStatus, NewLeave};

#[derive(Default)]
struct Collections {
    attendance: Vec<AttendanceRecord>,
    leaves: Vec<LeaveRequest>,
    next_id: u64,
}

impl Collections {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn create_attendance(&self, new: NewAttendance) -> anyhow::Result<AttendanceRecord> {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();
        let record = AttendanceRecord {
            id: inner.next_id(),
            roll_number: new.roll_number,
            name: new.name,
            checkin: new.checkin,
            checkout: new.checkout,
            profile_image: new.profile_image.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        inner.attendance.push(record.clone());
        Ok(record)
    }

    async fn list_attendance(&self) -> anyhow::Result<Vec<AttendanceRecord>> {
        Ok(self.inner.lock().await.attendance.clone())
    }

    async fn get_attendance(&self, id: u64) -> anyhow::Result<Option<AttendanceRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner.attendance.iter().find(|r| r.id == id).cloned())
    }

    async fn set_checkout(
        &self,
        id: u64,
        checkout: &str,
    ) -> anyhow::Result<Option<AttendanceRecord>> {
        let mut inner = self.inner.lock().await;
        Ok(inner.attendance.iter_mut().find(|r| r.id == id).map(|r| {
            r.checkout = checkout.to_string();
            r.updated_at = Utc::now();
            r.clone()
        }))
    }

    async fn create_leave(&self, new: NewLeave) -> anyhow::Result<LeaveRequest> {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();
        let leave = LeaveRequest {
            id: inner.next_id(),
            roll_number: new.roll_number,
            name: new.name,
            start_date: new.start_date,
            end_date: new.end_date,
            reason: new.reason,
            status: LeaveStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        inner.leaves.push(leave.clone());
        Ok(leave)
    }

    async fn list_leaves(&self) -> anyhow::Result<Vec<LeaveRequest>> {
        let inner = self.inner.lock().await;
        // ids grow with insertion, so reversing gives newest first
        Ok(inner.leaves.iter().rev().cloned().collect())
    }

    async fn get_leave(&self, id: u64) -> anyhow::Result<Option<LeaveRequest>> {
        let inner = self.inner.lock().await;
        Ok(inner.leaves.iter().find(|l| l.id == id).cloned())
    }

    async fn edit_leave(&self, id: u64, edit: LeaveEdit) -> anyhow::Result<Option<LeaveRequest>> {
        let mut inner = self.inner.lock().await;
        Ok(inner.leaves.iter_mut().find(|l| l.id == id).map(|l| {
            edit.apply(l);
            l.updated_at = Utc::now();
            l.clone()
        }))
    }

    async fn set_leave_status(
        &self,
        id: u64,
        status: LeaveStatus,
    ) -> anyhow::Result<Option<LeaveRequest>> {
        let mut inner = self.inner.lock().await;
        Ok(inner.leaves.iter_mut().find(|l| l.id == id).map(|l| {
            l.status = status;
            l.updated_at = Utc::now();
            l.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn check_in(roll: &str, checkin: &str) -> NewAttendance {
        NewAttendance {
            roll_number: roll.to_string(),
            name: format!("Employee {roll}"),
            checkin: checkin.to_string(),
            checkout: String::new(),
            profile_image: None,
        }
    }

    fn leave(name: &str) -> NewLeave {
        NewLeave {
            roll_number: "E1".to_string(),
            name: name.to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(),
            reason: "Trip".to_string(),
        }
    }

    #[actix_web::test]
    async fn attendance_keeps_insertion_order_and_updates_checkout() {
        let store = MemoryStore::new();
        let first = store.create_attendance(check_in("E1", "9:00 AM")).await.unwrap();
        store.create_attendance(check_in("E2", "9:30 AM")).await.unwrap();

        let all = store.list_attendance().await.unwrap();
        assert_eq!(all.iter().map(|r| r.roll_number.as_str()).collect::<Vec<_>>(), ["E1", "E2"]);
        assert_eq!(all[0].profile_image, "");

        let updated = store.set_checkout(first.id, "5:00 PM").await.unwrap().unwrap();
        assert_eq!(updated.checkout, "5:00 PM");
        assert!(updated.updated_at >= first.updated_at);
        assert!(store.set_checkout(999, "5:00 PM").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn leaves_list_newest_first() {
        let store = MemoryStore::new();
        store.create_leave(leave("Alice")).await.unwrap();
        let bob = store.create_leave(leave("Bob")).await.unwrap();
        assert_eq!(bob.status, LeaveStatus::Pending);

        let names: Vec<_> = store.list_leaves().await.unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, ["Bob", "Alice"]);

        let approved = store
            .set_leave_status(bob.id, LeaveStatus::Approved)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);

        let edit = LeaveEdit {
            reason: Some("Conference".to_string()),
            ..Default::default()
        };
        let edited = store.edit_leave(bob.id, edit).await.unwrap().unwrap();
        assert_eq!(edited.reason, "Conference");
        assert_eq!(edited.status, LeaveStatus::Approved);
    }
}
