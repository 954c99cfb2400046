use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::error::ApiError;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
    EnumIter, ToSchema,
)]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "rollNumber": "E1",
    "name": "Alice",
    "startDate": "2026-01-05",
    "endDate": "2026-01-07",
    "reason": "Family event",
    "status": "Pending",
    "createdAt": "2026-01-01T00:00:00Z",
    "updatedAt": "2026-01-01T00:00:00Z"
}))]
pub struct LeaveRequest {
    pub id: u64,
    pub roll_number: String,
    pub name: String,
    #[schema(format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(format = "date", value_type = String)]
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(format = "date-time", value_type = String)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewLeave {
    #[schema(example = "E1")]
    pub roll_number: String,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-07", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Family event")]
    pub reason: String,
}

impl NewLeave {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.roll_number.trim().is_empty() {
            return Err(ApiError::validation("rollNumber is required"));
        }
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("name is required"));
        }
        if self.reason.trim().is_empty() {
            return Err(ApiError::validation("reason is required"));
        }
        Ok(())
    }
}

/// Edit of the user-editable leave fields. `status` is not one of them and
/// is rejected as an unknown field.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LeaveEdit {
    pub roll_number: Option<String>,
    pub name: Option<String>,
    #[schema(format = "date", value_type = Option<String>)]
    pub start_date: Option<NaiveDate>,
    #[schema(format = "date", value_type = Option<String>)]
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

impl LeaveEdit {
    pub fn is_empty(&self) -> bool {
        self.roll_number.is_none()
            && self.name.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.reason.is_none()
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.is_empty() {
            return Err(ApiError::validation("No fields provided for update"));
        }
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&self.roll_number) || blank(&self.name) || blank(&self.reason) {
            return Err(ApiError::validation("Edited fields must not be blank"));
        }
        Ok(())
    }

    /// Applies the present fields onto `leave`.
    pub fn apply(&self, leave: &mut LeaveRequest) {
        if let Some(v) = &self.roll_number {
            leave.roll_number = v.clone();
        }
        if let Some(v) = &self.name {
            leave.name = v.clone();
        }
        if let Some(v) = self.start_date {
            leave.start_date = v;
        }
        if let Some(v) = self.end_date {
            leave.end_date = v;
        }
        if let Some(v) = &self.reason {
            leave.reason = v.clone();
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LeaveStatusUpdate {
    #[schema(example = "Approved")]
    pub status: LeaveStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_string_forms_agree() {
        assert_eq!(LeaveStatus::default(), LeaveStatus::Pending);
        assert_eq!(LeaveStatus::Approved.to_string(), "Approved");
        assert_eq!(LeaveStatus::from_str("Rejected").unwrap(), LeaveStatus::Rejected);
        assert!(LeaveStatus::from_str("Cancelled").is_err());
        assert_eq!(serde_json::to_value(LeaveStatus::Pending).unwrap(), "Pending");
    }

    #[test]
    fn edit_rejects_status_field() {
        let err = serde_json::from_str::<LeaveEdit>(r#"{"reason":"x","status":"Approved"}"#);
        assert!(err.is_err());

        let edit: LeaveEdit = serde_json::from_str(r#"{"endDate":"2026-02-03"}"#).unwrap();
        assert!(edit.validate().is_ok());
        assert!(LeaveEdit::default().validate().is_err());
    }
}
