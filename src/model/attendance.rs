use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

/// One attendance session. `checkin`/`checkout` hold locale 12-hour times,
/// empty when not yet recorded.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "rollNumber": "E1",
    "name": "Alice",
    "checkin": "9:15:00 AM",
    "checkout": "",
    "profileImage": "",
    "createdAt": "2026-01-01T09:15:00Z",
    "updatedAt": "2026-01-01T09:15:00Z"
}))]
pub struct AttendanceRecord {
    pub id: u64,
    pub roll_number: String,
    pub name: String,
    pub checkin: String,
    pub checkout: String,
    pub profile_image: String,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(format = "date-time", value_type = String)]
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn is_checked_in(&self) -> bool {
        !self.checkin.is_empty()
    }

    pub fn is_checked_out(&self) -> bool {
        !self.checkout.is_empty()
    }
}

/// Check-in payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendance {
    #[schema(example = "E1")]
    pub roll_number: String,
    #[schema(example = "Alice")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "9:15:00 AM")]
    pub checkin: String,
    #[serde(default)]
    #[schema(example = "")]
    pub checkout: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl NewAttendance {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.roll_number.trim().is_empty() {
            return Err(ApiError::validation("rollNumber is required"));
        }
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("name is required"));
        }
        Ok(())
    }
}

/// Check-out payload; any other field sent along is ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CheckoutUpdate {
    #[schema(example = "5:00:00 PM")]
    pub checkout: Option<String>,
}

impl CheckoutUpdate {
    /// The value to store, if the request carries a non-empty one.
    pub fn value(&self) -> Option<&str> {
        self.checkout.as_deref().filter(|c| !c.is_empty())
    }
}
