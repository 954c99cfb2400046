use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use strum::IntoEnumIterator;
use utoipa::ToSchema;

use crate::model::leave_request::{LeaveRequest, LeaveStatus};

/// Calendar month selected for the monthly report, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("month must look like YYYY-MM, got {s:?}");
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(YearMonth { year, month })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusSlice {
    pub status: LeaveStatus,
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PersonTotal {
    pub name: String,
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekBucket {
    #[schema(format = "date", value_type = String)]
    pub week_start: NaiveDate,
    pub days: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEntry {
    pub name: String,
    pub roll_number: String,
    pub total: u32,
    pub approved: u32,
    pub rejected: u32,
    pub pending: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveReport {
    pub status_distribution: Vec<StatusSlice>,
    pub person_totals: Vec<PersonTotal>,
    pub weekly_trend: Vec<WeekBucket>,
    /// Empty unless a month was selected
    pub monthly_report: Vec<MonthlyEntry>,
}

/// Inclusive day count between the two dates, in either order.
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days().unsigned_abs() + 1;
    u32::try_from(days).unwrap_or(u32::MAX)
}

fn leave_days(leave: &LeaveRequest) -> u32 {
    duration_days(leave.start_date, leave.end_date)
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Leave days per status, listed Pending, Approved, Rejected and only for
/// statuses that occur.
pub fn status_distribution(leaves: &[LeaveRequest]) -> Vec<StatusSlice> {
    LeaveStatus::iter()
        .filter_map(|status| {
            let matching: Vec<&LeaveRequest> = leaves.iter().filter(|l| l.status == status).collect();
            (!matching.is_empty()).then(|| StatusSlice {
                status,
                days: matching.iter().map(|l| leave_days(l)).sum(),
            })
        })
        .collect()
}

pub fn person_totals(leaves: &[LeaveRequest]) -> Vec<PersonTotal> {
    let mut totals: BTreeMap<&str, u32> = BTreeMap::new();
    for leave in leaves {
        *totals.entry(leave.name.as_str()).or_default() += leave_days(leave);
    }
    totals
        .into_iter()
        .map(|(name, days)| PersonTotal {
            name: name.to_string(),
            days,
        })
        .collect()
}

pub fn weekly_trend(leaves: &[LeaveRequest]) -> Vec<WeekBucket> {
    let mut weeks: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for leave in leaves {
        *weeks.entry(week_start(leave.start_date)).or_default() += leave_days(leave);
    }
    weeks
        .into_iter()
        .map(|(week_start, days)| WeekBucket { week_start, days })
        .collect()
}

/// Per-employee leave days for requests starting in `month`, ordered by name.
pub fn monthly_report(leaves: &[LeaveRequest], month: YearMonth) -> Vec<MonthlyEntry> {
    let mut employees: BTreeMap<&str, MonthlyEntry> = BTreeMap::new();
    for leave in leaves.iter().filter(|l| month.contains(l.start_date)) {
        let days = leave_days(leave);
        let entry = employees
            .entry(leave.name.as_str())
            .or_insert_with(|| MonthlyEntry {
                name: leave.name.clone(),
                roll_number: leave.roll_number.clone(),
                ..Default::default()
            });
        entry.total += days;
        match leave.status {
            LeaveStatus::Approved => entry.approved += days,
            LeaveStatus::Rejected => entry.rejected += days,
            LeaveStatus::Pending => entry.pending += days,
        }
    }
    employees.into_values().collect()
}

pub fn report(leaves: &[LeaveRequest], month: Option<YearMonth>) -> LeaveReport {
    LeaveReport {
        status_distribution: status_distribution(leaves),
        person_totals: person_totals(leaves),
        weekly_trend: weekly_trend(leaves),
        monthly_report: month.map(|m| monthly_report(leaves, m)).unwrap_or_default(),
    }
}
