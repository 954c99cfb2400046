use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use strum_macros::Display;
use utoipa::ToSchema;

use super::clock;
use super::percentage;
use crate::model::attendance::AttendanceRecord;

const HEATMAP_FIRST_HOUR: u32 = 6;
const HEATMAP_LAST_HOUR: u32 = 18;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_students: usize,
    pub present_today: usize,
    pub checked_out: usize,
    pub late_arrivals: usize,
    #[schema(example = 66.7)]
    pub attendance_rate: f64,
    pub absent_today: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, ToSchema)]
pub enum AttendanceStatus {
    Complete,
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn of(record: &AttendanceRecord) -> Self {
        if record.is_checked_out() {
            AttendanceStatus::Complete
        } else if record.is_checked_in() {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Absent
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub id: u64,
    pub name: String,
    pub roll_number: String,
    pub attendance_percentage: u32,
    pub checkin: String,
    pub checkout: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LateArrival {
    pub id: u64,
    pub name: String,
    pub roll_number: String,
    pub checkin: String,
    pub minutes_late: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LateArrivalReport {
    /// Records with a check-in
    pub total: usize,
    pub on_time: usize,
    pub late: usize,
    pub on_time_percentage: f64,
    pub late_percentage: f64,
    pub late_arrivals: Vec<LateArrival>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    #[schema(format = "date", value_type = String)]
    pub date: NaiveDate,
    pub present: usize,
    pub absent: usize,
    pub total: usize,
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HourBucket {
    pub hour: u32,
    pub count: usize,
    #[schema(example = "9:00")]
    pub label: String,
}

pub fn summary(records: &[AttendanceRecord]) -> Summary {
    let total = records.len();
    let present = records.iter().filter(|r| r.is_checked_in()).count();
    let checked_out = records.iter().filter(|r| r.is_checked_out()).count();
    let late = records.iter().filter(|r| clock::is_late(&r.checkin)).count();

    Summary {
        total_students: total,
        present_today: present,
        checked_out,
        late_arrivals: late,
        attendance_rate: percentage(present, total),
        absent_today: total - present,
    }
}

/// Per-record status, completed sessions first. Ties keep store order.
pub fn performance(records: &[AttendanceRecord]) -> Vec<Performance> {
    let mut rows: Vec<Performance> = records
        .iter()
        .map(|r| {
            let status = AttendanceStatus::of(r);
            Performance {
                id: r.id,
                name: r.name.clone(),
                roll_number: r.roll_number.clone(),
                attendance_percentage: if status == AttendanceStatus::Complete { 100 } else { 0 },
                checkin: r.checkin.clone(),
                checkout: r.checkout.clone(),
                status,
            }
        })
        .collect();

    // sort_by is stable
    rows.sort_by(|a, b| b.attendance_percentage.cmp(&a.attendance_percentage));
    rows
}

pub fn late_arrivals(records: &[AttendanceRecord]) -> LateArrivalReport {
    let present: Vec<&AttendanceRecord> = records.iter().filter(|r| r.is_checked_in()).collect();

    let late_arrivals: Vec<LateArrival> = present
        .iter()
        .filter_map(|r| {
            clock::minutes_late(&r.checkin).map(|minutes_late| LateArrival {
                id: r.id,
                name: r.name.clone(),
                roll_number: r.roll_number.clone(),
                checkin: r.checkin.clone(),
                minutes_late,
            })
        })
        .collect();

    let total = present.len();
    let late = late_arrivals.len();
    let on_time = total - late;

    LateArrivalReport {
        total,
        on_time,
        late,
        on_time_percentage: percentage(on_time, total),
        late_percentage: percentage(late, total),
        late_arrivals,
    }
}

/// Attendance per calendar day of record creation (UTC), oldest first.
pub fn trends(records: &[AttendanceRecord]) -> Vec<TrendPoint> {
    let mut days: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for r in records {
        let (present, total) = days.entry(r.created_at.date_naive()).or_default();
        *total += 1;
        if r.is_checked_in() {
            *present += 1;
        }
    }

    days.into_iter()
        .map(|(date, (present, total))| TrendPoint {
            date,
            present,
            absent: total - present,
            total,
            attendance_rate: percentage(present, total),
        })
        .collect()
}

/// Check-ins per hour of day, limited to 6:00 through 18:00.
pub fn heatmap(records: &[AttendanceRecord]) -> Vec<HourBucket> {
    let mut counts = [0usize; 24];
    for minutes in records.iter().filter_map(|r| clock::to_minutes(&r.checkin)) {
        counts[(minutes / 60) as usize] += 1;
    }

    (HEATMAP_FIRST_HOUR..=HEATMAP_LAST_HOUR)
        .map(|hour| HourBucket {
            hour,
            count: counts[hour as usize],
            label: format!("{hour}:00"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: u64, checkin: &str, checkout: &str) -> AttendanceRecord {
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
        AttendanceRecord {
            id,
            roll_number: format!("E{id}"),
            name: format!("Employee {id}"),
            checkin: checkin.to_string(),
            checkout: checkout.to_string(),
            profile_image: String::new(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn summary_of_nothing_has_zero_rate() {
        let s = summary(&[]);
        assert_eq!(s.total_students, 0);
        assert_eq!(s.attendance_rate, 0.0);
    }

    #[test]
    fn summary_counts_and_rounds() {
        let records = [
            record(1, "8:55:00 AM", "5:00:00 PM"),
            record(2, "9:15:00 AM", ""),
            record(3, "", ""),
        ];
        let s = summary(&records);
        assert_eq!(s.total_students, 3);
        assert_eq!(s.present_today, 2);
        assert_eq!(s.checked_out, 1);
        assert_eq!(s.late_arrivals, 1);
        assert_eq!(s.absent_today, 1);
        assert_eq!(s.attendance_rate, 66.7);
    }

    #[test]
    fn performance_classifies_and_sorts_stably() {
        let records = [
            record(1, "9:00 AM", ""),
            record(2, "", ""),
            record(3, "8:30 AM", "4:00 PM"),
            record(4, "8:45 AM", "6:00 PM"),
        ];
        let rows = performance(&records);

        let order: Vec<(u64, AttendanceStatus)> = rows.iter().map(|p| (p.id, p.status)).collect();
        assert_eq!(
            order,
            [
                (3, AttendanceStatus::Complete),
                (4, AttendanceStatus::Complete),
                (1, AttendanceStatus::Present),
                (2, AttendanceStatus::Absent),
            ]
        );
        assert_eq!(rows[0].attendance_percentage, 100);
        assert_eq!(rows[2].attendance_percentage, 0);
    }

    #[test]
    fn late_report_skips_absent_records() {
        let records = [
            record(1, "9:00:00 AM", ""),
            record(2, "9:01:00 AM", ""),
            record(3, "10:30:00 AM", ""),
            record(4, "", ""),
        ];
        let report = late_arrivals(&records);
        assert_eq!(report.total, 3);
        assert_eq!(report.on_time, 1);
        assert_eq!(report.late, 2);
        assert_eq!(report.late_percentage, 66.7);
        assert_eq!(report.on_time_percentage, 33.3);

        let minutes: Vec<u32> = report.late_arrivals.iter().map(|l| l.minutes_late).collect();
        assert_eq!(minutes, [1, 90]);
    }

    #[test]
    fn unparsable_checkin_counts_as_on_time() {
        let report = late_arrivals(&[record(1, "sometime", "")]);
        assert_eq!((report.total, report.on_time, report.late), (1, 1, 0));
    }

    #[test]
    fn trends_group_by_creation_day() {
        let mut earlier = record(1, "", "");
        earlier.created_at = Utc.with_ymd_and_hms(2026, 3, 1, 23, 0, 0).unwrap();
        let records = [record(2, "9:00 AM", ""), earlier, record(3, "", "")];

        let points = trends(&records);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!((points[0].present, points[0].total), (0, 1));
        assert_eq!((points[1].present, points[1].absent), (1, 1));
        assert_eq!(points[1].attendance_rate, 50.0);
    }

    #[test]
    fn heatmap_keeps_working_hours_only() {
        let records = [
            record(1, "5:59 AM", ""),
            record(2, "6:00 AM", ""),
            record(3, "9:15:00 AM", ""),
            record(4, "9:45:00 AM", ""),
            record(5, "6:59 PM", ""),
            record(6, "7:00 PM", ""),
            record(7, "", ""),
        ];
        let buckets = heatmap(&records);
        assert_eq!(buckets.len(), 13);
        assert_eq!(buckets.first().unwrap().hour, 6);
        assert_eq!(buckets.last().unwrap().hour, 18);

        let count = |hour: u32| buckets.iter().find(|b| b.hour == hour).unwrap().count;
        assert_eq!(count(6), 1);
        assert_eq!(count(9), 2);
        assert_eq!(count(18), 1);
        assert_eq!(buckets[3].label, "9:00");
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 4);
    }
}
