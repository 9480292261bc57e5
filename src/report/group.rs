use std::collections::HashMap;

use crate::model::attendance::{AttendanceDayRow, DayStatus};
use crate::model::geo::GeoPoint;
use crate::model::report::{ReportDay, StaffMonthGroup};

use super::merge::geo_key;
use super::status::{DerivationContext, derive_status, effective_late_minutes};

/// Partition day rows by staff, sort each partition chronologically and
/// derive the monthly aggregates shown in the report block headers. Output
/// is ordered by display name, case-insensitive. Pure function of its
/// inputs; calling it twice yields identical output.
pub fn group_by_staff(
    rows: &[AttendanceDayRow],
    geo: &HashMap<String, GeoPoint>,
    roster: &HashMap<String, String>,
    ctx: &DerivationContext,
) -> Vec<StaffMonthGroup> {
    let mut groups: HashMap<String, StaffMonthGroup> = HashMap::new();

    for row in rows {
        let key = row.staff_email.to_lowercase();
        let status = derive_status(row, ctx);
        let late = effective_late_minutes(row, status, ctx);

        let group = groups.entry(key).or_insert_with(|| StaffMonthGroup {
            staff_email: row.staff_email.clone(),
            staff_name: display_name(row, roster),
            rows: Vec::new(),
            late_total_minutes: 0,
            absent_days: 0,
        });

        group.rows.push(ReportDay {
            day: row.day,
            check_in: row.check_in_local.clone(),
            check_out: row.check_out_local.clone(),
            status,
            late_minutes: late,
            geo: geo.get(&geo_key(row.day, &row.staff_email)).copied(),
        });

        if status == DayStatus::Absent {
            group.absent_days += 1;
        }
        if let Some(minutes) = late {
            group.late_total_minutes += minutes;
        }
    }

    let mut out: Vec<StaffMonthGroup> = groups.into_values().collect();
    for group in &mut out {
        group.rows.sort_by_key(|r| r.day);
    }
    out.sort_by(|a, b| {
        a.staff_name
            .to_lowercase()
            .cmp(&b.staff_name.to_lowercase())
            // email as tie-break: name alone is not a total order
            .then_with(|| a.staff_email.cmp(&b.staff_email))
    });
    out
}

/// Roster name, then the name carried on the row, then the email itself.
fn display_name(row: &AttendanceDayRow, roster: &HashMap<String, String>) -> String {
    roster
        .get(&row.staff_email.to_lowercase())
        .cloned()
        .or_else(|| row.staff_name.clone())
        .unwrap_or_else(|| row.staff_email.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, NaiveTime};

    fn ctx() -> DerivationContext {
        DerivationContext {
            today: NaiveDate::from_ymd_opt(2024, 3, 28).unwrap(),
            cutoff: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        }
    }

    fn day_row(
        email: &str,
        name: Option<&str>,
        day: u32,
        check_in: Option<&str>,
        overridden: Option<&str>,
    ) -> AttendanceDayRow {
        AttendanceDayRow {
            staff_email: email.into(),
            staff_name: name.map(Into::into),
            day: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            check_in_local: check_in.map(Into::into),
            check_out_local: None,
            late_minutes: None,
            status_override: overridden.map(Into::into),
        }
    }

    /// March 2024 for one staff member: Sundays 3/10/17/24/31, one MC day,
    /// days past the 28th pending, the rest alternating present/absent.
    fn march_scenario() -> Vec<AttendanceDayRow> {
        let mut rows = Vec::new();
        for day in 1..=31 {
            let sunday = matches!(day, 3 | 10 | 17 | 24 | 31);
            let mc = day == 5;
            let check_in = if sunday || mc || day % 2 == 0 {
                None
            } else {
                Some(if day == 11 { "09:50" } else { "09:10" })
            };
            rows.push(day_row(
                "a@company.my",
                Some("Aina"),
                day,
                check_in,
                mc.then_some("MC"),
            ));
        }
        rows
    }

    #[test]
    fn scenario_totals_count_only_qualifying_days() {
        let rows = march_scenario();
        let groups = group_by_staff(&rows, &HashMap::new(), &HashMap::new(), &ctx());
        assert_eq!(groups.len(), 1);
        let g = &groups[0];

        // Absent: even, non-Sunday, non-future days (2,4,6,8,12,14,16,18,
        // 20,22,26,28) minus none overridden. 10 and 24 are Sundays, 30 is
        // future.
        assert_eq!(g.absent_days, 12);
        // Late: only day 11 checked in past the cutoff (09:50 → 20 min).
        assert_eq!(g.late_total_minutes, 20);
        // Future days 29..31 are pending and count nowhere.
        let pending: Vec<_> = g
            .rows
            .iter()
            .filter(|r| r.status == DayStatus::Pending)
            .map(|r| r.day.day())
            .collect();
        assert_eq!(pending, vec![29, 30, 31]);
    }

    #[test]
    fn grouping_is_idempotent() {
        let rows = march_scenario();
        let geo = HashMap::new();
        let roster = HashMap::new();
        let once = group_by_staff(&rows, &geo, &roster, &ctx());
        let twice = group_by_staff(&rows, &geo, &roster, &ctx());
        assert_eq!(once, twice);
    }

    #[test]
    fn rows_are_sorted_by_day_regardless_of_input_order() {
        let rows = vec![
            day_row("a@company.my", Some("Aina"), 12, Some("09:00"), None),
            day_row("a@company.my", Some("Aina"), 4, Some("09:00"), None),
        ];
        let groups = group_by_staff(&rows, &HashMap::new(), &HashMap::new(), &ctx());
        let days: Vec<u32> = groups[0].rows.iter().map(|r| r.day.day()).collect();
        assert_eq!(days, vec![4, 12]);
    }

    #[test]
    fn ordering_is_stable_for_duplicate_display_names() {
        let rows: Vec<_> = (0..16)
            .map(|i| {
                day_row(
                    &format!("s{i:02}@company.my"),
                    Some("Same Name"),
                    4,
                    Some("09:00"),
                    None,
                )
            })
            .collect();
        let once = group_by_staff(&rows, &HashMap::new(), &HashMap::new(), &ctx());
        let twice = group_by_staff(&rows, &HashMap::new(), &HashMap::new(), &ctx());
        assert_eq!(once, twice);

        let emails: Vec<&str> = once.iter().map(|g| g.staff_email.as_str()).collect();
        let mut sorted = emails.clone();
        sorted.sort();
        assert_eq!(emails, sorted);
    }

    #[test]
    fn groups_sorted_by_name_case_insensitive() {
        let rows = vec![
            day_row("z@company.my", Some("zul"), 4, Some("09:00"), None),
            day_row("b@company.my", Some("Ben"), 4, Some("09:00"), None),
        ];
        let groups = group_by_staff(&rows, &HashMap::new(), &HashMap::new(), &ctx());
        let names: Vec<&str> = groups.iter().map(|g| g.staff_name.as_str()).collect();
        assert_eq!(names, vec!["Ben", "zul"]);
    }

    #[test]
    fn name_falls_back_to_roster_then_row_then_email() {
        let mut roster = HashMap::new();
        roster.insert("a@company.my".to_string(), "Roster Name".to_string());

        let rows = vec![
            day_row("a@company.my", Some("Row Name"), 4, None, None),
            day_row("b@company.my", Some("Row Name B"), 4, None, None),
            day_row("c@company.my", None, 4, None, None),
        ];
        let groups = group_by_staff(&rows, &HashMap::new(), &roster, &ctx());
        let by_email: HashMap<_, _> = groups
            .iter()
            .map(|g| (g.staff_email.as_str(), g.staff_name.as_str()))
            .collect();
        assert_eq!(by_email["a@company.my"], "Roster Name");
        assert_eq!(by_email["b@company.my"], "Row Name B");
        assert_eq!(by_email["c@company.my"], "c@company.my");
    }

    #[test]
    fn geo_is_attached_by_day_and_staff() {
        let mut geo = HashMap::new();
        geo.insert(
            geo_key(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), "a@company.my"),
            GeoPoint {
                lat: Some(3.1),
                lon: Some(101.6),
                distance_m: Some(20.0),
            },
        );
        let rows = vec![
            day_row("a@company.my", Some("Aina"), 4, Some("09:00"), None),
            day_row("a@company.my", Some("Aina"), 5, Some("09:00"), None),
        ];
        let groups = group_by_staff(&rows, &geo, &HashMap::new(), &ctx());
        assert!(groups[0].rows[0].geo.is_some());
        assert!(groups[0].rows[1].geo.is_none());
    }
}
