use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};

use crate::model::attendance::{AttendanceDayRow, DayStatus, OverrideStatus};

/// Everything the derivation is allowed to know about "now". Injected by the
/// caller; the engine itself never reads the ambient clock.
#[derive(Debug, Clone, Copy)]
pub struct DerivationContext {
    pub today: NaiveDate,
    pub cutoff: NaiveTime,
}

/// Fixed precedence, first match wins:
/// override > future date > Sunday > missing check-in > present.
pub fn derive_status(row: &AttendanceDayRow, ctx: &DerivationContext) -> DayStatus {
    if let Some(ov) = row.override_status() {
        return match ov {
            OverrideStatus::Offday => DayStatus::Offday,
            OverrideStatus::Mc => DayStatus::Mc,
        };
    }
    if row.day > ctx.today {
        return DayStatus::Pending;
    }
    if row.day.weekday() == Weekday::Sun {
        return DayStatus::Offday;
    }
    if normalized_time(row.check_in_local.as_deref()).is_none() {
        return DayStatus::Absent;
    }
    DayStatus::Present
}

/// Effective lateness for one day. Only Present days carry a value; stray
/// `late_minutes` on other statuses is ignored. Prefers the precomputed
/// field, falling back to the check-in time against the cutoff.
pub fn effective_late_minutes(
    row: &AttendanceDayRow,
    status: DayStatus,
    ctx: &DerivationContext,
) -> Option<i64> {
    if status != DayStatus::Present {
        return None;
    }
    if let Some(m) = row.late_minutes {
        return Some(m.max(0));
    }
    let check_in = parse_local_time(row.check_in_local.as_deref()?)?;
    let late = minutes_of(check_in) - minutes_of(ctx.cutoff);
    Some(late.max(0))
}

fn minutes_of(t: NaiveTime) -> i64 {
    i64::from(t.hour()) * 60 + i64::from(t.minute())
}

/// "HH:MM" as written by check-in, tolerating a seconds component.
/// Unparseable input degrades to no lateness data, never an error.
fn parse_local_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

fn normalized_time(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> DerivationContext {
        DerivationContext {
            today: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            cutoff: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        }
    }

    fn row(day: (i32, u32, u32), check_in: Option<&str>) -> AttendanceDayRow {
        AttendanceDayRow {
            staff_email: "a@company.my".into(),
            staff_name: Some("A".into()),
            day: NaiveDate::from_ymd_opt(day.0, day.1, day.2).unwrap(),
            check_in_local: check_in.map(Into::into),
            check_out_local: None,
            late_minutes: None,
            status_override: None,
        }
    }

    #[test]
    fn override_beats_sunday_and_missing_check_in() {
        // 2024-03-10 is a Sunday
        let mut r = row((2024, 3, 10), None);
        r.status_override = Some("MC".into());
        assert_eq!(derive_status(&r, &ctx()), DayStatus::Mc);
    }

    #[test]
    fn override_beats_future_date() {
        let mut r = row((2024, 3, 25), None);
        r.status_override = Some("OFFDAY".into());
        assert_eq!(derive_status(&r, &ctx()), DayStatus::Offday);
    }

    #[test]
    fn future_day_is_pending_even_on_sunday() {
        // 2024-03-17 is a Sunday after "today"
        let r = row((2024, 3, 17), None);
        assert_eq!(derive_status(&r, &ctx()), DayStatus::Pending);
    }

    #[test]
    fn sunday_without_override_is_offday() {
        let r = row((2024, 3, 10), None);
        assert_eq!(derive_status(&r, &ctx()), DayStatus::Offday);
    }

    #[test]
    fn missing_check_in_is_absent() {
        let r = row((2024, 3, 11), None);
        assert_eq!(derive_status(&r, &ctx()), DayStatus::Absent);

        let blank = row((2024, 3, 11), Some("  "));
        assert_eq!(derive_status(&blank, &ctx()), DayStatus::Absent);
    }

    #[test]
    fn checked_in_weekday_is_present() {
        let r = row((2024, 3, 11), Some("08:58"));
        assert_eq!(derive_status(&r, &ctx()), DayStatus::Present);
    }

    #[test]
    fn unknown_override_string_is_ignored() {
        let mut r = row((2024, 3, 11), Some("09:00"));
        r.status_override = Some("HOLIDAY".into());
        assert_eq!(derive_status(&r, &ctx()), DayStatus::Present);
    }

    #[test]
    fn fallback_lateness_from_check_in() {
        let r = row((2024, 3, 11), Some("09:45"));
        assert_eq!(
            effective_late_minutes(&r, DayStatus::Present, &ctx()),
            Some(15)
        );
    }

    #[test]
    fn early_check_in_clamps_to_zero() {
        let r = row((2024, 3, 11), Some("09:00"));
        assert_eq!(
            effective_late_minutes(&r, DayStatus::Present, &ctx()),
            Some(0)
        );
    }

    #[test]
    fn precomputed_late_minutes_wins_over_fallback() {
        let mut r = row((2024, 3, 11), Some("09:45"));
        r.late_minutes = Some(7);
        assert_eq!(
            effective_late_minutes(&r, DayStatus::Present, &ctx()),
            Some(7)
        );
    }

    #[test]
    fn negative_precomputed_late_minutes_clamps_to_zero() {
        let mut r = row((2024, 3, 11), Some("09:00"));
        r.late_minutes = Some(-30);
        assert_eq!(
            effective_late_minutes(&r, DayStatus::Present, &ctx()),
            Some(0)
        );
    }

    #[test]
    fn non_present_days_carry_no_lateness() {
        let mut r = row((2024, 3, 10), None);
        r.late_minutes = Some(99);
        assert_eq!(effective_late_minutes(&r, DayStatus::Offday, &ctx()), None);
        assert_eq!(effective_late_minutes(&r, DayStatus::Absent, &ctx()), None);
        assert_eq!(effective_late_minutes(&r, DayStatus::Pending, &ctx()), None);
        assert_eq!(effective_late_minutes(&r, DayStatus::Mc, &ctx()), None);
    }

    #[test]
    fn unparseable_check_in_degrades_to_none() {
        let r = row((2024, 3, 11), Some("9.45 am"));
        assert_eq!(effective_late_minutes(&r, DayStatus::Present, &ctx()), None);
    }

    #[test]
    fn seconds_component_is_tolerated() {
        let r = row((2024, 3, 11), Some("09:45:30"));
        assert_eq!(
            effective_late_minutes(&r, DayStatus::Present, &ctx()),
            Some(15)
        );
    }
}
