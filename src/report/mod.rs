use std::collections::HashMap;

use anyhow::Result;
use chrono::{Months, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::model::report::StaffMonthGroup;

pub mod group;
pub mod merge;
pub mod paginate;
pub mod status;
pub mod store;

use status::DerivationContext;
use store::AttendanceStore;

/// Per-request inputs of a report run. `today` is resolved once at the edge
/// and injected; nothing below reads the ambient clock.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext {
    pub tz: Tz,
    pub cutoff: NaiveTime,
    pub today: NaiveDate,
}

/// First and last day of the month, or None for an out-of-range year/month.
pub fn month_window(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    if !(1000..=9999).contains(&year) {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first
        .checked_add_months(Months::new(1))?
        .pred_opt()?;
    Some((first, last))
}

/// Fetch, merge and reconcile one month of attendance. Sequential fetches,
/// fresh data per call, no caching and no retries; any upstream failure
/// aborts the whole report.
pub async fn build_monthly_report<S: AttendanceStore + Sync>(
    store: &S,
    first: NaiveDate,
    last: NaiveDate,
    ctx: &ReportContext,
) -> Result<Vec<StaffMonthGroup>> {
    let rows = store.month_attendance(first, last).await?;

    let from_utc = local_midnight_utc(first, ctx.tz)?;
    let next_month = first
        .checked_add_months(Months::new(1))
        .ok_or_else(|| anyhow::anyhow!("month window overflow"))?;
    let to_utc = local_midnight_utc(next_month, ctx.tz)?;
    let events = store.checkin_events(from_utc, to_utc).await?;

    let geo = merge::first_checkin_by_day(events, ctx.tz);

    let roster: HashMap<String, String> = store
        .staff_roster()
        .await?
        .into_iter()
        .filter_map(|s| s.name.map(|n| (s.email.to_lowercase(), n)))
        .collect();

    let derivation = DerivationContext {
        today: ctx.today,
        cutoff: ctx.cutoff,
    };
    Ok(group::group_by_staff(&rows, &geo, &roster, &derivation))
}

fn local_midnight_utc(day: NaiveDate, tz: Tz) -> Result<chrono::DateTime<Utc>> {
    tz.from_local_datetime(&day.and_hms_opt(0, 0, 0).unwrap())
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow::anyhow!("no valid local midnight for {day}"))
}
