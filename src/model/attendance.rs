use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Administrator-entered status for a staff/day. Supersedes every derived
/// status, including weekends and future dates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum OverrideStatus {
    #[strum(serialize = "OFFDAY")]
    #[serde(rename = "OFFDAY")]
    Offday,
    #[strum(serialize = "MC")]
    #[serde(rename = "MC")]
    Mc,
}

/// Derived display status of one staff/day. Pending marks days still in the
/// future; the UI renders it as a dash.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum DayStatus {
    Present,
    Absent,
    Offday,
    #[strum(serialize = "MC")]
    #[serde(rename = "MC")]
    Mc,
    Pending,
}

/// One (staff, calendar day) row as returned by the month attendance view.
/// Wall-clock fields arrive as local "HH:MM" strings; `late_minutes` may be
/// precomputed upstream. `status_override` is the raw stored value.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceDayRow {
    pub staff_email: String,
    pub staff_name: Option<String>,
    pub day: NaiveDate,
    pub check_in_local: Option<String>,
    pub check_out_local: Option<String>,
    pub late_minutes: Option<i64>,
    pub status_override: Option<String>,
}

impl AttendanceDayRow {
    /// Unknown override strings are treated as no override rather than an
    /// error, matching the tolerance for other malformed row fields.
    pub fn override_status(&self) -> Option<OverrideStatus> {
        self.status_override
            .as_deref()
            .and_then(|s| OverrideStatus::from_str(s).ok())
    }
}
