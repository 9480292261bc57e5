use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::attendance::DayStatus;
use super::geo::GeoPoint;

/// One rendered day inside a staff block: derived status, effective lateness
/// and the merged first-check-in geolocation, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportDay {
    #[schema(example = "2024-03-04", value_type = String, format = "date")]
    pub day: NaiveDate,

    #[schema(example = "09:45", nullable = true)]
    pub check_in: Option<String>,

    #[schema(example = "18:02", nullable = true)]
    pub check_out: Option<String>,

    pub status: DayStatus,

    /// Minutes late past the cutoff; populated only for Present days.
    #[schema(example = 15, nullable = true)]
    pub late_minutes: Option<i64>,

    pub geo: Option<GeoPoint>,
}

/// Per-staff block of a monthly report: chronological day rows plus the
/// monthly aggregates shown in the block header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StaffMonthGroup {
    #[schema(example = "aina@company.my")]
    pub staff_email: String,

    /// Display label; falls back to the email when the roster has no name.
    #[schema(example = "Aina Rahman")]
    pub staff_name: String,

    pub rows: Vec<ReportDay>,

    #[schema(example = 45)]
    pub late_total_minutes: i64,

    #[schema(example = 2)]
    pub absent_days: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyReportResponse {
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 3)]
    pub month: u32,
    pub groups: Vec<StaffMonthGroup>,
}

/// Print layout: fixed-size pages of staff blocks, one page per sheet.
#[derive(Debug, Serialize, ToSchema)]
pub struct PrintReportResponse {
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 3)]
    pub month: u32,
    #[schema(example = 3)]
    pub page_size: usize,
    pub pages: Vec<Vec<StaffMonthGroup>>,
}
