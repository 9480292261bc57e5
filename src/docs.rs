use crate::api::attendance::{CheckInRequest, CheckOutRequest, OverrideRequest};
use crate::api::staff::{CreateStaff, StaffListResponse, StaffQuery, UpdateStaff};
use crate::model::attendance::{DayStatus, OverrideStatus};
use crate::model::geo::GeoPoint;
use crate::model::report::{MonthlyReportResponse, PrintReportResponse, ReportDay, StaffMonthGroup};
use crate::model::staff::Staff;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rollcall API",
        version = "1.0.0",
        description = r#"
## Staff Attendance & Monthly Reconciliation

This API powers a staff attendance service with a printable monthly report.

### 🔹 Key Features
- **Attendance Tracking**
  - Daily check-in and check-out, anchored to a fixed civil time zone
  - Optional geolocation captured on check-in for audit display
- **Administrator Overrides**
  - OFFDAY / MC overrides per staff and day, superseding derived status
- **Monthly Reconciliation Report**
  - Per-staff day rows with derived status, lateness and absence totals
  - Print variant paginated into fixed-size staff blocks for A4 layout
- **Staff Roster**
  - Create, update, list, and view staff used for name resolution

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::set_override,

        crate::api::report::monthly_report,
        crate::api::report::print_report,

        crate::api::staff::create_staff,
        crate::api::staff::get_staff,
        crate::api::staff::list_staff,
        crate::api::staff::update_staff,
        crate::api::staff::delete_staff
    ),
    components(
        schemas(
            CheckInRequest,
            CheckOutRequest,
            OverrideRequest,
            DayStatus,
            OverrideStatus,
            GeoPoint,
            ReportDay,
            StaffMonthGroup,
            MonthlyReportResponse,
            PrintReportResponse,
            Staff,
            CreateStaff,
            UpdateStaff,
            StaffQuery,
            StaffListResponse
        )
    ),
    tags(
        (name = "Attendance", description = "Check-in/out and override APIs"),
        (name = "Report", description = "Monthly reconciliation report APIs"),
        (name = "Staff", description = "Staff roster APIs"),
    )
)]
pub struct ApiDoc;
