use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::MySqlPool;

use crate::model::attendance::AttendanceDayRow;
use crate::model::geo::CheckInEvent;
use crate::model::staff::StaffName;

/// Read-only boundary to the attendance backing store. The pipeline is
/// generic over this so the orchestration can be tested against an
/// in-memory fixture.
#[async_trait]
pub trait AttendanceStore {
    /// One candidate row per (staff, day) for the whole month window,
    /// including days with no recorded event.
    async fn month_attendance(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<AttendanceDayRow>>;

    /// Raw check-in events inside the UTC bounds, check-in actions only.
    async fn checkin_events(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CheckInEvent>>;

    /// `{email, name}` pairs for display-name resolution.
    async fn staff_roster(&self) -> Result<Vec<StaffName>>;
}

/// Production store over the MySQL views maintained by the backend.
#[derive(Clone)]
pub struct SqlAttendanceStore {
    pool: MySqlPool,
}

impl SqlAttendanceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for SqlAttendanceStore {
    async fn month_attendance(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<AttendanceDayRow>> {
        let rows = sqlx::query_as::<_, AttendanceDayRow>(
            r#"
            SELECT staff_email, staff_name, day, check_in_local, check_out_local,
                   late_minutes, status_override
            FROM v_month_attendance
            WHERE day BETWEEN ? AND ?
            "#,
        )
        .bind(first)
        .bind(last)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn checkin_events(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CheckInEvent>> {
        let rows = sqlx::query_as::<_, CheckInEvent>(
            r#"
            SELECT staff_email, happened_at, lat, lon, distance_m
            FROM attendance_events
            WHERE action = 'Check-in'
              AND happened_at >= ?
              AND happened_at < ?
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn staff_roster(&self) -> Result<Vec<StaffName>> {
        let rows = sqlx::query_as::<_, StaffName>(r#"SELECT email, name FROM staff"#)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
