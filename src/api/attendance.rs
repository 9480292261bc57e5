use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::config::Config;
use crate::model::attendance::OverrideStatus;
use crate::utils::roster_cache;

#[derive(Deserialize, ToSchema)]
pub struct CheckInRequest {
    #[schema(example = "aina@company.my", format = "email")]
    pub staff_email: String,

    #[schema(example = 3.139, nullable = true)]
    pub lat: Option<f64>,

    #[schema(example = 101.6869, nullable = true)]
    pub lon: Option<f64>,

    #[schema(example = 42.5, nullable = true)]
    pub distance_m: Option<f64>,
}

#[derive(Debug, PartialEq)]
enum CheckInOutcome {
    Recorded,
    AlreadyCheckedIn,
}

/// MySQL reports the upsert result through the affected-row count: 1 for a
/// fresh row, 2 when an existing row (a pre-saved override) gained its
/// check-in time, 0 when `check_in_local` was already set and kept.
fn check_in_outcome(rows_affected: u64) -> CheckInOutcome {
    if rows_affected == 0 {
        CheckInOutcome::AlreadyCheckedIn
    } else {
        CheckInOutcome::Recorded
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CheckOutRequest {
    #[schema(example = "aina@company.my", format = "email")]
    pub staff_email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct OverrideRequest {
    #[schema(example = "aina@company.my", format = "email")]
    pub staff_email: String,

    #[schema(example = "2024-03-05", value_type = String, format = "date")]
    pub day: NaiveDate,

    /// OFFDAY or MC; null clears an existing override.
    #[schema(nullable = true)]
    pub status_override: Option<OverrideStatus>,
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-in",
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "message": "Checked in successfully"
        })),
        (status = 400, description = "Already checked in today", body = Object, example = json!({
            "message": "Already checked in today"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<CheckInRequest>,
) -> actix_web::Result<impl Responder> {
    let now_utc = Utc::now();
    let now_local = now_utc.with_timezone(&config.report_tz);
    let day = now_local.date_naive();
    let wall_clock = now_local.format("%H:%M").to_string();

    // An override saved for today (OFFDAY/MC) already owns the (staff, day)
    // row; the check-in must land on it instead of colliding with it.
    let result = sqlx::query(
        r#"
        INSERT INTO attendance (staff_email, day, check_in_local)
        VALUES (?, ?, ?)
        ON DUPLICATE KEY UPDATE
            check_in_local = COALESCE(check_in_local, VALUES(check_in_local))
        "#,
    )
    .bind(&payload.staff_email)
    .bind(day)
    .bind(&wall_clock)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(res) => {
            if check_in_outcome(res.rows_affected()) == CheckInOutcome::AlreadyCheckedIn {
                return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                    "message": "Already checked in today"
                })));
            }
            // Audit trail only; a failed event row must not undo the check-in
            let event = sqlx::query(
                r#"
                INSERT INTO attendance_events
                (staff_email, action, happened_at, lat, lon, distance_m)
                VALUES (?, 'Check-in', ?, ?, ?, ?)
                "#,
            )
            .bind(&payload.staff_email)
            .bind(now_utc)
            .bind(payload.lat)
            .bind(payload.lon)
            .bind(payload.distance_m)
            .execute(pool.get_ref())
            .await;
            if let Err(e) = event {
                tracing::warn!(error = %e, staff_email = %payload.staff_email, "Check-in event row failed");
            }

            let staff = roster_cache::resolve_name(pool.get_ref(), &payload.staff_email)
                .await
                .unwrap_or_else(|| payload.staff_email.clone());

            Ok(HttpResponse::Ok().json(serde_json::json!({
                "message": "Checked in successfully",
                "staff": staff,
                "check_in": wall_clock
            })))
        }

        Err(e) => {
            tracing::error!(error = %e, staff_email = %payload.staff_email, "Check-in failed");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

/// Check-out endpoint
#[utoipa::path(
    put,
    path = "/api/v1/attendance/check-out",
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Checked out successfully", body = Object, example = json!({
            "message": "Checked out successfully"
        })),
        (status = 400, description = "No active check-in found for today", body = Object, example = json!({
            "message": "No active check-in found for today"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<CheckOutRequest>,
) -> actix_web::Result<impl Responder> {
    let now_local = Utc::now().with_timezone(&config.report_tz);
    let day = now_local.date_naive();
    let wall_clock = now_local.format("%H:%M").to_string();

    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET check_out_local = ?
        WHERE staff_email = ?
        AND day = ?
        AND check_out_local IS NULL
        "#,
    )
    .bind(&wall_clock)
    .bind(&payload.staff_email)
    .bind(day)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, staff_email = %payload.staff_email, "Check-out failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "No active check-in found for today"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Checked out successfully"
    })))
}

/// Set or clear an administrator override for one staff/day
#[utoipa::path(
    put,
    path = "/api/v1/attendance/override",
    request_body = OverrideRequest,
    responses(
        (status = 200, description = "Override saved", body = Object, example = json!({
            "message": "Override saved"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn set_override(
    pool: web::Data<MySqlPool>,
    payload: web::Json<OverrideRequest>,
) -> actix_web::Result<impl Responder> {
    let stored = payload.status_override.map(|s| s.to_string());

    sqlx::query(
        r#"
        INSERT INTO attendance (staff_email, day, status_override)
        VALUES (?, ?, ?)
        ON DUPLICATE KEY UPDATE status_override = VALUES(status_override)
        "#,
    )
    .bind(&payload.staff_email)
    .bind(payload.day)
    .bind(&stored)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, staff_email = %payload.staff_email, day = %payload.day, "Override upsert failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Override saved"
    })))
}
