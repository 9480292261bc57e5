use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use sqlx::MySqlPool;

use crate::config::Config;
use crate::model::report::{MonthlyReportResponse, PrintReportResponse};
use crate::report::store::SqlAttendanceStore;
use crate::report::{ReportContext, build_monthly_report, month_window, paginate::paginate};

fn report_context(config: &Config) -> ReportContext {
    ReportContext {
        tz: config.report_tz,
        cutoff: config.cutoff_time,
        // "today" is resolved once here, at the edge
        today: Utc::now().with_timezone(&config.report_tz).date_naive(),
    }
}

/// Monthly attendance reconciliation report
#[utoipa::path(
    get,
    path = "/api/v1/report/{year}/{month}",
    params(
        ("year", description = "4-digit year"),
        ("month", description = "Month 1-12")
    ),
    responses(
        (status = 200, description = "Grouped monthly report", body = MonthlyReportResponse),
        (status = 400, description = "Invalid year or month", body = Object, example = json!({
            "message": "Invalid year or month"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Report"
)]
pub async fn monthly_report(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<(i32, u32)>,
) -> actix_web::Result<impl Responder> {
    let (year, month) = path.into_inner();

    let Some((first, last)) = month_window(year, month) else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Invalid year or month"
        })));
    };

    let store = SqlAttendanceStore::new(pool.get_ref().clone());
    let ctx = report_context(&config);

    let groups = build_monthly_report(&store, first, last, &ctx)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, year, month, "Failed to build monthly report");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(MonthlyReportResponse {
        year,
        month,
        groups,
    }))
}

/// Print-ready monthly report: pages of fixed-size staff blocks
#[utoipa::path(
    get,
    path = "/api/v1/report/{year}/{month}/print",
    params(
        ("year", description = "4-digit year"),
        ("month", description = "Month 1-12")
    ),
    responses(
        (status = 200, description = "Paginated report for A4 layout", body = PrintReportResponse),
        (status = 400, description = "Invalid year or month"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Report"
)]
pub async fn print_report(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<(i32, u32)>,
) -> actix_web::Result<impl Responder> {
    let (year, month) = path.into_inner();

    let Some((first, last)) = month_window(year, month) else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Invalid year or month"
        })));
    };

    let store = SqlAttendanceStore::new(pool.get_ref().clone());
    let ctx = report_context(&config);

    let groups = build_monthly_report(&store, first, last, &ctx)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, year, month, "Failed to build print report");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(PrintReportResponse {
        year,
        month,
        page_size: config.report_page_size,
        pages: paginate(groups, config.report_page_size),
    }))
}
