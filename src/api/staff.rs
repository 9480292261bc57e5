use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::model::staff::Staff;
use crate::utils::roster_cache;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateStaff {
    #[schema(example = "aina@company.my", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "Aina Rahman", value_type = String)]
    pub name: String,
    #[schema(example = "+60123456789", nullable = true)]
    pub phone: Option<String>,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub hire_date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StaffQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct StaffListResponse {
    pub data: Vec<Staff>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 7)]
    pub total: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateStaff {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub hire_date: Option<NaiveDate>,
}

/// Widened before multiplying; a huge `page` query must not overflow u32.
fn page_offset(page: u32, per_page: u32) -> i64 {
    (i64::from(page) - 1) * i64::from(per_page)
}

/// Create staff member
#[utoipa::path(
    post,
    path = "/api/v1/staff",
    request_body = CreateStaff,
    responses(
        (status = 200, description = "Staff created successfully", body = Object, example = json!({
            "message": "Staff created successfully"
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Something went wrong, Contact with system admin"
        }))
    ),
    tag = "Staff"
)]
pub async fn create_staff(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateStaff>,
) -> impl Responder {
    let result = sqlx::query(
        r#"
        INSERT INTO staff (email, name, phone, hire_date, status)
        VALUES (?, ?, ?, ?, 'active')
        "#,
    )
    .bind(&payload.email)
    .bind(&payload.name)
    .bind(&payload.phone)
    .bind(payload.hire_date)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            roster_cache::cache_name(&payload.email, &payload.name).await;
            HttpResponse::Ok().json(json!({
                "message": "Staff created successfully"
            }))
        }
        Err(e) => {
            error!(error = %e, "Failed to create staff");
            HttpResponse::InternalServerError().json(json!({
                "message":"Something went wrong, Contact with system admin"
            }))
        }
    }
}

/// List staff roster
#[utoipa::path(
    get,
    path = "/api/v1/staff",
    params(
        ("page",  Query, description = "Page number"),
        ("per_page", Query, description = "Items per page"),
        ("status", Query, description = "Filter by status"),
        ("search", Query, description = "Search by name or email")
    ),
    responses(
        (status = 200, description = "Paginated staff list", body = StaffListResponse)
    ),
    tag = "Staff"
)]
pub async fn list_staff(
    pool: web::Data<MySqlPool>,
    query: web::Query<StaffQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = page_offset(page, per_page);

    // ---------- build WHERE clause dynamically ----------
    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(status) = &query.status {
        conditions.push("status = ?");
        bindings.push(status.clone());
    }

    if let Some(search) = &query.search {
        conditions.push("(name LIKE ? OR email LIKE ?)");
        let like = format!("%{}%", search);
        bindings.push(like.clone());
        bindings.push(like);
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    // ---------- total count ----------
    let count_sql = format!("SELECT COUNT(*) FROM staff {}", where_clause);
    debug!(sql = %count_sql, "Counting staff");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &bindings {
        count_query = count_query.bind(b);
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %count_sql, "Failed to count staff");
        ErrorInternalServerError("Database error")
    })?;

    // ---------- data query ----------
    let data_sql = format!(
        "SELECT * FROM staff {} ORDER BY name ASC LIMIT ? OFFSET ?",
        where_clause
    );
    debug!(sql = %data_sql, page, per_page, offset, "Fetching staff");

    let mut data_query = sqlx::query_as::<_, Staff>(&data_sql);
    for b in &bindings {
        data_query = data_query.bind(b);
    }
    data_query = data_query.bind(per_page as i64).bind(offset);

    let staff = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %data_sql, "Failed to fetch staff");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(StaffListResponse {
        data: staff,
        page,
        per_page,
        total,
    }))
}

/// Get staff member by ID
#[utoipa::path(
    get,
    path = "/api/v1/staff/{staff_id}",
    params(
        ("staff_id", Path, description = "Staff ID")
    ),
    responses(
        (status = 200, description = "Staff found", body = Staff),
        (status = 404, description = "Staff not found", body = Object, example = json!({
            "message": "Staff not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Staff"
)]
pub async fn get_staff(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let staff_id = path.into_inner();

    let staff = sqlx::query_as::<_, Staff>(r#"SELECT * FROM staff WHERE id = ?"#)
        .bind(staff_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, staff_id, "Failed to fetch staff");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match staff {
        Some(s) => Ok(HttpResponse::Ok().json(s)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Staff not found"
        }))),
    }
}

/// Update staff member
#[utoipa::path(
    put,
    path = "/api/v1/staff/{staff_id}",
    params(
        ("staff_id", Path, description = "Staff ID")
    ),
    request_body = UpdateStaff,
    responses(
        (status = 200, description = "Staff updated successfully", body = Object, example = json!({
            "message": "Staff updated successfully"
        })),
        (status = 404, description = "Staff not found", body = Object, example = json!({
            "message": "Staff not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Staff"
)]
pub async fn update_staff(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<UpdateStaff>,
) -> actix_web::Result<impl Responder> {
    let staff_id = path.into_inner();

    let current = sqlx::query_as::<_, Staff>(r#"SELECT * FROM staff WHERE id = ?"#)
        .bind(staff_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, staff_id, "Failed to fetch staff");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let current = match current {
        Some(c) => c,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Staff not found"
            })));
        }
    };

    let name = body.name.clone().unwrap_or(current.name);
    let phone = body.phone.clone().or(current.phone);
    let status = body.status.clone().unwrap_or(current.status);
    let hire_date = body.hire_date.unwrap_or(current.hire_date);

    sqlx::query(
        r#"
        UPDATE staff
        SET name = ?, phone = ?, status = ?, hire_date = ?
        WHERE id = ?
        "#,
    )
    .bind(&name)
    .bind(&phone)
    .bind(&status)
    .bind(hire_date)
    .bind(staff_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, staff_id, "Failed to update staff");
        ErrorInternalServerError("Internal Server Error")
    })?;

    roster_cache::invalidate(&current.email).await;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Staff updated successfully"
    })))
}

/// Delete staff member
#[utoipa::path(
    delete,
    path = "/api/v1/staff/{staff_id}",
    params(
        ("staff_id", Path, description = "Staff ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Staff not found", body = Object, example = json!({
            "message": "Staff not found"
        })),
        (status = 500, description = "Internal server error", body = Object)
    ),
    tag = "Staff"
)]
pub async fn delete_staff(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let staff_id = path.into_inner();

    let email = sqlx::query_scalar::<_, String>(r#"SELECT email FROM staff WHERE id = ?"#)
        .bind(staff_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, staff_id, "Failed to fetch staff");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let Some(email) = email else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Staff not found"
        })));
    };

    let result = sqlx::query(r#"DELETE FROM staff WHERE id = ?"#)
        .bind(staff_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(_) => {
            roster_cache::invalidate(&email).await;
            Ok(HttpResponse::Ok().json(json!({
                "message": "Successfully deleted"
            })))
        }

        Err(e) => {
            error!(error = %e, staff_id, "Failed to delete staff");

            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}
