use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "email": "aina@company.my",
        "name": "Aina Rahman",
        "phone": "+60123456789",
        "hire_date": "2024-01-01",
        "status": "active"
    })
)]
pub struct Staff {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "aina@company.my")]
    pub email: String,

    #[schema(example = "Aina Rahman")]
    pub name: String,

    #[schema(example = "+60123456789", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub hire_date: NaiveDate,

    #[schema(example = "active")]
    pub status: String,
}

/// Roster projection used by the report for display-name resolution.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StaffName {
    pub email: String,
    pub name: Option<String>,
}
